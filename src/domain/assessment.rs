// ==========================================
// 儿童成长发育评估引擎 - 领域评估模型
// ==========================================
// 依据: Growth_Engine_Design_v0.2.md - 3. 领域评估聚合
// 红线: 评估结果为派生数据，每次请求重算，不独立持久化
// ==========================================

use crate::domain::types::{AssessmentStatus, DevelopmentDomain};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 评估块缺失时的中性分数
pub const NEUTRAL_SCORE: f64 = 50.0;

// ==========================================
// ProviderAssertedMilestone - 评估服务断言达成的里程碑
// ==========================================
// 评估服务不提供真实达成日期，noted_at 为本次评估的生成时间
// 与家长确认的 AchievementRecord 是两个独立概念，类型上刻意分开
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderAssertedMilestone {
    pub milestone_id: String,         // 里程碑主键
    pub title: String,                // 标题（目录回填）
    pub noted_at: DateTime<Utc>,      // 本次评估生成时间
}

// ==========================================
// UpcomingMilestone - 即将到来的里程碑
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingMilestone {
    pub milestone_id: String,     // 里程碑主键
    pub title: String,            // 标题（目录回填）
    pub typical_months: u32,      // 典型月龄
}

// ==========================================
// DomainAssessment - 单领域评估结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainAssessment {
    pub domain: DevelopmentDomain,                          // 领域
    pub score: f64,                                         // 0 ~ 100
    pub status: AssessmentStatus,                           // 状态
    pub observations: Vec<String>,                          // 观察记录
    pub strengths: Vec<String>,                             // 优势
    pub areas_to_support: Vec<String>,                      // 需支持方向
    pub achieved_milestones: Vec<ProviderAssertedMilestone>, // 本次断言达成
    pub upcoming_milestones: Vec<UpcomingMilestone>,        // 即将到来
    pub activities: Vec<String>,                            // 建议活动
}

impl DomainAssessment {
    /// 评估块缺失时的中性默认值: score=50, status=unknown, 各列表为空
    pub fn neutral(domain: DevelopmentDomain) -> Self {
        Self {
            domain,
            score: NEUTRAL_SCORE,
            status: AssessmentStatus::Unknown,
            observations: Vec::new(),
            strengths: Vec::new(),
            areas_to_support: Vec::new(),
            achieved_milestones: Vec::new(),
            upcoming_milestones: Vec::new(),
            activities: Vec::new(),
        }
    }
}

// ==========================================
// DomainAssessmentSet - 四领域评估集合
// ==========================================
// 评估服务仅覆盖 motor/language/cognitive/social 四个领域
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainAssessmentSet {
    pub motor: DomainAssessment,
    pub language: DomainAssessment,
    pub cognitive: DomainAssessment,
    pub social: DomainAssessment,
}

impl DomainAssessmentSet {
    /// 按领域取评估结果（sensory 无评估块，返回 None）
    pub fn get(&self, domain: DevelopmentDomain) -> Option<&DomainAssessment> {
        match domain {
            DevelopmentDomain::Motor => Some(&self.motor),
            DevelopmentDomain::Language => Some(&self.language),
            DevelopmentDomain::Cognitive => Some(&self.cognitive),
            DevelopmentDomain::Social => Some(&self.social),
            DevelopmentDomain::Sensory => None,
        }
    }

    /// 按固定顺序遍历四个领域
    pub fn iter(&self) -> impl Iterator<Item = &DomainAssessment> {
        [&self.motor, &self.language, &self.cognitive, &self.social].into_iter()
    }
}

// ==========================================
// DevelopmentReport - 完整发育评估报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevelopmentReport {
    pub domains: DomainAssessmentSet,          // 四领域评估
    pub overall_score: f64,                    // 总评分（缺失时为中性 50）
    pub overall_status: AssessmentStatus,      // 总状态
    pub summary: Option<String>,               // 总结
    pub personalized_tips: Vec<String>,        // 个性化建议
    pub generated_at: DateTime<Utc>,           // 生成时间
}

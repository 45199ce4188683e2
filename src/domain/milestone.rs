// ==========================================
// 儿童成长发育评估引擎 - 里程碑领域模型
// ==========================================
// 依据: Growth_Engine_Design_v0.2.md - 2. 里程碑目录与成就状态
// 红线: AchievementRecord 与 WatchEntry 对同一里程碑互斥
// ==========================================

use crate::domain::types::{ConfirmedBy, DevelopmentDomain};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// MilestoneDefinition - 里程碑定义
// ==========================================
// 不变量: min_months ≤ typical_months ≤ max_months
// 用途: 目录静态数据，进程内只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneDefinition {
    pub id: String,                    // 稳定字符串主键
    pub domain: DevelopmentDomain,     // 所属发育领域
    pub title: String,                 // 标题
    pub description: String,           // 描述
    pub min_months: u32,               // 窗口下界（月龄）
    pub typical_months: u32,           // 典型月龄
    pub max_months: u32,               // 窗口上界（月龄）
    pub source: String,                // 引用来源键（对应 Citation.key）
}

impl MilestoneDefinition {
    /// 严格窗口判定: min_months ≤ age ≤ max_months
    pub fn window_contains(&self, age_months: u32) -> bool {
        self.min_months <= age_months && age_months <= self.max_months
    }

    /// 放宽窗口判定: [min-1, max+3]
    ///
    /// 让里程碑在典型窗口前后仍然可见（"即将到来"/"最近可达成"）
    pub fn visible_at(&self, age_months: u32) -> bool {
        self.min_months.saturating_sub(1) <= age_months && age_months <= self.max_months + 3
    }
}

// ==========================================
// Citation - 引用来源
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub key: String,        // 稳定键（被 MilestoneDefinition.source 引用）
    pub title: String,      // 出版物名称
    pub publisher: String,  // 发布机构
    pub url: String,        // 链接
}

// ==========================================
// AchievementRecord - 成就记录（家长/评估确认）
// ==========================================
// 每 (child, milestone) 至多一条；取消确认即删除
// 注意: 与评估服务"本次断言达成"（ProviderAssertedMilestone）是两个独立概念，
// 两者永不合并
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementRecord {
    pub milestone_id: String,          // 里程碑主键
    pub achieved_date: NaiveDate,      // 达成日期
    pub confirmed_by: ConfirmedBy,     // 确认来源
    pub notes: Option<String>,         // 备注
}

// ==========================================
// WatchEntry - 关注清单条目
// ==========================================
// 达成里程碑时必须同时移除对应关注条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchEntry {
    pub milestone_id: String,      // 里程碑主键
    pub added_date: NaiveDate,     // 加入关注日期
}

// ==========================================
// 儿童成长发育评估引擎 - 领域类型定义
// ==========================================
// 依据: Growth_Engine_Design_v0.2.md - 0.2 枚举体系
// 序列化格式: 与评估服务 JSON 线格式一致 (lowercase/snake_case)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 性别 (Sex)
// ==========================================
// Other 在生长标准查询时取男女中位数的均值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "male"),
            Sex::Female => write!(f, "female"),
            Sex::Other => write!(f, "other"),
        }
    }
}

// ==========================================
// 生长指标 (Growth Metric)
// ==========================================
// 相对标准差为固定近似值，不是 WHO LMS 参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthMetric {
    Weight,
    Height,
    HeadCircumference,
}

impl GrowthMetric {
    /// 指标的相对标准差近似值（sd = median * relative_sd）
    pub fn relative_sd(self) -> f64 {
        match self {
            GrowthMetric::Weight => 0.11,
            GrowthMetric::Height => 0.035,
            GrowthMetric::HeadCircumference => 0.025,
        }
    }
}

impl fmt::Display for GrowthMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrowthMetric::Weight => write!(f, "WEIGHT"),
            GrowthMetric::Height => write!(f, "HEIGHT"),
            GrowthMetric::HeadCircumference => write!(f, "HEAD_CIRCUMFERENCE"),
        }
    }
}

// ==========================================
// 发育领域 (Development Domain)
// ==========================================
// 评估服务仅返回前四个领域的评估块; sensory 仅存在于里程碑目录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevelopmentDomain {
    Motor,
    Language,
    Cognitive,
    Social,
    Sensory,
}

impl DevelopmentDomain {
    /// 全部领域（里程碑目录维度）
    pub const ALL: [DevelopmentDomain; 5] = [
        DevelopmentDomain::Motor,
        DevelopmentDomain::Language,
        DevelopmentDomain::Cognitive,
        DevelopmentDomain::Social,
        DevelopmentDomain::Sensory,
    ];

    /// 评估服务覆盖的领域（评估块维度）
    pub const ASSESSED: [DevelopmentDomain; 4] = [
        DevelopmentDomain::Motor,
        DevelopmentDomain::Language,
        DevelopmentDomain::Cognitive,
        DevelopmentDomain::Social,
    ];
}

impl fmt::Display for DevelopmentDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DevelopmentDomain::Motor => write!(f, "motor"),
            DevelopmentDomain::Language => write!(f, "language"),
            DevelopmentDomain::Cognitive => write!(f, "cognitive"),
            DevelopmentDomain::Social => write!(f, "social"),
            DevelopmentDomain::Sensory => write!(f, "sensory"),
        }
    }
}

// ==========================================
// 评估状态 (Assessment Status)
// ==========================================
// 评估服务线格式: on_track / emerging / needs_support / unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    OnTrack,
    Emerging,
    NeedsSupport,
    Unknown,
}

impl AssessmentStatus {
    /// 从评估服务返回的原始字符串做类型收敛
    ///
    /// 无法识别的取值收敛为 Unknown，不拒绝请求
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim() {
            "on_track" => AssessmentStatus::OnTrack,
            "emerging" => AssessmentStatus::Emerging,
            "needs_support" => AssessmentStatus::NeedsSupport,
            _ => AssessmentStatus::Unknown,
        }
    }
}

impl fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssessmentStatus::OnTrack => write!(f, "on_track"),
            AssessmentStatus::Emerging => write!(f, "emerging"),
            AssessmentStatus::NeedsSupport => write!(f, "needs_support"),
            AssessmentStatus::Unknown => write!(f, "unknown"),
        }
    }
}

// ==========================================
// 成就确认来源 (Confirmed By)
// ==========================================
// parent: 家长手动确认; analysis: 评估流程确认
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmedBy {
    Parent,
    Analysis,
}

impl ConfirmedBy {
    /// 从存储层字符串解析
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw.trim() {
            "parent" => Some(ConfirmedBy::Parent),
            "analysis" => Some(ConfirmedBy::Analysis),
            _ => None,
        }
    }
}

impl fmt::Display for ConfirmedBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfirmedBy::Parent => write!(f, "parent"),
            ConfirmedBy::Analysis => write!(f, "analysis"),
        }
    }
}

// ==========================================
// 里程碑阶段 (Milestone Phase)
// ==========================================
// Overdue: 窗口已完全过去且未达成（目录仍可查询，列表展示由调用方决定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MilestonePhase {
    Achieved,
    Current,
    Upcoming,
    Overdue,
}

impl fmt::Display for MilestonePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MilestonePhase::Achieved => write!(f, "ACHIEVED"),
            MilestonePhase::Current => write!(f, "CURRENT"),
            MilestonePhase::Upcoming => write!(f, "UPCOMING"),
            MilestonePhase::Overdue => write!(f, "OVERDUE"),
        }
    }
}

// ==========================================
// 生长百分位解读 (Growth Interpretation)
// ==========================================
// 五档解读: <3 / <15 / <85 / <97 / ≥97
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthInterpretation {
    BelowTypical,
    LowerTypical,
    WithinTypical,
    UpperTypical,
    AboveTypical,
}

impl GrowthInterpretation {
    /// i18n 文案键
    pub fn i18n_key(self) -> &'static str {
        match self {
            GrowthInterpretation::BelowTypical => "growth.interpretation.below_typical",
            GrowthInterpretation::LowerTypical => "growth.interpretation.lower_typical",
            GrowthInterpretation::WithinTypical => "growth.interpretation.within_typical",
            GrowthInterpretation::UpperTypical => "growth.interpretation.upper_typical",
            GrowthInterpretation::AboveTypical => "growth.interpretation.above_typical",
        }
    }

    /// 本地化解读文案
    pub fn text(self) -> String {
        crate::i18n::t(self.i18n_key())
    }
}

impl fmt::Display for GrowthInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrowthInterpretation::BelowTypical => write!(f, "BELOW_TYPICAL"),
            GrowthInterpretation::LowerTypical => write!(f, "LOWER_TYPICAL"),
            GrowthInterpretation::WithinTypical => write!(f, "WITHIN_TYPICAL"),
            GrowthInterpretation::UpperTypical => write!(f, "UPPER_TYPICAL"),
            GrowthInterpretation::AboveTypical => write!(f, "ABOVE_TYPICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_coercion() {
        assert_eq!(AssessmentStatus::from_wire("on_track"), AssessmentStatus::OnTrack);
        assert_eq!(AssessmentStatus::from_wire(" emerging "), AssessmentStatus::Emerging);
        assert_eq!(AssessmentStatus::from_wire("great"), AssessmentStatus::Unknown);
        assert_eq!(AssessmentStatus::from_wire(""), AssessmentStatus::Unknown);
    }

    #[test]
    fn test_confirmed_by_wire() {
        assert_eq!(ConfirmedBy::from_wire("parent"), Some(ConfirmedBy::Parent));
        assert_eq!(ConfirmedBy::from_wire("analysis"), Some(ConfirmedBy::Analysis));
        assert_eq!(ConfirmedBy::from_wire("robot"), None);
    }

    #[test]
    fn test_serde_casing() {
        assert_eq!(serde_json::to_string(&Sex::Male).unwrap(), "\"male\"");
        assert_eq!(
            serde_json::to_string(&AssessmentStatus::NeedsSupport).unwrap(),
            "\"needs_support\""
        );
        assert_eq!(
            serde_json::to_string(&MilestonePhase::Overdue).unwrap(),
            "\"OVERDUE\""
        );
    }
}

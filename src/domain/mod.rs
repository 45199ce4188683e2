// ==========================================
// 儿童成长发育评估引擎 - 领域层
// ==========================================
// 依据: Growth_Engine_Design_v0.2.md - 数据模型
// 红线: 领域实体不含业务规则，规则全部在引擎层
// ==========================================

pub mod assessment;
pub mod milestone;
pub mod profile;
pub mod types;

// 重导出领域实体
pub use assessment::{
    DevelopmentReport, DomainAssessment, DomainAssessmentSet, ProviderAssertedMilestone,
    UpcomingMilestone, NEUTRAL_SCORE,
};
pub use milestone::{AchievementRecord, Citation, MilestoneDefinition, WatchEntry};
pub use profile::{GrowthAssessment, GrowthProfile};
pub use types::{
    AssessmentStatus, ConfirmedBy, DevelopmentDomain, GrowthInterpretation, GrowthMetric,
    MilestonePhase, Sex,
};

// ==========================================
// 儿童成长发育评估引擎 - 核心库
// ==========================================
// 依据: Growth_Engine_Design_v0.2.md - 系统总览
// 技术栈: Rust + Tokio + SQLite
// 系统定位: 决策支持引擎 (不做医学诊断)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 参考数据层 - 生长标准曲线与里程碑目录
pub mod reference;

// 引擎层 - 业务规则
pub mod engine;

// 评估服务层 - 生成式评估结果解析
pub mod provider;

// 成就状态层 - 本地状态机与同步发件箱
pub mod store;

// 远端持久化层 - 持久化接口与 SQLite 实现
pub mod remote;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    AssessmentStatus, ConfirmedBy, DevelopmentDomain, GrowthInterpretation, GrowthMetric,
    MilestonePhase, Sex,
};

// 领域实体
pub use domain::{
    AchievementRecord, Citation, DevelopmentReport, DomainAssessment, DomainAssessmentSet,
    GrowthAssessment, GrowthProfile, MilestoneDefinition, ProviderAssertedMilestone,
    UpcomingMilestone, WatchEntry, NEUTRAL_SCORE,
};

// 参考数据
pub use reference::{catalog, MilestoneCatalog};

// 引擎
pub use engine::{
    DomainAssessmentAggregator, MilestoneOutlook, MilestoneWindowResolver, PercentileEngine,
};

// 评估服务
pub use provider::{AssessmentResponse, ProviderError, RawDomainAssessment};

// 成就状态
pub use store::{AchievementStore, IntentStatus, Outbox, SyncIntent, SyncOperation};

// 远端持久化
pub use remote::{
    AchievementUpsert, ChildMilestoneSnapshot, MilestoneRemote, RemoteError, SqliteMilestoneStore,
};

// API
pub use api::{ApiError, ApiResult, AssessmentApi, GrowthApi, MilestoneApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "儿童成长发育评估引擎";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}

// ==========================================
// 儿童成长发育评估引擎 - 引擎层
// ==========================================
// 依据: Growth_Engine_Design_v0.2.md - 1~3 引擎拆分
// ==========================================
// 职责: 实现业务规则,全部为纯函数式计算
// 红线: 引擎不持有可变状态,不做 IO,时间由调用方传入
// ==========================================

pub mod aggregator;
pub mod percentile;
pub mod window;

// 重导出核心引擎
pub use aggregator::DomainAssessmentAggregator;
pub use percentile::PercentileEngine;
pub use window::{MilestoneOutlook, MilestoneWindowResolver};

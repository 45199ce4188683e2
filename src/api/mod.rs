// ==========================================
// 儿童成长发育评估引擎 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供 UI 与服务端进程调用
// 红线: 输入校验在任何查表/计算之前同步完成
// ==========================================

pub mod assessment_api;
pub mod error;
pub mod growth_api;
pub mod milestone_api;

// 重导出核心类型
pub use assessment_api::AssessmentApi;
pub use error::{ApiError, ApiResult};
pub use growth_api::GrowthApi;
pub use milestone_api::{MilestoneApi, MilestoneWindowView};

// ==========================================
// 儿童成长发育评估引擎 - 参考数据层
// ==========================================
// 依据: Growth_Engine_Design_v0.2.md - 0.3 参考数据
// 红线: 参考数据进程内只读，启动初始化一次，无热更新
// ==========================================

pub mod catalog;
pub mod growth_standard;

// 重导出核心访问入口
pub use catalog::{catalog, MilestoneCatalog};
pub use growth_standard::{median, GrowthCurvePoint, HEAD_CIRCUMFERENCE_AGE_LIMIT_MONTHS};

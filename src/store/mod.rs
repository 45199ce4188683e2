// ==========================================
// 儿童成长发育评估引擎 - 成就状态层
// ==========================================
// 依据: Growth_Engine_Design_v0.2.md - 4. 成就状态机
// ==========================================
// 红线: 本地优先: 每个变更先无条件落本地，再尽力而为地同步远端，
//       远端结果永不回滚本地状态
// ==========================================

pub mod achievement;
pub mod error;
pub mod outbox;

// 重导出核心类型
pub use achievement::AchievementStore;
pub use error::{StoreError, StoreResult};
pub use outbox::{IntentStatus, Outbox, SyncIntent, SyncOperation};

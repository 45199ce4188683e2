// ==========================================
// 儿童成长发育评估引擎 - 成就状态层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 成就状态层错误类型
///
/// 注意: 远端同步失败不在此列: 同步是尽力而为的，
/// 失败只记录在发件箱与日志中，不作为错误向上传播
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("发件箱锁获取失败: {0}")]
    LockError(String),

    #[error("内部错误: {0}")]
    InternalError(String),
}

/// Result 类型别名
pub type StoreResult<T> = Result<T, StoreError>;

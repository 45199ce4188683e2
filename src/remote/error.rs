// ==========================================
// 儿童成长发育评估引擎 - 远端持久化错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 远端持久化错误类型
#[derive(Error, Debug)]
pub enum RemoteError {
    // ===== 传输/可用性错误 =====
    #[error("远端存储不可用: {0}")]
    Unavailable(String),

    #[error("远端接口错误: status={status}, message={message}")]
    Api { status: u16, message: String },

    // ===== 存储错误 =====
    #[error("存储查询失败: {0}")]
    Storage(String),

    #[error("记录未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    // ===== 数据错误 =====
    #[error("字段值错误 (field={field}): {message}")]
    FieldValueError { field: String, message: String },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for RemoteError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::QueryReturnedNoRows => RemoteError::NotFound {
                entity: "Unknown".to_string(),
                id: "Unknown".to_string(),
            },
            _ => RemoteError::Storage(err.to_string()),
        }
    }
}

/// Result 类型别名
pub type RemoteResult<T> = Result<T, RemoteError>;

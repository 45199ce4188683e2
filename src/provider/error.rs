// ==========================================
// 儿童成长发育评估引擎 - 评估服务错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 评估服务错误类型
///
/// 区分于逐字段缺省: 这里的错误对该次评估请求是致命的
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("评估服务响应无法解析: {source}")]
    UnparseableResponse {
        #[source]
        source: serde_json::Error,
    },

    #[error("评估服务响应为空")]
    EmptyResponse,
}

/// Result 类型别名
pub type ProviderResult<T> = Result<T, ProviderError>;

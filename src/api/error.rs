// ==========================================
// 儿童成长发育评估引擎 - API 层错误类型
// ==========================================
// 职责: 定义 API 层错误类型，转换下层错误为用户友好的错误消息
// 红线: 输入校验错误同步返回，不得静默收敛
//       （z 值收敛、查表端点收敛是算法行为，不属于错误恢复）
// 工具: thiserror 派生宏
// ==========================================

use crate::provider::ProviderError;
use crate::remote::RemoteError;
use crate::store::StoreError;
use thiserror::Error;

/// API 层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入校验错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("字段值错误 (field={field}): {message}")]
    FieldValueError { field: String, message: String },

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 评估服务错误
    // ==========================================
    // 对该次评估请求致命；是否重试由调用方决定
    #[error("评估服务错误: {0}")]
    AssessmentProvider(#[from] ProviderError),

    // ==========================================
    // 远端读取错误
    // ==========================================
    // 仅在读取路径（水合）上出现；写路径的远端失败不会走到这里
    #[error("远端读取失败: {0}")]
    RemoteRead(#[from] RemoteError),

    // ==========================================
    // 状态层错误
    // ==========================================
    #[error("成就状态错误: {0}")]
    StateStore(#[from] StoreError),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// 输入校验辅助函数
// ==========================================

/// 月龄合理上限（20 岁）
pub const MAX_AGE_MONTHS: u32 = 240;

/// 校验月龄
///
/// # 返回
/// - Ok(()) 月龄在合理范围内
/// - Err(ApiError::FieldValueError) 超出范围
pub fn validate_age_months(age_months: u32) -> ApiResult<()> {
    if age_months > MAX_AGE_MONTHS {
        return Err(ApiError::FieldValueError {
            field: "age_months".to_string(),
            message: format!("月龄超出合理范围: {} (上限 {})", age_months, MAX_AGE_MONTHS),
        });
    }
    Ok(())
}

/// 校验测量值区间（闭区间）
///
/// # 参数
/// - field: 字段名（错误消息用）
/// - value: 测量值
/// - min/max: 合理区间
pub fn validate_measurement(field: &str, value: f64, min: f64, max: f64) -> ApiResult<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(ApiError::FieldValueError {
            field: field.to_string(),
            message: format!("测量值超出合理范围: {} (区间 {} ~ {})", value, min, max),
        });
    }
    Ok(())
}

/// 校验儿童标识非空
pub fn validate_child_id(child_id: &str) -> ApiResult<()> {
    if child_id.trim().is_empty() {
        return Err(ApiError::InvalidInput("child_id 不能为空".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_validation() {
        assert!(validate_age_months(0).is_ok());
        assert!(validate_age_months(240).is_ok());

        let result = validate_age_months(241);
        match result {
            Err(ApiError::FieldValueError { field, .. }) => assert_eq!(field, "age_months"),
            _ => panic!("Expected FieldValueError"),
        }
    }

    #[test]
    fn test_measurement_validation() {
        assert!(validate_measurement("weight_kg", 9.6, 0.3, 150.0).is_ok());
        assert!(validate_measurement("weight_kg", 0.1, 0.3, 150.0).is_err());
        assert!(validate_measurement("weight_kg", f64::NAN, 0.3, 150.0).is_err());
    }

    #[test]
    fn test_provider_error_conversion() {
        let api_err: ApiError = ProviderError::EmptyResponse.into();
        match api_err {
            ApiError::AssessmentProvider(_) => {}
            _ => panic!("Expected AssessmentProvider"),
        }
    }

    #[test]
    fn test_remote_error_conversion() {
        let remote_err = RemoteError::Unavailable("offline".to_string());
        let api_err: ApiError = remote_err.into();
        match api_err {
            ApiError::RemoteRead(RemoteError::Unavailable(msg)) => assert_eq!(msg, "offline"),
            _ => panic!("Expected RemoteRead"),
        }
    }
}

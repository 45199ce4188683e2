// ==========================================
// 儿童成长发育评估引擎 - 评估服务响应解析
// ==========================================
// 依据: Growth_Engine_Design_v0.2.md - 6.1 生成式评估服务接口
// ==========================================
// 职责: 解析评估服务（生成式模型）返回的 JSON 快照
// 约束:
// - 评估块缺失/字段缺失 → 逐字段默认，不拒绝
// - 整体无法解析 → 本次评估请求失败（区分于字段缺省）
// - score 接受数字或数字字符串（类型收敛，不做取值校验）
// ==========================================

pub mod error;

pub use error::{ProviderError, ProviderResult};

use crate::domain::types::DevelopmentDomain;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// ==========================================
// RawDomainAssessment - 单领域原始评估块
// ==========================================
// 评估服务线格式为 camelCase；所有字段可缺省
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawDomainAssessment {
    #[serde(deserialize_with = "de_loose_number")]
    pub score: Option<f64>,
    pub status: Option<String>,
    pub observations: Vec<String>,
    pub strengths: Vec<String>,
    pub areas_to_support: Vec<String>,
    pub achieved_milestone_ids: Vec<String>,
    pub activities: Vec<String>,
}

// ==========================================
// AssessmentResponse - 评估服务完整响应
// ==========================================
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssessmentResponse {
    pub motor: Option<RawDomainAssessment>,
    pub language: Option<RawDomainAssessment>,
    pub cognitive: Option<RawDomainAssessment>,
    pub social: Option<RawDomainAssessment>,
    #[serde(deserialize_with = "de_loose_number")]
    pub overall_score: Option<f64>,
    pub overall_status: Option<String>,
    pub summary: Option<String>,
    pub personalized_tips: Vec<String>,
}

impl AssessmentResponse {
    /// 解析评估服务返回的原始字符串
    ///
    /// 空响应与非 JSON 响应都是该次评估请求的致命错误，
    /// 是否重试由调用方决定
    pub fn parse(raw: &str) -> ProviderResult<Self> {
        if raw.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        serde_json::from_str(raw).map_err(|source| ProviderError::UnparseableResponse { source })
    }

    /// 按领域取评估块（sensory 无评估块）
    pub fn domain_block(&self, domain: DevelopmentDomain) -> Option<&RawDomainAssessment> {
        match domain {
            DevelopmentDomain::Motor => self.motor.as_ref(),
            DevelopmentDomain::Language => self.language.as_ref(),
            DevelopmentDomain::Cognitive => self.cognitive.as_ref(),
            DevelopmentDomain::Social => self.social.as_ref(),
            DevelopmentDomain::Sensory => None,
        }
    }
}

/// 宽松数字反序列化: 接受 JSON 数字或数字字符串，其他形态视为缺省
fn de_loose_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_number))
}

/// JSON 值 → f64 类型收敛
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

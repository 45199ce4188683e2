// ==========================================
// 儿童成长发育评估引擎 - 发育评估 API
// ==========================================
// 依据: Growth_Engine_Design_v0.2.md - 6.3 对外接口
// ==========================================
// 职责: 评估服务原始响应 → 完整发育评估报告
// 约束: 响应整体无法解析对该次请求致命；单块/单字段缺失逐项默认
// ==========================================

use crate::api::error::{validate_age_months, ApiResult};
use crate::domain::assessment::DevelopmentReport;
use crate::engine::aggregator::DomainAssessmentAggregator;
use crate::provider::AssessmentResponse;
use crate::reference::catalog::catalog;
use chrono::{DateTime, Utc};
use tracing::instrument;

// ==========================================
// AssessmentApi - 发育评估 API
// ==========================================
#[derive(Debug, Default)]
pub struct AssessmentApi {
    aggregator: DomainAssessmentAggregator,
}

impl AssessmentApi {
    /// 创建新的发育评估 API
    pub fn new() -> Self {
        Self {
            aggregator: DomainAssessmentAggregator::new(),
        }
    }

    /// 解析评估服务原始响应并聚合为报告
    ///
    /// 报告时间戳取当前时间；需要确定性时间时用 build_from_response
    #[instrument(skip(self, raw_response))]
    pub fn build_domain_assessments(
        &self,
        raw_response: &str,
        age_months: u32,
    ) -> ApiResult<DevelopmentReport> {
        validate_age_months(age_months)?;
        let response = AssessmentResponse::parse(raw_response)?;
        Ok(self
            .aggregator
            .build_report(&response, catalog(), age_months, Utc::now()))
    }

    /// 从已解析响应聚合报告（时间由调用方传入）
    pub fn build_from_response(
        &self,
        response: &AssessmentResponse,
        age_months: u32,
        generated_at: DateTime<Utc>,
    ) -> ApiResult<DevelopmentReport> {
        validate_age_months(age_months)?;
        Ok(self
            .aggregator
            .build_report(response, catalog(), age_months, generated_at))
    }
}

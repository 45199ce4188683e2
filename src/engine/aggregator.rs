// ==========================================
// 儿童成长发育评估引擎 - 领域评估聚合引擎
// ==========================================
// 依据: Growth_Engine_Design_v0.2.md - 3. Assessment Aggregator
// ==========================================
// 职责: 评估服务快照 + 里程碑目录 → 规范化领域评估
// 红线: 不读取成就状态存储: "本次断言达成"与"家长确认达成"
//       是两个独立口径，禁止在此合并
// ==========================================

use crate::domain::assessment::{
    DevelopmentReport, DomainAssessment, DomainAssessmentSet, ProviderAssertedMilestone,
    UpcomingMilestone, NEUTRAL_SCORE,
};
use crate::domain::types::{AssessmentStatus, DevelopmentDomain};
use crate::provider::{AssessmentResponse, RawDomainAssessment};
use crate::reference::catalog::MilestoneCatalog;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::instrument;

// ==========================================
// DomainAssessmentAggregator - 领域评估聚合引擎
// ==========================================
// 一次性转换，时间由调用方传入，可并发调用
#[derive(Debug, Default)]
pub struct DomainAssessmentAggregator;

impl DomainAssessmentAggregator {
    /// 创建新的聚合引擎
    pub fn new() -> Self {
        Self
    }

    /// 单领域聚合
    ///
    /// 规则:
    /// - 评估块缺失 → 中性默认值 (score=50, status=unknown, 列表全空)
    /// - score/status 原样透传，仅做类型收敛，不做取值校验
    /// - achieved_milestone_ids 与该领域目录交叉比对:
    ///   命中的 → achieved_milestones（时间戳为本次评估生成时间）
    ///   该领域月龄视窗内未命中的 → upcoming_milestones（携带 typical_months）
    pub fn build_assessment(
        &self,
        domain: DevelopmentDomain,
        raw: Option<&RawDomainAssessment>,
        catalog: &MilestoneCatalog,
        age_months: u32,
        generated_at: DateTime<Utc>,
    ) -> DomainAssessment {
        let Some(raw) = raw else {
            return DomainAssessment::neutral(domain);
        };

        let score = raw.score.unwrap_or(NEUTRAL_SCORE);
        let status = raw
            .status
            .as_deref()
            .map(AssessmentStatus::from_wire)
            .unwrap_or(AssessmentStatus::Unknown);

        let asserted: HashSet<&str> = raw
            .achieved_milestone_ids
            .iter()
            .map(String::as_str)
            .collect();

        // 断言达成: 与该领域全量目录比对（断言可落在视窗之外）
        let achieved_milestones = catalog
            .for_domain(domain)
            .into_iter()
            .filter(|d| asserted.contains(d.id.as_str()))
            .map(|d| ProviderAssertedMilestone {
                milestone_id: d.id.clone(),
                title: d.title.clone(),
                noted_at: generated_at,
            })
            .collect();

        // 即将到来: 该领域月龄视窗内未被断言的定义
        let upcoming_milestones = catalog
            .for_age(age_months)
            .into_iter()
            .filter(|d| d.domain == domain && !asserted.contains(d.id.as_str()))
            .map(|d| UpcomingMilestone {
                milestone_id: d.id.clone(),
                title: d.title.clone(),
                typical_months: d.typical_months,
            })
            .collect();

        DomainAssessment {
            domain,
            score,
            status,
            observations: raw.observations.clone(),
            strengths: raw.strengths.clone(),
            areas_to_support: raw.areas_to_support.clone(),
            achieved_milestones,
            upcoming_milestones,
            activities: raw.activities.clone(),
        }
    }

    /// 四领域聚合 + 总体字段透传
    #[instrument(skip(self, response, catalog))]
    pub fn build_report(
        &self,
        response: &AssessmentResponse,
        catalog: &MilestoneCatalog,
        age_months: u32,
        generated_at: DateTime<Utc>,
    ) -> DevelopmentReport {
        let build = |domain: DevelopmentDomain| {
            self.build_assessment(
                domain,
                response.domain_block(domain),
                catalog,
                age_months,
                generated_at,
            )
        };

        let domains = DomainAssessmentSet {
            motor: build(DevelopmentDomain::Motor),
            language: build(DevelopmentDomain::Language),
            cognitive: build(DevelopmentDomain::Cognitive),
            social: build(DevelopmentDomain::Social),
        };

        DevelopmentReport {
            domains,
            overall_score: response.overall_score.unwrap_or(NEUTRAL_SCORE),
            overall_status: response
                .overall_status
                .as_deref()
                .map(AssessmentStatus::from_wire)
                .unwrap_or(AssessmentStatus::Unknown),
            summary: response.summary.clone(),
            personalized_tips: response.personalized_tips.clone(),
            generated_at,
        }
    }
}

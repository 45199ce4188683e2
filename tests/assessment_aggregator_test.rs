// ==========================================
// DomainAssessmentAggregator 引擎集成测试
// ==========================================
// 测试目标: 验证评估服务快照 → 领域评估的聚合规则
// 覆盖范围: 中性默认 / 类型收敛 / 断言达成与即将到来交叉比对
// ==========================================

use chrono::{TimeZone, Utc};
use growth_compass::api::{ApiError, AssessmentApi};
use growth_compass::domain::types::{AssessmentStatus, DevelopmentDomain};
use growth_compass::engine::DomainAssessmentAggregator;
use growth_compass::provider::{AssessmentResponse, ProviderError};
use growth_compass::reference::catalog;
use growth_compass::NEUTRAL_SCORE;

// ==========================================
// 测试用例 1: 评估块缺失 → 中性默认值
// ==========================================

#[test]
fn test_missing_block_yields_neutral_default() {
    let aggregator = DomainAssessmentAggregator::new();
    let generated_at = Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap();

    let assessment = aggregator.build_assessment(
        DevelopmentDomain::Motor,
        None,
        catalog(),
        10,
        generated_at,
    );

    assert_eq!(assessment.score, NEUTRAL_SCORE);
    assert_eq!(assessment.status, AssessmentStatus::Unknown);
    assert!(assessment.observations.is_empty());
    assert!(assessment.strengths.is_empty());
    assert!(assessment.areas_to_support.is_empty());
    assert!(assessment.achieved_milestones.is_empty());
    assert!(assessment.upcoming_milestones.is_empty());
    assert!(assessment.activities.is_empty());
}

// ==========================================
// 测试用例 2: 具体场景: 10 月龄 motor 块断言 pincer-grasp
// ==========================================

#[test]
fn test_scenario_asserted_and_upcoming_cross_reference() {
    let aggregator = DomainAssessmentAggregator::new();
    let generated_at = Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap();

    let raw = r#"{
        "motor": {
            "score": 85,
            "status": "on_track",
            "achievedMilestoneIds": ["pincer-grasp"]
        }
    }"#;
    let response = AssessmentResponse::parse(raw).unwrap();

    let assessment = aggregator.build_assessment(
        DevelopmentDomain::Motor,
        response.domain_block(DevelopmentDomain::Motor),
        catalog(),
        10,
        generated_at,
    );

    assert_eq!(assessment.score, 85.0);
    assert_eq!(assessment.status, AssessmentStatus::OnTrack);

    // 断言达成: 时间戳取本次评估生成时间（评估服务不提供真实达成日期）
    assert_eq!(assessment.achieved_milestones.len(), 1);
    let asserted = &assessment.achieved_milestones[0];
    assert_eq!(asserted.milestone_id, "pincer-grasp");
    assert_eq!(asserted.noted_at, generated_at);

    // 即将到来: 同窗口未断言项携带 typical_months
    let upcoming = assessment
        .upcoming_milestones
        .iter()
        .find(|m| m.milestone_id == "bangs-objects")
        .expect("bangs-objects 应在即将到来列表中");
    assert_eq!(upcoming.typical_months, 10);

    // 被断言的项不得同时出现在即将到来列表中
    assert!(!assessment
        .upcoming_milestones
        .iter()
        .any(|m| m.milestone_id == "pincer-grasp"));
}

// ==========================================
// 测试用例 3: 类型收敛
// ==========================================

#[test]
fn test_loose_typing_coercion() {
    let aggregator = DomainAssessmentAggregator::new();
    let generated_at = Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap();

    // score 为数字字符串，status 为未知取值
    let raw = r#"{"language": {"score": "72.5", "status": "thriving"}}"#;
    let response = AssessmentResponse::parse(raw).unwrap();

    let assessment = aggregator.build_assessment(
        DevelopmentDomain::Language,
        response.domain_block(DevelopmentDomain::Language),
        catalog(),
        10,
        generated_at,
    );

    assert_eq!(assessment.score, 72.5);
    assert_eq!(assessment.status, AssessmentStatus::Unknown);
}

// ==========================================
// 测试用例 4: 完整报告聚合与总体字段
// ==========================================

#[test]
fn test_full_report_defaults_and_passthrough() {
    let api = AssessmentApi::new();
    let generated_at = Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap();

    let raw = r#"{
        "motor": {"score": 85, "status": "on_track"},
        "cognitive": {"status": "emerging"},
        "overallStatus": "on_track",
        "summary": "Developing well overall.",
        "personalizedTips": ["Read together daily"]
    }"#;
    let response = AssessmentResponse::parse(raw).unwrap();
    let report = api.build_from_response(&response, 10, generated_at).unwrap();

    // 出现的块透传
    assert_eq!(report.domains.motor.score, 85.0);
    assert_eq!(report.domains.cognitive.status, AssessmentStatus::Emerging);
    // cognitive 块缺少 score → 中性分数
    assert_eq!(report.domains.cognitive.score, NEUTRAL_SCORE);

    // 缺失的块整体取中性默认值
    assert_eq!(report.domains.language.status, AssessmentStatus::Unknown);
    assert_eq!(report.domains.social.score, NEUTRAL_SCORE);

    // 总体字段: overallScore 缺失 → 中性分数；其余透传
    assert_eq!(report.overall_score, NEUTRAL_SCORE);
    assert_eq!(report.overall_status, AssessmentStatus::OnTrack);
    assert_eq!(report.summary.as_deref(), Some("Developing well overall."));
    assert_eq!(report.personalized_tips.len(), 1);
    assert_eq!(report.generated_at, generated_at);

    // 评估集合覆盖且仅覆盖四个评估领域
    for domain in DevelopmentDomain::ASSESSED {
        assert!(report.domains.get(domain).is_some());
    }
    assert!(report.domains.get(DevelopmentDomain::Sensory).is_none());
    assert_eq!(report.domains.iter().count(), 4);
}

// ==========================================
// 测试用例 5: 无法解析的响应对该次请求致命
// ==========================================

#[test]
fn test_unparseable_response_is_provider_error() {
    let api = AssessmentApi::new();

    let result = api.build_domain_assessments("sorry, I could not generate JSON today", 10);
    assert!(matches!(
        result,
        Err(ApiError::AssessmentProvider(ProviderError::UnparseableResponse { .. }))
    ));

    let result = api.build_domain_assessments("", 10);
    assert!(matches!(
        result,
        Err(ApiError::AssessmentProvider(ProviderError::EmptyResponse))
    ));
}

// ==========================================
// 测试用例 6: 输入校验先于解析
// ==========================================

#[test]
fn test_age_validated_before_parse() {
    let api = AssessmentApi::new();

    // 月龄越界时即使响应合法也同步拒绝
    let result = api.build_domain_assessments("{}", 500);
    assert!(matches!(result, Err(ApiError::FieldValueError { .. })));
}

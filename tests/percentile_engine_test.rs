// ==========================================
// PercentileEngine 引擎集成测试
// ==========================================
// 测试目标: 验证百分位计算与解读档位
// 覆盖范围: 中位数=50 / 单调性 / 输出边界 / 查表端点收敛 / 头围
// ==========================================

use growth_compass::domain::types::{GrowthInterpretation, GrowthMetric, Sex};
use growth_compass::engine::PercentileEngine;
use growth_compass::reference::growth_standard;

// ==========================================
// 测试用例 1: 中位数测量值恒为第 50 百分位
// ==========================================

#[test]
fn test_median_value_maps_to_fiftieth_percentile() {
    let engine = PercentileEngine::new();
    let metrics = [
        GrowthMetric::Weight,
        GrowthMetric::Height,
        GrowthMetric::HeadCircumference,
    ];
    let sexes = [Sex::Male, Sex::Female, Sex::Other];
    let ages: [u32; 7] = [0, 3, 6, 12, 18, 24, 36];

    for metric in metrics {
        for sex in sexes {
            for age_months in ages {
                let median = growth_standard::median(metric, sex, age_months);
                let percentile = engine.percentile(metric, median, age_months, sex);
                assert_eq!(
                    percentile, 50.0,
                    "中位数应映射到 50.0: {} {} {}个月",
                    metric, sex, age_months
                );
            }
        }
    }
}

// ==========================================
// 测试用例 2: 百分位对测量值单调不减
// ==========================================

#[test]
fn test_percentile_monotonic_in_value() {
    let engine = PercentileEngine::new();

    let mut previous = 0.0;
    let mut value = 2.0;
    while value <= 25.0 {
        let percentile = engine.percentile(GrowthMetric::Weight, value, 12, Sex::Male);
        assert!(
            percentile >= previous,
            "单调性被破坏: value={} percentile={} previous={}",
            value,
            percentile,
            previous
        );
        previous = percentile;
        value += 0.1;
    }
}

// ==========================================
// 测试用例 3: 输出始终落在 [0.1, 99.9]
// ==========================================

#[test]
fn test_percentile_bounds_under_extreme_values() {
    let engine = PercentileEngine::new();

    for value in [0.0001, 0.3, 1.0, 9.6, 100.0, 10_000.0] {
        let percentile = engine.percentile(GrowthMetric::Weight, value, 12, Sex::Male);
        assert!((0.1..=99.9).contains(&percentile), "越界: {}", percentile);
    }

    assert_eq!(
        engine.percentile(GrowthMetric::Weight, 0.0001, 12, Sex::Male),
        0.1
    );
    assert_eq!(
        engine.percentile(GrowthMetric::Weight, 10_000.0, 12, Sex::Male),
        99.9
    );
}

// ==========================================
// 测试用例 4: 具体场景: 12 月龄男童体重 9.6kg
// ==========================================

#[test]
fn test_scenario_twelve_month_male_median_weight() {
    let engine = PercentileEngine::new();

    let percentile = engine.percentile(GrowthMetric::Weight, 9.6, 12, Sex::Male);
    assert_eq!(percentile, 50.0);

    let interpretation = engine.interpret(percentile);
    assert_eq!(interpretation, GrowthInterpretation::WithinTypical);
    assert_eq!(interpretation.text(), "within typical range");
}

// ==========================================
// 测试用例 5: 超表月龄收敛到表端点
// ==========================================

#[test]
fn test_age_beyond_table_clamps_not_extrapolates() {
    let engine = PercentileEngine::new();

    let at_table_end = engine.percentile(GrowthMetric::Weight, 18.0, 60, Sex::Female);
    let beyond_table = engine.percentile(GrowthMetric::Weight, 18.0, 180, Sex::Female);
    assert_eq!(at_table_end, beyond_table);
}

// ==========================================
// 测试用例 6: 解读档位边界
// ==========================================

#[test]
fn test_interpretation_band_boundaries() {
    let engine = PercentileEngine::new();

    assert_eq!(engine.interpret(2.9), GrowthInterpretation::BelowTypical);
    assert_eq!(engine.interpret(3.0), GrowthInterpretation::LowerTypical);
    assert_eq!(engine.interpret(14.9), GrowthInterpretation::LowerTypical);
    assert_eq!(engine.interpret(15.0), GrowthInterpretation::WithinTypical);
    assert_eq!(engine.interpret(84.9), GrowthInterpretation::WithinTypical);
    assert_eq!(engine.interpret(85.0), GrowthInterpretation::UpperTypical);
    assert_eq!(engine.interpret(96.9), GrowthInterpretation::UpperTypical);
    assert_eq!(engine.interpret(97.0), GrowthInterpretation::AboveTypical);
}

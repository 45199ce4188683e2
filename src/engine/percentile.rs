// ==========================================
// 儿童成长发育评估引擎 - 百分位计算引擎
// ==========================================
// 依据: Growth_Engine_Design_v0.2.md - 1.2 Percentile Engine
// 红线: logistic 近似模型，输出不得当作临床精确值
// ==========================================
// 职责: 测量值 → 参考百分位 + 解读档位
// 输入: (metric, value, age_months, sex)
// 输出: 百分位 [0.1, 99.9]，保留一位小数
// ==========================================

use crate::domain::profile::GrowthAssessment;
use crate::domain::types::{GrowthInterpretation, GrowthMetric, Sex};
use crate::reference::growth_standard;
use tracing::instrument;

// z 值收敛边界（算法收敛，不是错误恢复）
const Z_CLAMP: f64 = 4.0;

// logistic 陡度系数，近似正态累积分布
const LOGISTIC_SLOPE: f64 = 1.7;

// 百分位输出边界
const PERCENTILE_FLOOR: f64 = 0.1;
const PERCENTILE_CEIL: f64 = 99.9;

// ==========================================
// PercentileEngine - 百分位计算引擎
// ==========================================
// 纯函数计算，可并发调用，无需同步
#[derive(Debug, Default)]
pub struct PercentileEngine;

impl PercentileEngine {
    /// 创建新的百分位计算引擎
    pub fn new() -> Self {
        Self
    }

    /// 计算测量值的参考百分位
    ///
    /// 算法（顺序执行）:
    /// 1) 查表取 (metric, sex) 在 age_months 处的中位数（最近两点线性插值，超表收敛）
    /// 2) sd = median * relative_sd[metric]
    /// 3) z = clamp((value - median) / sd, -4, 4)
    /// 4) percentile = clamp(100 / (1 + e^(-1.7z)), 0.1, 99.9)，保留一位小数
    #[instrument(skip(self))]
    pub fn percentile(&self, metric: GrowthMetric, value: f64, age_months: u32, sex: Sex) -> f64 {
        let median = growth_standard::median(metric, sex, age_months);
        let sd = median * metric.relative_sd();

        let z = ((value - median) / sd).clamp(-Z_CLAMP, Z_CLAMP);
        let percentile = 100.0 / (1.0 + (-LOGISTIC_SLOPE * z).exp());

        round_one_decimal(percentile.clamp(PERCENTILE_FLOOR, PERCENTILE_CEIL))
    }

    /// 百分位 → 解读档位
    ///
    /// 档位（顺序判定，命中即返回）:
    /// - < 3  → BelowTypical
    /// - < 15 → LowerTypical
    /// - < 85 → WithinTypical
    /// - < 97 → UpperTypical
    /// - 其他 → AboveTypical
    pub fn interpret(&self, percentile: f64) -> GrowthInterpretation {
        if percentile < 3.0 {
            GrowthInterpretation::BelowTypical
        } else if percentile < 15.0 {
            GrowthInterpretation::LowerTypical
        } else if percentile < 85.0 {
            GrowthInterpretation::WithinTypical
        } else if percentile < 97.0 {
            GrowthInterpretation::UpperTypical
        } else {
            GrowthInterpretation::AboveTypical
        }
    }

    /// 单指标完整评估（百分位 + 解读）
    pub fn assess(
        &self,
        metric: GrowthMetric,
        value: f64,
        age_months: u32,
        sex: Sex,
    ) -> GrowthAssessment {
        let percentile = self.percentile(metric, value, age_months, sex);
        let interpretation = self.interpret(percentile);

        GrowthAssessment {
            metric,
            value,
            percentile,
            interpretation,
            interpretation_text: interpretation.text(),
        }
    }
}

/// 保留一位小数
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_value_is_fiftieth_percentile() {
        let engine = PercentileEngine::new();
        // z = 0 → logistic 中点
        assert_eq!(engine.percentile(GrowthMetric::Weight, 9.6, 12, Sex::Male), 50.0);
    }

    #[test]
    fn test_interpret_bands() {
        let engine = PercentileEngine::new();
        assert_eq!(engine.interpret(1.0), GrowthInterpretation::BelowTypical);
        assert_eq!(engine.interpret(3.0), GrowthInterpretation::LowerTypical);
        assert_eq!(engine.interpret(50.0), GrowthInterpretation::WithinTypical);
        assert_eq!(engine.interpret(85.0), GrowthInterpretation::UpperTypical);
        assert_eq!(engine.interpret(97.0), GrowthInterpretation::AboveTypical);
    }

    #[test]
    fn test_extreme_values_stay_in_bounds() {
        let engine = PercentileEngine::new();
        let low = engine.percentile(GrowthMetric::Weight, 0.01, 12, Sex::Male);
        let high = engine.percentile(GrowthMetric::Weight, 500.0, 12, Sex::Male);
        assert_eq!(low, 0.1);
        assert_eq!(high, 99.9);
    }
}

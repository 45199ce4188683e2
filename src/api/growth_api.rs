// ==========================================
// 儿童成长发育评估引擎 - 生长评估 API
// ==========================================
// 依据: Growth_Engine_Design_v0.2.md - 6.3 对外接口
// ==========================================
// 职责: 生长档案 → 各适用指标的百分位评估
// 约束: 头围仅在月龄 < 36 且提供测量值时评估，否则从结果集中省略
// ==========================================

use crate::api::error::{validate_age_months, validate_measurement, ApiResult};
use crate::domain::profile::{GrowthAssessment, GrowthProfile};
use crate::domain::types::GrowthMetric;
use crate::engine::percentile::PercentileEngine;
use crate::reference::growth_standard::HEAD_CIRCUMFERENCE_AGE_LIMIT_MONTHS;
use tracing::instrument;

// 测量值合理区间（儿科口径）
pub const WEIGHT_RANGE_KG: (f64, f64) = (0.3, 150.0);
pub const HEIGHT_RANGE_CM: (f64, f64) = (30.0, 220.0);
pub const HEAD_CIRCUMFERENCE_RANGE_CM: (f64, f64) = (25.0, 60.0);

// ==========================================
// GrowthApi - 生长评估 API
// ==========================================
#[derive(Debug, Default)]
pub struct GrowthApi {
    engine: PercentileEngine,
}

impl GrowthApi {
    /// 创建新的生长评估 API
    pub fn new() -> Self {
        Self {
            engine: PercentileEngine::new(),
        }
    }

    /// 计算档案内各适用指标的百分位评估
    ///
    /// 顺序:
    /// 1) 同步校验全部输入（任何查表之前）
    /// 2) 体重、身高逐项评估
    /// 3) 头围仅在月龄 < 36 且有测量值时评估，否则省略
    #[instrument(skip(self, profile), fields(age_months = profile.age_months, sex = %profile.sex))]
    pub fn get_growth_percentiles(&self, profile: &GrowthProfile) -> ApiResult<Vec<GrowthAssessment>> {
        self.validate_profile(profile)?;

        let mut assessments = vec![
            self.engine.assess(
                GrowthMetric::Weight,
                profile.weight_kg,
                profile.age_months,
                profile.sex,
            ),
            self.engine.assess(
                GrowthMetric::Height,
                profile.height_cm,
                profile.age_months,
                profile.sex,
            ),
        ];

        if profile.age_months < HEAD_CIRCUMFERENCE_AGE_LIMIT_MONTHS {
            if let Some(head_circumference_cm) = profile.head_circumference_cm {
                assessments.push(self.engine.assess(
                    GrowthMetric::HeadCircumference,
                    head_circumference_cm,
                    profile.age_months,
                    profile.sex,
                ));
            }
        }

        Ok(assessments)
    }

    /// 档案整体校验
    ///
    /// 头围测量值即使因月龄 ≥ 36 不参与评估，仍要求取值合理
    fn validate_profile(&self, profile: &GrowthProfile) -> ApiResult<()> {
        validate_age_months(profile.age_months)?;
        validate_measurement("weight_kg", profile.weight_kg, WEIGHT_RANGE_KG.0, WEIGHT_RANGE_KG.1)?;
        validate_measurement("height_cm", profile.height_cm, HEIGHT_RANGE_CM.0, HEIGHT_RANGE_CM.1)?;
        if let Some(head_circumference_cm) = profile.head_circumference_cm {
            validate_measurement(
                "head_circumference_cm",
                head_circumference_cm,
                HEAD_CIRCUMFERENCE_RANGE_CM.0,
                HEAD_CIRCUMFERENCE_RANGE_CM.1,
            )?;
        }
        Ok(())
    }
}

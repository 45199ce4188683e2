// ==========================================
// 儿童成长发育评估引擎 - 生长档案领域模型
// ==========================================
// 依据: Growth_Engine_Design_v0.2.md - 1. 生长档案与百分位
// ==========================================

use crate::domain::types::{GrowthInterpretation, GrowthMetric, Sex};
use serde::{Deserialize, Serialize};

// ==========================================
// GrowthProfile - 生长档案
// ==========================================
// 用途: 调用方临时持有，本引擎不落库
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthProfile {
    pub age_months: u32,                     // 月龄
    pub sex: Sex,                            // 性别
    pub weight_kg: f64,                      // 体重（kg）
    pub height_cm: f64,                      // 身高（cm）
    pub head_circumference_cm: Option<f64>,  // 头围（cm，3 岁以下测量）
}

// ==========================================
// GrowthAssessment - 单指标生长评估结果
// ==========================================
// 派生数据，按次计算，不持久化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthAssessment {
    pub metric: GrowthMetric,                    // 指标
    pub value: f64,                              // 测量值
    pub percentile: f64,                         // 百分位（0.1 ~ 99.9）
    pub interpretation: GrowthInterpretation,    // 解读档位
    pub interpretation_text: String,             // 本地化解读文案
}

// ==========================================
// 儿童成长发育评估引擎 - 生长标准参考曲线
// ==========================================
// 依据: Growth_Engine_Design_v0.2.md - 1.1 生长标准表
// 数据来源: WHO 儿童生长标准中位数简化表（近似值，非临床精度）
// ==========================================
// 约束:
// - 查询月龄超出表范围时收敛到最近的表端点，不外推
// - Sex::Other 取男女中位数的均值
// ==========================================

use crate::domain::types::{GrowthMetric, Sex};

/// 头围仅在该月龄以下评估（超过后从结果集中省略，不取默认值）
pub const HEAD_CIRCUMFERENCE_AGE_LIMIT_MONTHS: u32 = 36;

// ==========================================
// GrowthCurvePoint - 曲线表点
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthCurvePoint {
    pub age_months: u32,
    pub median: f64,
}

// 表构造简写
const fn pt(age_months: u32, median: f64) -> GrowthCurvePoint {
    GrowthCurvePoint { age_months, median }
}

// ==========================================
// 体重中位数表 (kg)
// ==========================================
const WEIGHT_MALE: &[GrowthCurvePoint] = &[
    pt(0, 3.3),
    pt(1, 4.5),
    pt(2, 5.6),
    pt(3, 6.4),
    pt(4, 7.0),
    pt(5, 7.5),
    pt(6, 7.9),
    pt(7, 8.3),
    pt(8, 8.6),
    pt(9, 8.9),
    pt(10, 9.2),
    pt(11, 9.4),
    pt(12, 9.6),
    pt(15, 10.3),
    pt(18, 10.9),
    pt(21, 11.5),
    pt(24, 12.2),
    pt(30, 13.3),
    pt(36, 14.3),
    pt(48, 16.3),
    pt(60, 18.3),
];

const WEIGHT_FEMALE: &[GrowthCurvePoint] = &[
    pt(0, 3.2),
    pt(1, 4.2),
    pt(2, 5.1),
    pt(3, 5.8),
    pt(4, 6.4),
    pt(5, 6.9),
    pt(6, 7.3),
    pt(7, 7.6),
    pt(8, 7.9),
    pt(9, 8.2),
    pt(10, 8.5),
    pt(11, 8.7),
    pt(12, 8.9),
    pt(15, 9.6),
    pt(18, 10.2),
    pt(21, 10.9),
    pt(24, 11.5),
    pt(30, 12.7),
    pt(36, 13.9),
    pt(48, 16.1),
    pt(60, 18.2),
];

// ==========================================
// 身高中位数表 (cm)
// ==========================================
const HEIGHT_MALE: &[GrowthCurvePoint] = &[
    pt(0, 49.9),
    pt(1, 54.7),
    pt(2, 58.4),
    pt(3, 61.4),
    pt(4, 63.9),
    pt(5, 65.9),
    pt(6, 67.6),
    pt(7, 69.2),
    pt(8, 70.6),
    pt(9, 72.0),
    pt(10, 73.3),
    pt(11, 74.5),
    pt(12, 75.7),
    pt(15, 79.1),
    pt(18, 82.3),
    pt(21, 85.1),
    pt(24, 87.8),
    pt(30, 91.9),
    pt(36, 96.1),
    pt(48, 103.3),
    pt(60, 110.0),
];

const HEIGHT_FEMALE: &[GrowthCurvePoint] = &[
    pt(0, 49.1),
    pt(1, 53.7),
    pt(2, 57.1),
    pt(3, 59.8),
    pt(4, 62.1),
    pt(5, 64.0),
    pt(6, 65.7),
    pt(7, 67.3),
    pt(8, 68.7),
    pt(9, 70.1),
    pt(10, 71.5),
    pt(11, 72.8),
    pt(12, 74.0),
    pt(15, 77.5),
    pt(18, 80.7),
    pt(21, 83.7),
    pt(24, 86.4),
    pt(30, 90.7),
    pt(36, 95.1),
    pt(48, 102.7),
    pt(60, 109.4),
];

// ==========================================
// 头围中位数表 (cm)
// ==========================================
// 头围仅跟踪到 36 月龄
const HEAD_MALE: &[GrowthCurvePoint] = &[
    pt(0, 34.5),
    pt(1, 37.3),
    pt(2, 39.1),
    pt(3, 40.5),
    pt(4, 41.6),
    pt(5, 42.6),
    pt(6, 43.3),
    pt(7, 44.0),
    pt(8, 44.5),
    pt(9, 45.0),
    pt(10, 45.4),
    pt(11, 45.8),
    pt(12, 46.1),
    pt(15, 46.8),
    pt(18, 47.4),
    pt(21, 47.8),
    pt(24, 48.3),
    pt(30, 48.9),
    pt(36, 49.5),
];

const HEAD_FEMALE: &[GrowthCurvePoint] = &[
    pt(0, 33.9),
    pt(1, 36.5),
    pt(2, 38.3),
    pt(3, 39.5),
    pt(4, 40.6),
    pt(5, 41.5),
    pt(6, 42.2),
    pt(7, 42.8),
    pt(8, 43.4),
    pt(9, 43.8),
    pt(10, 44.2),
    pt(11, 44.6),
    pt(12, 44.9),
    pt(15, 45.7),
    pt(18, 46.2),
    pt(21, 46.7),
    pt(24, 47.2),
    pt(30, 47.9),
    pt(36, 48.5),
];

/// 取指标×性别对应的曲线表
fn curve(metric: GrowthMetric, sex_table: Sex) -> &'static [GrowthCurvePoint] {
    match (metric, sex_table) {
        (GrowthMetric::Weight, Sex::Female) => WEIGHT_FEMALE,
        (GrowthMetric::Weight, _) => WEIGHT_MALE,
        (GrowthMetric::Height, Sex::Female) => HEIGHT_FEMALE,
        (GrowthMetric::Height, _) => HEIGHT_MALE,
        (GrowthMetric::HeadCircumference, Sex::Female) => HEAD_FEMALE,
        (GrowthMetric::HeadCircumference, _) => HEAD_MALE,
    }
}

/// 在单张曲线表内做最近两点线性插值
///
/// 边界处理:
/// - age ≤ 表首月龄 → 表首中位数
/// - age ≥ 表尾月龄 → 表尾中位数（收敛，不外推）
fn interpolate(table: &[GrowthCurvePoint], age_months: u32) -> f64 {
    let first = table[0];
    let last = table[table.len() - 1];
    if age_months <= first.age_months {
        return first.median;
    }
    if age_months >= last.age_months {
        return last.median;
    }

    // 定位包含 age 的相邻两点
    for pair in table.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if age_months >= lo.age_months && age_months <= hi.age_months {
            if age_months == lo.age_months {
                return lo.median;
            }
            let span = (hi.age_months - lo.age_months) as f64;
            let offset = (age_months - lo.age_months) as f64;
            return lo.median + (hi.median - lo.median) * (offset / span);
        }
    }

    // 表按月龄升序排列时不可达
    last.median
}

/// 查询 (metric, sex, age) 的参考中位数
///
/// Sex::Other 取男女中位数的均值
pub fn median(metric: GrowthMetric, sex: Sex, age_months: u32) -> f64 {
    match sex {
        Sex::Male | Sex::Female => interpolate(curve(metric, sex), age_months),
        Sex::Other => {
            let m = interpolate(curve(metric, Sex::Male), age_months);
            let f = interpolate(curve(metric, Sex::Female), age_months);
            (m + f) / 2.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_sorted_by_age() {
        for table in [
            WEIGHT_MALE,
            WEIGHT_FEMALE,
            HEIGHT_MALE,
            HEIGHT_FEMALE,
            HEAD_MALE,
            HEAD_FEMALE,
        ] {
            for pair in table.windows(2) {
                assert!(pair[0].age_months < pair[1].age_months);
            }
        }
    }

    #[test]
    fn test_exact_row_lookup() {
        assert_eq!(median(GrowthMetric::Weight, Sex::Male, 12), 9.6);
        assert_eq!(median(GrowthMetric::Height, Sex::Female, 6), 65.7);
    }

    #[test]
    fn test_interpolated_lookup() {
        // 13 月龄在 12 (9.6) 与 15 (10.3) 之间
        let m = median(GrowthMetric::Weight, Sex::Male, 13);
        assert!(m > 9.6 && m < 10.3);
    }

    #[test]
    fn test_age_clamps_to_table_ends() {
        assert_eq!(
            median(GrowthMetric::Weight, Sex::Male, 300),
            median(GrowthMetric::Weight, Sex::Male, 60)
        );
        assert_eq!(
            median(GrowthMetric::HeadCircumference, Sex::Female, 48),
            median(GrowthMetric::HeadCircumference, Sex::Female, 36)
        );
    }

    #[test]
    fn test_other_sex_is_midpoint() {
        let m = median(GrowthMetric::Weight, Sex::Male, 12);
        let f = median(GrowthMetric::Weight, Sex::Female, 12);
        assert_eq!(median(GrowthMetric::Weight, Sex::Other, 12), (m + f) / 2.0);
    }
}

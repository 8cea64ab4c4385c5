//! # 标定曲线拟合
//!
//! 对标准蛋白的 (K, Rg) 做 log10(Rg) = slope * K + intercept 的普通最小二乘拟合，
//! 并以 Pearson 相关系数的平方报告拟合优度 R²。
//!
//! ## 依赖关系
//! - 被 `commands/estimate.rs` 调用
//! - 被 `sec/plot.rs`, `sec/export.rs` 使用 CalibrationModel

use crate::error::{Result, SizerError};

/// 标定模型
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationModel {
    /// log10(Rg) 对 K 的斜率
    pub slope: f64,
    /// 截距
    pub intercept: f64,
    /// 拟合优度 (Pearson r 的平方)；标准品 Rg 全部相同时无定义
    pub r_squared: Option<f64>,
    /// 参与拟合的点数
    pub points: usize,
    /// 标准品 K 的最小值
    pub partition_min: f64,
    /// 标准品 K 的最大值
    pub partition_max: f64,
}

impl CalibrationModel {
    /// 由分配系数估计回转半径
    pub fn estimate_rg(&self, partition: f64) -> f64 {
        estimate_rg(partition, self.slope, self.intercept)
    }

    /// K 是否落在标准品覆盖范围之外（外推）
    pub fn is_extrapolation(&self, partition: f64) -> bool {
        partition < self.partition_min || partition > self.partition_max
    }

    /// R² 低于阈值或无定义
    pub fn is_poor_fit(&self, min_r_squared: f64) -> bool {
        self.r_squared.map_or(true, |r| r < min_r_squared)
    }
}

/// 拟合 K 与 log10(Rg) 的线性关系
///
/// 输入为 `(partition, radius_of_gyration)` 点列。至少需要两个 K 不同的点。
/// Rg 全部相同时斜率为 0，R² 无定义。
pub fn fit(points: &[(f64, f64)]) -> Result<CalibrationModel> {
    for &(k, rg) in points {
        if !k.is_finite() {
            return Err(SizerError::InvalidData(format!(
                "partition coefficient {} is not a finite number",
                k
            )));
        }
        if !rg.is_finite() || rg <= 0.0 {
            return Err(SizerError::InvalidData(format!(
                "radius of gyration must be positive, got {}",
                rg
            )));
        }
    }

    if points.len() < 2 {
        return Err(SizerError::InsufficientData(format!(
            "at least 2 standards are required, got {}",
            points.len()
        )));
    }

    let (first_k, first_rg) = points[0];
    if points.iter().all(|&(k, _)| k == first_k) {
        return Err(SizerError::InsufficientData(
            "all standards share the same partition coefficient".to_string(),
        ));
    }
    let flat = points.iter().all(|&(_, rg)| rg == first_rg);

    let transformed: Vec<(f64, f64)> = points.iter().map(|&(k, rg)| (k, rg.log10())).collect();
    let n = transformed.len() as f64;

    // 先求均值，再在中心化数据上累加，减小舍入误差
    let mean_x = transformed.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = transformed.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (x, y) in &transformed {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    if sxx <= 0.0 {
        return Err(SizerError::InsufficientData(
            "standards do not span a usable partition range".to_string(),
        ));
    }

    // 相关系数在 Rg 全部相同时无定义
    let (slope, intercept, r_squared) = if flat || syy <= 0.0 {
        (0.0, first_rg.log10(), None)
    } else {
        let slope = sxy / sxx;
        let r = sxy / (sxx.sqrt() * syy.sqrt());
        (slope, mean_y - slope * mean_x, Some((r * r).min(1.0)))
    };

    let partition_min = transformed.iter().map(|(x, _)| *x).fold(f64::INFINITY, f64::min);
    let partition_max = transformed
        .iter()
        .map(|(x, _)| *x)
        .fold(f64::NEG_INFINITY, f64::max);

    Ok(CalibrationModel {
        slope,
        intercept,
        r_squared,
        points: transformed.len(),
        partition_min,
        partition_max,
    })
}

/// 标定曲线的逆变换：Rg = 10^(slope * K + intercept)
pub fn estimate_rg(partition: f64, slope: f64, intercept: f64) -> f64 {
    10f64.powf(slope * partition + intercept)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64, tol: f64) {
        assert!((a - b).abs() < tol, "{} != {} (tol {})", a, b, tol);
    }

    #[test]
    fn test_fit_exact_line() {
        // log10(rg) = 2K + 1
        let points = [(0.0, 10.0), (0.5, 100.0), (1.0, 1000.0)];
        let model = fit(&points).unwrap();
        assert_close(model.slope, 2.0, 1e-10);
        assert_close(model.intercept, 1.0, 1e-10);
        assert_close(model.r_squared.unwrap(), 1.0, 1e-12);
        assert_eq!(model.points, 3);
        assert_eq!(model.partition_min, 0.0);
        assert_eq!(model.partition_max, 1.0);
    }

    #[test]
    fn test_fit_descending_standards() {
        // 真实 SEC：K 越大分子越小，斜率为负
        let points: Vec<(f64, f64)> = [0.1, 0.25, 0.4, 0.55, 0.7]
            .iter()
            .map(|&k| (k, 10f64.powf(-1.5 * k + 1.8)))
            .collect();
        let model = fit(&points).unwrap();
        assert_close(model.slope, -1.5, 1e-10);
        assert_close(model.intercept, 1.8, 1e-10);
        assert_close(model.r_squared.unwrap(), 1.0, 1e-12);
    }

    #[test]
    fn test_fit_noisy_r_squared_below_one() {
        let points = [(0.1, 40.0), (0.3, 20.0), (0.5, 25.0), (0.7, 12.0)];
        let model = fit(&points).unwrap();
        assert!(model.slope < 0.0);
        let r_squared = model.r_squared.unwrap();
        assert!(r_squared > 0.0 && r_squared < 1.0);
        assert!(model.is_poor_fit(0.99));
        assert!(!model.is_poor_fit(0.1));
    }

    #[test]
    fn test_fit_insufficient_data() {
        assert!(matches!(
            fit(&[]).unwrap_err(),
            SizerError::InsufficientData(_)
        ));
        assert!(matches!(
            fit(&[(0.3, 20.0)]).unwrap_err(),
            SizerError::InsufficientData(_)
        ));
        assert!(matches!(
            fit(&[(0.3, 20.0), (0.3, 30.0), (0.3, 25.0)]).unwrap_err(),
            SizerError::InsufficientData(_)
        ));
    }

    #[test]
    fn test_fit_shared_rg_has_undefined_r_squared() {
        let model = fit(&[(0.2, 25.0), (0.4, 25.0), (0.6, 25.0)]).unwrap();
        assert_eq!(model.slope, 0.0);
        assert_close(model.intercept, 25f64.log10(), 1e-12);
        assert_eq!(model.r_squared, None);
        assert!(model.is_poor_fit(0.0));
        assert_close(model.estimate_rg(0.9), 25.0, 1e-9);
    }

    #[test]
    fn test_fit_rejects_non_positive_rg() {
        assert!(matches!(
            fit(&[(0.1, 20.0), (0.5, 0.0)]).unwrap_err(),
            SizerError::InvalidData(_)
        ));
        assert!(matches!(
            fit(&[(0.1, -3.0), (0.5, 10.0)]).unwrap_err(),
            SizerError::InvalidData(_)
        ));
    }

    #[test]
    fn test_estimate_rg_inverts_model() {
        let (slope, intercept) = (-1.2, 1.7);
        for k in [-0.2, 0.0, 0.33, 0.8, 1.4] {
            let rg = 10f64.powf(slope * k + intercept);
            assert_close(estimate_rg(k, slope, intercept), rg, 1e-9);
        }
    }

    #[test]
    fn test_extrapolation_flag() {
        let model = fit(&[(0.2, 30.0), (0.6, 15.0)]).unwrap();
        assert!(!model.is_extrapolation(0.2));
        assert!(!model.is_extrapolation(0.45));
        assert!(model.is_extrapolation(0.1));
        assert!(model.is_extrapolation(0.9));
        assert_close(model.estimate_rg(0.2), 30.0, 1e-9);
    }
}

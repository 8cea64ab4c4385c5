//! # 分配系数计算
//!
//! K = (Ve - V0) / (Vt - V0)
//!
//! K 不做截断：超出 [0, 1] 的值会原样传递，由拟合质量 (R²) 暴露异常标定数据。

use crate::error::{Result, SizerError};

/// 由洗脱体积计算分配系数
pub fn partition(elution: f64, void: f64, total: f64) -> Result<f64> {
    let span = total - void;
    if span == 0.0 {
        return Err(SizerError::ConfigurationError(format!(
            "total volume equals void volume ({})",
            void
        )));
    }
    Ok((elution - void) / span)
}

/// K 是否位于物理有意义的区间 [0, 1]
pub fn is_physical(k: f64) -> bool {
    (0.0..=1.0).contains(&k)
}

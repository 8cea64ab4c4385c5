//! # 色谱柱参数
//!
//! 空体积 (void) 与总体积 (total)，由 `parameter,elution` 表读入。
//!
//! ## 依赖关系
//! - 被 `commands/estimate.rs` 使用
//! - 分配系数由 `sec/partition.rs` 以这里的体积计算

use crate::error::{Result, SizerError};
use crate::models::ColumnParameterRow;

/// 色谱柱参数，保证 total > void > 0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnParameters {
    void: f64,
    total: f64,
}

impl ColumnParameters {
    pub fn new(void: f64, total: f64) -> Result<Self> {
        if !void.is_finite() || !total.is_finite() {
            return Err(SizerError::ConfigurationError(
                "void and total volumes must be finite numbers".to_string(),
            ));
        }
        if void <= 0.0 {
            return Err(SizerError::ConfigurationError(format!(
                "void volume must be positive, got {}",
                void
            )));
        }
        if total <= void {
            return Err(SizerError::ConfigurationError(format!(
                "total volume ({}) must exceed void volume ({})",
                total, void
            )));
        }
        Ok(ColumnParameters { void, total })
    }

    /// 从参数表的行构建
    ///
    /// 返回参数与被忽略的未知键列表。
    pub fn from_rows(rows: &[ColumnParameterRow]) -> Result<(Self, Vec<String>)> {
        let mut void = None;
        let mut total = None;
        let mut unknown = Vec::new();

        for row in rows {
            let key = row.parameter.trim().to_lowercase();
            let slot = match key.as_str() {
                "void" => &mut void,
                "total" => &mut total,
                _ => {
                    unknown.push(row.parameter.clone());
                    continue;
                }
            };
            if slot.is_some() {
                return Err(SizerError::ConfigurationError(format!(
                    "parameter '{}' is given more than once",
                    key
                )));
            }
            *slot = Some(row.elution);
        }

        let void = void.ok_or_else(|| {
            SizerError::ConfigurationError("missing 'void' parameter".to_string())
        })?;
        let total = total.ok_or_else(|| {
            SizerError::ConfigurationError("missing 'total' parameter".to_string())
        })?;

        Ok((ColumnParameters::new(void, total)?, unknown))
    }

    pub fn void(&self) -> f64 {
        self.void
    }

    pub fn total(&self) -> f64 {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(parameter: &str, elution: f64) -> ColumnParameterRow {
        ColumnParameterRow {
            parameter: parameter.to_string(),
            elution,
        }
    }

    #[test]
    fn test_from_rows() {
        let rows = vec![row("Void", 8.0), row(" total ", 20.0), row("flow", 0.5)];
        let (column, unknown) = ColumnParameters::from_rows(&rows).unwrap();
        assert_eq!(column.void(), 8.0);
        assert_eq!(column.total(), 20.0);
        assert_eq!(unknown, vec!["flow".to_string()]);
    }

    #[test]
    fn test_missing_keys() {
        let err = ColumnParameters::from_rows(&[row("void", 8.0)]).unwrap_err();
        assert!(err.to_string().contains("total"));
        let err = ColumnParameters::from_rows(&[row("total", 20.0)]).unwrap_err();
        assert!(err.to_string().contains("void"));
    }

    #[test]
    fn test_duplicate_key() {
        let rows = vec![row("void", 8.0), row("VOID", 8.5), row("total", 20.0)];
        assert!(matches!(
            ColumnParameters::from_rows(&rows).unwrap_err(),
            SizerError::ConfigurationError(_)
        ));
    }

    #[test]
    fn test_invalid_volumes() {
        assert!(ColumnParameters::new(8.0, 8.0).is_err());
        assert!(ColumnParameters::new(20.0, 8.0).is_err());
        assert!(ColumnParameters::new(0.0, 8.0).is_err());
        assert!(ColumnParameters::new(-1.0, 8.0).is_err());
        assert!(ColumnParameters::new(f64::NAN, 8.0).is_err());
    }
}

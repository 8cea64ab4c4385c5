//! # CSV 表格读取
//!
//! 按列名反序列化为 `models/records.rs` 中的行类型，列顺序无关，多余列忽略。
//!
//! ## 依赖关系
//! - 被 `commands/estimate.rs` 调用
//! - 使用 `csv` + `serde` 反序列化

use crate::error::{Result, SizerError};
use crate::models::{ColumnParameterRow, SampleElutionRow, SampleStructureRow, StandardRow};

use serde::de::DeserializeOwned;
use std::path::Path;

/// 读取任意行类型的 CSV 表
pub fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.is_file() {
        return Err(SizerError::FileReadError {
            path: path.display().to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        });
    }

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut rows = Vec::new();
    for (i, record) in rdr.deserialize::<T>().enumerate() {
        let row = record.map_err(|e| {
            let location = match e.position() {
                Some(pos) => format!("line {}", pos.line()),
                None => format!("record {}", i + 1),
            };
            SizerError::TableError {
                path: path.display().to_string(),
                reason: format!("{}: {}", location, e),
            }
        })?;
        rows.push(row);
    }

    Ok(rows)
}

/// 标准品表
pub fn read_standards(path: &Path) -> Result<Vec<StandardRow>> {
    read_table(path)
}

/// 样品洗脱表
pub fn read_sample_elutions(path: &Path) -> Result<Vec<SampleElutionRow>> {
    read_table(path)
}

/// 样品结构表
pub fn read_sample_structures(path: &Path) -> Result<Vec<SampleStructureRow>> {
    read_table(path)
}

/// 色谱柱参数表
pub fn read_column_parameters(path: &Path) -> Result<Vec<ColumnParameterRow>> {
    read_table(path)
}

//! # 结果表导出
//!
//! 将标准品、样品结构、样品洗脱和标定参数写入 CSV。
//!
//! ## 输出列
//! - standards.csv: structure, elution, radius_gyration, partition, note
//! - sample_structures.csv: structure, oligomer, radius_gyration, note
//! - sample_elutions.csv: elution, partition, radius_gyration, closest_oligomer, note
//! - calibration.csv: slope, intercept, r_squared, points, partition_min, partition_max
//!
//! 无法计算或非有限的数值留空，原因写入 `note` 列。行顺序与输入表一致。
//!
//! ## 依赖关系
//! - 被 `commands/estimate.rs` 调用
//! - 使用 `models/records.rs` 与 `sec/calibration.rs`
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{Result, SizerError};
use crate::models::{SampleElution, SampleStructure, StandardPoint};
use crate::sec::CalibrationModel;

use std::path::Path;

pub const STANDARDS_FILE: &str = "standards.csv";
pub const SAMPLE_STRUCTURES_FILE: &str = "sample_structures.csv";
pub const SAMPLE_ELUTIONS_FILE: &str = "sample_elutions.csv";
pub const CALIBRATION_FILE: &str = "calibration.csv";

fn format_optional(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| format!("{:.*}", precision, v))
        .unwrap_or_default()
}

fn format_finite(value: f64, precision: usize) -> String {
    format_optional(Some(value).filter(|v| v.is_finite()), precision)
}

fn write_rows(output_path: &Path, header: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(header)?;
    for row in rows {
        wtr.write_record(&row)?;
    }

    wtr.flush().map_err(|e| SizerError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出标准品表
pub fn standards_to_csv(points: &[StandardPoint], output_path: &Path) -> Result<()> {
    let rows = points
        .iter()
        .map(|p| {
            vec![
                p.structure.clone(),
                p.elution.to_string(),
                format_optional(p.radius_gyration, 4),
                format!("{:.6}", p.partition),
                p.notes.join("; "),
            ]
        })
        .collect();

    write_rows(
        output_path,
        &["structure", "elution", "radius_gyration", "partition", "note"],
        rows,
    )
}

/// 导出样品结构表
pub fn sample_structures_to_csv(structures: &[SampleStructure], output_path: &Path) -> Result<()> {
    let rows = structures
        .iter()
        .map(|s| {
            vec![
                s.structure.clone(),
                s.oligomer.clone(),
                format_optional(s.radius_gyration, 4),
                s.notes.join("; "),
            ]
        })
        .collect();

    write_rows(
        output_path,
        &["structure", "oligomer", "radius_gyration", "note"],
        rows,
    )
}

/// 导出样品洗脱表
pub fn sample_elutions_to_csv(elutions: &[SampleElution], output_path: &Path) -> Result<()> {
    let rows = elutions
        .iter()
        .map(|e| {
            vec![
                e.elution.to_string(),
                format_finite(e.partition, 6),
                format_optional(e.radius_gyration, 4),
                e.closest_oligomer.clone().unwrap_or_default(),
                e.notes.join("; "),
            ]
        })
        .collect();

    write_rows(
        output_path,
        &[
            "elution",
            "partition",
            "radius_gyration",
            "closest_oligomer",
            "note",
        ],
        rows,
    )
}

/// 导出标定参数
pub fn calibration_to_csv(model: &CalibrationModel, output_path: &Path) -> Result<()> {
    write_rows(
        output_path,
        &[
            "slope",
            "intercept",
            "r_squared",
            "points",
            "partition_min",
            "partition_max",
        ],
        vec![vec![
            format!("{:.10}", model.slope),
            format!("{:.10}", model.intercept),
            format_optional(model.r_squared, 10),
            model.points.to_string(),
            format!("{:.6}", model.partition_min),
            format!("{:.6}", model.partition_max),
        ]],
    )
}

//! # rg 命令实现
//!
//! 计算结构文件的回转半径，支持单文件和目录批量模式。
//!
//! ## 依赖关系
//! - 使用 `cli/rg.rs` 定义的参数
//! - 使用 `batch/` 收集文件并并行计算
//! - 使用 `sec/gyration.rs`

use crate::batch::{BatchRunner, FileCollector};
use crate::cli::rg::RgArgs;
use crate::error::{Result, SizerError};
use crate::sec::{GyrationSource, PdbGyration};
use crate::utils::output;

use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Tabled)]
struct RgRow {
    #[tabled(rename = "Structure")]
    structure: String,
    #[tabled(rename = "Rg (Å)")]
    radius_gyration: String,
}

/// 执行 rg 命令
pub fn execute(args: RgArgs) -> Result<()> {
    output::print_header("Radius of Gyration");

    if !args.input.exists() {
        return Err(SizerError::DirectoryNotFound {
            path: args.input.display().to_string(),
        });
    }

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect();

    if files.is_empty() {
        output::print_warning(&format!(
            "No matching files found with pattern '{}'",
            args.pattern
        ));
        return Ok(());
    }

    output::print_info(&format!(
        "Found {} structure files (weighting: {})",
        files.len(),
        args.weighting
    ));

    let source = PdbGyration::new(args.weighting);
    let runner = BatchRunner::new(args.jobs);
    let (results, summary) = runner.run(&files, "Computing Rg", |path| {
        source.radius_of_gyration(path)
    })?;

    let measured: Vec<(PathBuf, f64)> = files
        .iter()
        .zip(results)
        .filter_map(|(path, result)| match result {
            Ok(rg) => Some((path.clone(), rg)),
            Err(e) => {
                output::print_skip(&format!("{}: {}", path.display(), e));
                None
            }
        })
        .collect();

    let rows: Vec<RgRow> = measured
        .iter()
        .map(|(path, rg)| RgRow {
            structure: display_name(path, &args.input),
            radius_gyration: format!("{:.3}", rg),
        })
        .collect();
    println!("{}", Table::new(&rows));

    if let Some(ref csv_path) = args.output {
        save_rg_csv(&measured, &args.input, csv_path)?;
        output::print_success(&format!("Results saved to '{}'", csv_path.display()));
    }

    output::print_separator();
    output::print_done(&format!(
        "{} of {} structures measured, {} failed",
        summary.success,
        summary.total(),
        summary.failed
    ));

    Ok(())
}

/// 相对于输入目录的显示名称
fn display_name(path: &Path, input: &Path) -> String {
    path.strip_prefix(input)
        .ok()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(path)
        .display()
        .to_string()
}

/// 保存结果到 CSV
fn save_rg_csv(measured: &[(PathBuf, f64)], input: &Path, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(["structure", "radius_gyration"])?;
    for (path, rg) in measured {
        wtr.write_record([display_name(path, input), format!("{:.4}", rg)])?;
    }

    wtr.flush().map_err(|e| SizerError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_display_name() {
        let input = Path::new("/data/models");
        assert_eq!(
            display_name(Path::new("/data/models/a/dimer.pdb"), input),
            "a/dimer.pdb"
        );
        let single = Path::new("/data/models/x.pdb");
        assert_eq!(display_name(single, single), "/data/models/x.pdb");
    }

    #[test]
    fn test_save_rg_csv() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("rg.csv");
        let measured = vec![(dir.path().join("m1.pdb"), 12.5), (dir.path().join("m2.pdb"), 20.0)];
        save_rg_csv(&measured, dir.path(), &out).unwrap();
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "structure,radius_gyration\nm1.pdb,12.5000\nm2.pdb,20.0000\n"
        );
    }
}

//! # estimate 命令实现
//!
//! SEC 标定与寡聚状态估计的完整流程。
//!
//! ## 流程
//! 1. 读取四张输入表，校验色谱柱参数
//! 2. 定位标准品与样品结构文件，并行计算回转半径
//! 3. 由洗脱体积计算分配系数 K
//! 4. 拟合 K 与 log10(Rg)，报告 R²
//! 5. 估计样品 Rg 并匹配最接近的寡聚体
//! 6. 写出结果表，可选绘制标定曲线
//!
//! ## 依赖关系
//! - 使用 `cli/estimate.rs` 定义的参数
//! - 使用 `parsers/`, `batch/`, `sec/`
//! - 使用 `utils/output.rs`

use crate::batch::{BatchRunner, StructureIndex};
use crate::cli::estimate::EstimateArgs;
use crate::error::{Result, SizerError};
use crate::models::{
    CandidateStructure, ColumnParameters, SampleElution, SampleElutionRow, SampleStructure,
    SampleStructureRow, StandardPoint, StandardRow,
};
use crate::parsers;
use crate::sec::{self, export, partition, plot, CalibrationModel, GyrationSource, PdbGyration};
use crate::utils::output;

use std::fs;
use tabled::{Table, Tabled};

/// 流程输入
#[derive(Debug, Clone)]
pub struct PipelineInputs {
    pub standards: Vec<StandardRow>,
    pub sample_elutions: Vec<SampleElutionRow>,
    pub sample_structures: Vec<SampleStructureRow>,
    pub column: ColumnParameters,
}

/// 流程输出
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub standards: Vec<StandardPoint>,
    pub sample_structures: Vec<SampleStructure>,
    pub sample_elutions: Vec<SampleElution>,
    pub model: CalibrationModel,
    /// 需要提示操作者的问题
    pub warnings: Vec<String>,
}

impl PipelineReport {
    /// 是否完成了寡聚体匹配
    pub fn has_candidates(&self) -> bool {
        self.sample_structures
            .iter()
            .any(|s| s.radius_gyration.is_some())
    }
}

/// 结果表行（终端显示）
#[derive(Debug, Clone, Tabled)]
struct SampleRow {
    #[tabled(rename = "Elution")]
    elution: String,
    #[tabled(rename = "K")]
    partition: String,
    #[tabled(rename = "Rg est. (Å)")]
    radius_gyration: String,
    #[tabled(rename = "Oligomer")]
    oligomer: String,
    #[tabled(rename = "Note")]
    note: String,
}

#[derive(Debug, Clone, Tabled)]
struct StructureRow {
    #[tabled(rename = "Structure")]
    structure: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "K")]
    partition: String,
    #[tabled(rename = "Rg (Å)")]
    radius_gyration: String,
    #[tabled(rename = "Note")]
    note: String,
}

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| format!("{:.*}", precision, v))
        .unwrap_or_else(|| "-".to_string())
}

fn format_r_squared(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| format!("{:.*}", precision, v))
        .unwrap_or_else(|| "undefined".to_string())
}

/// 执行 estimate 命令
pub fn execute(args: EstimateArgs) -> Result<()> {
    output::print_header("SEC Oligomer State Estimation");

    // 读取输入表
    let standards = parsers::read_standards(&args.standards)?;
    let sample_elutions = parsers::read_sample_elutions(&args.sample_elutions)?;
    let sample_structures = parsers::read_sample_structures(&args.sample_structures)?;
    let column_rows = parsers::read_column_parameters(&args.column)?;

    let (column, unknown) = ColumnParameters::from_rows(&column_rows)?;
    for key in &unknown {
        output::print_warning(&format!("Ignoring unknown column parameter '{}'", key));
    }

    output::print_info(&format!(
        "Loaded {} standards, {} sample elutions, {} sample structures",
        standards.len(),
        sample_elutions.len(),
        sample_structures.len()
    ));
    output::print_info(&format!(
        "Column: void = {}, total = {}",
        column.void(),
        column.total()
    ));

    // 索引结构目录
    let index = StructureIndex::build(&args.structures)?;
    if index.is_empty() {
        output::print_warning(&format!(
            "No files found under '{}'",
            args.structures.display()
        ));
    } else {
        output::print_info(&format!(
            "Indexed {} files under '{}'",
            index.len(),
            index.root().display()
        ));
    }
    output::print_info(&format!("Radius of gyration weighting: {}", args.weighting));

    let inputs = PipelineInputs {
        standards,
        sample_elutions,
        sample_structures,
        column,
    };
    let source = PdbGyration::new(args.weighting);
    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!("Using {} worker threads", runner.jobs()));

    let report = run_pipeline(&inputs, &index, &source, &runner, args.allow_missing)?;

    for warning in &report.warnings {
        output::print_warning(warning);
    }

    // 拟合质量
    output::print_header("Calibration");
    let model = &report.model;
    output::print_metric("slope", &format!("{:.6}", model.slope));
    output::print_metric("intercept", &format!("{:.6}", model.intercept));
    output::print_metric("standards used", &model.points.to_string());
    output::print_metric(
        "calibrated K range",
        &format!("{:.4} .. {:.4}", model.partition_min, model.partition_max),
    );
    output::print_metric("r_squared", &format_r_squared(model.r_squared, 6));

    if model.is_poor_fit(args.min_r_squared) {
        output::print_alert(
            &format!(
                "Poor calibration fit: R² = {} (threshold {})",
                format_r_squared(model.r_squared, 4),
                args.min_r_squared
            ),
            &[
                "Oligomer assignments below may not be trustworthy.".to_string(),
                "Check the standards' elution volumes and structures.".to_string(),
            ],
        );
    }

    if args.debug {
        print_structure_tables(&report);
    }

    output::print_header("Sample Estimates");
    let rows: Vec<SampleRow> = report
        .sample_elutions
        .iter()
        .map(|e| SampleRow {
            elution: e.elution.to_string(),
            partition: fmt_opt(Some(e.partition).filter(|k| k.is_finite()), 4),
            radius_gyration: fmt_opt(e.radius_gyration, 2),
            oligomer: e.closest_oligomer.clone().unwrap_or_else(|| "-".to_string()),
            note: e.notes.join("; "),
        })
        .collect();
    println!("{}", Table::new(&rows));

    // 写出结果
    fs::create_dir_all(&args.output).map_err(|e| SizerError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    export::standards_to_csv(&report.standards, &args.output.join(export::STANDARDS_FILE))?;
    export::sample_structures_to_csv(
        &report.sample_structures,
        &args.output.join(export::SAMPLE_STRUCTURES_FILE),
    )?;
    export::sample_elutions_to_csv(
        &report.sample_elutions,
        &args.output.join(export::SAMPLE_ELUTIONS_FILE),
    )?;
    export::calibration_to_csv(&report.model, &args.output.join(export::CALIBRATION_FILE))?;

    if args.debug {
        let standards: Vec<(f64, f64)> = report
            .standards
            .iter()
            .filter_map(StandardPoint::calibration_point)
            .collect();
        let samples: Vec<f64> = report.sample_elutions.iter().map(|e| e.partition).collect();
        let plot_path = args.output.join(plot::PLOT_FILE);
        plot::generate_calibration_plot(&standards, &samples, &report.model, &plot_path)?;
        output::print_success(&format!(
            "Calibration curve saved to '{}'",
            plot_path.display()
        ));
    }

    if !report.has_candidates() {
        output::print_warning(
            "No usable candidate structures: closest_oligomer could not be assigned",
        );
    }

    output::print_done(&format!(
        "Results written to '{}' (r_squared = {})",
        args.output.display(),
        format_r_squared(report.model.r_squared, 4)
    ));

    Ok(())
}

/// 执行核心流程（不涉及终端输出与文件写出）
pub fn run_pipeline(
    inputs: &PipelineInputs,
    index: &StructureIndex,
    source: &dyn GyrationSource,
    runner: &BatchRunner,
    allow_missing: bool,
) -> Result<PipelineReport> {
    let column = inputs.column;
    let mut warnings = Vec::new();

    // ── 标准品 ──
    let mut standards = Vec::with_capacity(inputs.standards.len());
    for row in &inputs.standards {
        let k = partition(row.elution, column.void(), column.total())?;
        let mut point = StandardPoint::new(row, k);
        if !sec::partition::is_physical(k) {
            point.notes.push("partition outside [0, 1]".to_string());
            warnings.push(format!(
                "Standard '{}' elutes at {} (K = {:.4}), outside the column's void/total range",
                row.structure, row.elution, k
            ));
        }
        standards.push(point);
    }

    let names: Vec<&str> = inputs.standards.iter().map(|r| r.structure.as_str()).collect();
    let measured = measure_structures(&names, index, source, runner, "Standards")?;
    let failures = apply_measurements(
        measured,
        standards.iter_mut().map(|p| (&mut p.radius_gyration, &mut p.notes)),
        &names,
    );
    handle_failures("standard", failures, allow_missing, &mut warnings)?;

    // ── 样品结构 ──
    let mut sample_structures: Vec<SampleStructure> = inputs
        .sample_structures
        .iter()
        .map(SampleStructure::new)
        .collect();
    let names: Vec<&str> = inputs
        .sample_structures
        .iter()
        .map(|r| r.structure.as_str())
        .collect();
    let measured = measure_structures(&names, index, source, runner, "Samples")?;
    let failures = apply_measurements(
        measured,
        sample_structures
            .iter_mut()
            .map(|s| (&mut s.radius_gyration, &mut s.notes)),
        &names,
    );
    handle_failures("sample", failures, allow_missing, &mut warnings)?;

    // ── 标定 ──
    let points: Vec<(f64, f64)> = standards
        .iter()
        .filter_map(StandardPoint::calibration_point)
        .collect();
    let model = sec::fit(&points)?;

    // ── 样品洗脱 ──
    let candidates: Vec<CandidateStructure> = sample_structures
        .iter()
        .filter_map(SampleStructure::candidate)
        .collect();
    if candidates.is_empty() {
        warnings.push(format!("{}; oligomers will not be assigned", SizerError::EmptyCandidateSet));
    }

    let mut sample_elutions = Vec::with_capacity(inputs.sample_elutions.len());
    for row in &inputs.sample_elutions {
        let k = partition(row.elution, column.void(), column.total())?;
        let mut elution = SampleElution::new(row, k);

        if !row.elution.is_finite() {
            elution.notes.push("elution is not a finite number".to_string());
            warnings.push(format!(
                "Sample elution '{}' is not a finite number; no estimate made",
                row.elution
            ));
            sample_elutions.push(elution);
            continue;
        }

        if !sec::partition::is_physical(k) {
            elution.notes.push("partition outside [0, 1]".to_string());
        }
        if model.is_extrapolation(k) {
            elution
                .notes
                .push("outside calibrated range (extrapolated)".to_string());
            warnings.push(format!(
                "Sample elution {} (K = {:.4}) lies outside the calibrated range {:.4} .. {:.4}",
                row.elution, k, model.partition_min, model.partition_max
            ));
        }

        let rg = model.estimate_rg(k);
        if !rg.is_finite() || rg <= 0.0 {
            elution
                .notes
                .push(format!("estimated radius of gyration {} is unusable", rg));
            warnings.push(format!(
                "Sample elution {} (K = {:.4}) gives an unusable radius of gyration {}",
                row.elution, k, rg
            ));
            sample_elutions.push(elution);
            continue;
        }
        elution.radius_gyration = Some(rg);

        match sec::match_oligomer(rg, &candidates) {
            Ok(label) => elution.closest_oligomer = Some(label.to_string()),
            Err(SizerError::EmptyCandidateSet) => {
                elution.notes.push("no candidate structures".to_string())
            }
            Err(e) => return Err(e),
        }

        sample_elutions.push(elution);
    }

    Ok(PipelineReport {
        standards,
        sample_structures,
        sample_elutions,
        model,
        warnings,
    })
}

/// 定位结构并并行计算 Rg，结果与 `names` 一一对应
fn measure_structures(
    names: &[&str],
    index: &StructureIndex,
    source: &dyn GyrationSource,
    runner: &BatchRunner,
    message: &str,
) -> Result<Vec<Result<f64>>> {
    let (results, _summary) = runner.run(names, message, |name| {
        let path = index.resolve(name)?;
        let rg = source.radius_of_gyration(&path)?;
        if !rg.is_finite() || rg <= 0.0 {
            return Err(SizerError::ParseError {
                path: path.display().to_string(),
                reason: format!("radius of gyration is {}, expected a positive value", rg),
            });
        }
        Ok(rg)
    })?;
    Ok(results)
}

/// 写回 Rg；失败的行记录原因，返回 (结构名, 错误) 列表
fn apply_measurements<'a>(
    measured: Vec<Result<f64>>,
    slots: impl Iterator<Item = (&'a mut Option<f64>, &'a mut Vec<String>)>,
    names: &[&str],
) -> Vec<(String, SizerError)> {
    let mut failures = Vec::new();
    for ((result, (rg, notes)), name) in measured.into_iter().zip(slots).zip(names) {
        match result {
            Ok(value) => *rg = Some(value),
            Err(e) => {
                notes.push(e.short_note());
                failures.push((name.to_string(), e));
            }
        }
    }
    failures
}

/// 按 `--allow-missing` 策略处理单行失败
fn handle_failures(
    kind: &str,
    mut failures: Vec<(String, SizerError)>,
    allow_missing: bool,
    warnings: &mut Vec<String>,
) -> Result<()> {
    if failures.is_empty() {
        return Ok(());
    }

    // 非结构类错误直接终止
    if let Some(pos) = failures.iter().position(|(_, e)| !e.is_row_level()) {
        return Err(failures.swap_remove(pos).1);
    }

    if allow_missing {
        for (name, e) in &failures {
            warnings.push(format!("Excluding {} '{}': {}", kind, name, e));
        }
        return Ok(());
    }

    let details = failures
        .iter()
        .map(|(name, e)| format!("  {}: {}", name, e))
        .collect::<Vec<_>>()
        .join("\n");
    let (noun, pronoun) = if failures.len() == 1 {
        ("structure", "it")
    } else {
        ("structures", "them")
    };
    Err(SizerError::Other(format!(
        "{} {} {} could not be measured (use --allow-missing to exclude {}):\n{}",
        failures.len(),
        kind,
        noun,
        pronoun,
        details
    )))
}

/// --debug: 打印标准品与样品结构表
fn print_structure_tables(report: &PipelineReport) {
    output::print_header("Standards");
    let rows: Vec<StructureRow> = report
        .standards
        .iter()
        .map(|p| StructureRow {
            structure: p.structure.clone(),
            label: p.elution.to_string(),
            partition: format!("{:.4}", p.partition),
            radius_gyration: fmt_opt(p.radius_gyration, 2),
            note: p.notes.join("; "),
        })
        .collect();
    println!("{}", Table::new(&rows));

    output::print_header("Sample Structures");
    let rows: Vec<StructureRow> = report
        .sample_structures
        .iter()
        .map(|s| StructureRow {
            structure: s.structure.clone(),
            label: s.oligomer.clone(),
            partition: "-".to_string(),
            radius_gyration: fmt_opt(s.radius_gyration, 2),
            note: s.notes.join("; "),
        })
        .collect();
    println!("{}", Table::new(&rows));
}

//! # estimate 子命令 CLI 定义
//!
//! 完整的 SEC 标定与寡聚状态估计流程。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/estimate.rs`

use crate::sec::Weighting;

use clap::Args;
use std::path::PathBuf;

/// estimate 子命令参数
#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// CSV of standard structures and elution volumes (columns: structure, elution)
    pub standards: PathBuf,

    /// CSV of sample elution volumes (column: elution)
    pub sample_elutions: PathBuf,

    /// CSV of candidate sample structures and oligomeric states (columns: structure, oligomer)
    pub sample_structures: PathBuf,

    /// CSV of column volumes (columns: parameter, elution; parameters: void, total)
    pub column: PathBuf,

    /// Root directory searched recursively for structure files
    #[arg(short, long, env = "SIZER_STRUCTURES")]
    pub structures: PathBuf,

    /// Directory the result tables are written to
    #[arg(short, long, default_value = "sizer_output")]
    pub output: PathBuf,

    /// Atom weighting used for the radius of gyration
    #[arg(long, value_enum, default_value = "mass")]
    pub weighting: Weighting,

    /// Exclude rows whose structure is missing or unreadable instead of aborting
    #[arg(long, default_value_t = false)]
    pub allow_missing: bool,

    /// Warn when the calibration R² falls below this value
    #[arg(long, default_value_t = 0.9)]
    pub min_r_squared: f64,

    /// Number of parallel jobs for structure processing (0 = auto)
    #[arg(short, long, env = "SIZER_JOBS", default_value_t = 0)]
    pub jobs: usize,

    /// Render the calibration curve and print intermediate tables
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

//! # rg 子命令 CLI 定义
//!
//! 计算单个结构文件或目录中所有结构文件的回转半径。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/rg.rs`

use crate::sec::Weighting;

use clap::Args;
use std::path::PathBuf;

/// rg 子命令参数
#[derive(Args, Debug)]
pub struct RgArgs {
    /// Input: structure file or directory containing structure files
    pub input: PathBuf,

    /// Glob pattern for input files (directory mode)
    #[arg(long, default_value = "*.pdb,*.cif,*.ent,*.mmcif")]
    pub pattern: String,

    /// Recurse into subdirectories (directory mode)
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Atom weighting used for the radius of gyration
    #[arg(long, value_enum, default_value = "mass")]
    pub weighting: Weighting,

    /// Also write the results to this CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, env = "SIZER_JOBS", default_value_t = 0)]
    pub jobs: usize,
}

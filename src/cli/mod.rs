//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `estimate`: 由 SEC 洗脱体积估计寡聚状态（完整流程）
//! - `rg`: 计算结构文件的回转半径
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: estimate, rg

pub mod estimate;
pub mod rg;

use clap::{Parser, Subcommand};

/// Sizer - 非球状蛋白 SEC 寡聚状态估计工具
#[derive(Parser)]
#[command(name = "sizer")]
#[command(version)]
#[command(
    about = "Estimate protein oligomeric state from SEC elution using structure-derived radii of gyration",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Calibrate against standards and estimate sample oligomeric states
    Estimate(estimate::EstimateArgs),

    /// Compute the radius of gyration of structure files
    Rg(rg::RgArgs),
}

//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `batch/`, `sec/`, `utils/`
//! - 子模块: estimate, rg

pub mod estimate;
pub mod rg;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Estimate(args) => estimate::execute(args),
        Commands::Rg(args) => rg::execute(args),
    }
}

//! # Sizer - 非球状蛋白 SEC 寡聚状态估计
//!
//! 由标准蛋白的真实三维结构计算回转半径，建立分配系数 K 与 log10(Rg) 的
//! 线性标定曲线，据此估计未知样品的 Rg 并匹配最接近的寡聚体结构。
//!
//! ## 子命令
//! - `estimate` - 完整标定与估计流程
//! - `rg`       - 计算结构文件的回转半径
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (表格与结构解析)
//!   │     ├── batch/     (结构定位与并行计算)
//!   │     ├── sec/       (标定核心算法)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod sec;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}

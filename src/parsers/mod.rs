//! # 解析器模块
//!
//! 提供输入 CSV 表格与蛋白结构文件的解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `sec/gyration.rs` 使用
//! - 使用 `models/` 数据模型
//! - 子模块: tables, structure

pub mod structure;
pub mod tables;

pub use tables::{read_column_parameters, read_sample_elutions, read_sample_structures, read_standards};

//! # 批量处理模块
//!
//! 提供结构文件定位、收集与并行处理能力。
//!
//! ## 功能
//! - 按名称在结构目录树中定位结构文件
//! - 收集匹配文件列表
//! - 并行处理，结果保持输入顺序
//!
//! ## 依赖关系
//! - 被各命令模块使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod resolver;
pub mod runner;

pub use collector::FileCollector;
pub use resolver::StructureIndex;
pub use runner::BatchRunner;

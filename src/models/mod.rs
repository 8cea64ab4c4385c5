//! # 数据模型模块
//!
//! 定义 SEC 标定流程中的强类型记录，替代按列名查找的表格操作。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `sec/` 和 `commands/` 使用
//! - 子模块: column, records

pub mod column;
pub mod records;

pub use column::ColumnParameters;
pub use records::{
    CandidateStructure, ColumnParameterRow, SampleElution, SampleElutionRow, SampleStructure,
    SampleStructureRow, StandardPoint, StandardRow,
};

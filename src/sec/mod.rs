//! # SEC 标定核心模块
//!
//! 由标准蛋白的洗脱体积和回转半径建立标定曲线，并估计未知样品的寡聚状态。
//!
//! ## 子模块
//! - `partition`: 洗脱体积 → 分配系数 K
//! - `gyration`: 回转半径计算
//! - `calibration`: K 与 log10(Rg) 的线性拟合
//! - `matcher`: 估计 Rg 与候选寡聚体匹配
//! - `plot`: 标定曲线图
//! - `export`: 结果表导出
//!
//! ## 依赖关系
//! - 被 `commands/estimate.rs`, `commands/rg.rs` 使用
//! - 使用 `models/` 数据模型

pub mod calibration;
pub mod export;
pub mod gyration;
pub mod matcher;
pub mod partition;
pub mod plot;

pub use calibration::{fit, CalibrationModel};
pub use gyration::{GyrationSource, PdbGyration, Weighting};
pub use matcher::match_oligomer;
pub use partition::partition;

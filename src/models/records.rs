//! # 表格记录数据模型
//!
//! 输入表的行类型（serde 反序列化）以及流程中逐步填充派生字段的工作记录。
//!
//! ## 依赖关系
//! - 被 `parsers/tables.rs` 读入
//! - 被 `commands/estimate.rs` 填充
//! - 被 `sec/export.rs` 写出

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────
// 输入行
// ─────────────────────────────────────────────────────────────

/// 标准品表：`structure,elution`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardRow {
    pub structure: String,
    pub elution: f64,
}

/// 样品洗脱表：`elution`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleElutionRow {
    pub elution: f64,
}

/// 样品结构表：`structure,oligomer`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleStructureRow {
    pub structure: String,
    /// 寡聚状态标签，如 `1`、`dimer`
    pub oligomer: String,
}

/// 色谱柱参数表：`parameter,elution`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnParameterRow {
    pub parameter: String,
    pub elution: f64,
}

// ─────────────────────────────────────────────────────────────
// 工作记录
// ─────────────────────────────────────────────────────────────

/// 标准品测量点
#[derive(Debug, Clone, PartialEq)]
pub struct StandardPoint {
    pub structure: String,
    pub elution: f64,
    pub partition: f64,
    /// 结构无法解析时为 None，该行不参与拟合
    pub radius_gyration: Option<f64>,
    pub notes: Vec<String>,
}

impl StandardPoint {
    pub fn new(row: &StandardRow, partition: f64) -> Self {
        StandardPoint {
            structure: row.structure.clone(),
            elution: row.elution,
            partition,
            radius_gyration: None,
            notes: Vec::new(),
        }
    }

    /// 可用于拟合的 (K, Rg) 点
    pub fn calibration_point(&self) -> Option<(f64, f64)> {
        self.radius_gyration.map(|rg| (self.partition, rg))
    }
}

/// 带寡聚状态标签的样品结构
#[derive(Debug, Clone, PartialEq)]
pub struct SampleStructure {
    pub structure: String,
    pub oligomer: String,
    pub radius_gyration: Option<f64>,
    pub notes: Vec<String>,
}

impl SampleStructure {
    pub fn new(row: &SampleStructureRow) -> Self {
        SampleStructure {
            structure: row.structure.clone(),
            oligomer: row.oligomer.clone(),
            radius_gyration: None,
            notes: Vec::new(),
        }
    }

    /// 转换为匹配候选；没有 Rg 的行不参与匹配
    pub fn candidate(&self) -> Option<CandidateStructure> {
        self.radius_gyration
            .map(|rg| CandidateStructure::new(self.oligomer.clone(), rg))
    }
}

/// 寡聚体匹配候选
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateStructure {
    pub oligomer: String,
    pub radius_gyration: f64,
}

impl CandidateStructure {
    pub fn new(oligomer: impl Into<String>, radius_gyration: f64) -> Self {
        CandidateStructure {
            oligomer: oligomer.into(),
            radius_gyration,
        }
    }
}

/// 未知样品的洗脱记录
#[derive(Debug, Clone, PartialEq)]
pub struct SampleElution {
    pub elution: f64,
    pub partition: f64,
    /// 由标定曲线估计的 Rg
    pub radius_gyration: Option<f64>,
    pub closest_oligomer: Option<String>,
    pub notes: Vec<String>,
}

impl SampleElution {
    pub fn new(row: &SampleElutionRow, partition: f64) -> Self {
        SampleElution {
            elution: row.elution,
            partition,
            radius_gyration: None,
            closest_oligomer: None,
            notes: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excluded_rows_do_not_contribute() {
        let row = StandardRow {
            structure: "lysozyme.pdb".to_string(),
            elution: 15.2,
        };
        let mut point = StandardPoint::new(&row, 0.6);
        assert_eq!(point.calibration_point(), None);
        point.radius_gyration = Some(13.9);
        assert_eq!(point.calibration_point(), Some((0.6, 13.9)));

        let mut sample = SampleStructure::new(&SampleStructureRow {
            structure: "design_dimer.pdb".to_string(),
            oligomer: "2".to_string(),
        });
        assert!(sample.candidate().is_none());
        sample.radius_gyration = Some(24.0);
        assert_eq!(sample.candidate(), Some(CandidateStructure::new("2", 24.0)));
    }
}

//! # 回转半径计算
//!
//! Rg = sqrt( Σ wᵢ |rᵢ - r_c|² / Σ wᵢ )，r_c 为加权中心。
//! 默认以原子量加权，使用结构中全部原子（不做链或原子子集选择）。
//!
//! ## 依赖关系
//! - 被 `commands/estimate.rs`, `commands/rg.rs` 使用
//! - 使用 `parsers/structure.rs` 读取原子

use crate::error::{Result, SizerError};
use crate::parsers::structure::{self, AtomSite};

use clap::ValueEnum;
use std::path::Path;

/// 原子权重方案
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum Weighting {
    /// Weight atoms by standard atomic mass
    #[default]
    Mass,
    /// Weight every atom equally
    Uniform,
}

impl std::fmt::Display for Weighting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Weighting::Mass => write!(f, "mass"),
            Weighting::Uniform => write!(f, "uniform"),
        }
    }
}

/// 回转半径的来源
///
/// 流程只通过该 trait 获取 Rg，便于替换结构解析后端。
pub trait GyrationSource: Sync {
    fn radius_of_gyration(&self, path: &Path) -> Result<f64>;
}

/// 基于 `pdbtbx` 的结构文件回转半径
#[derive(Debug, Clone, Copy, Default)]
pub struct PdbGyration {
    weighting: Weighting,
}

impl PdbGyration {
    pub fn new(weighting: Weighting) -> Self {
        Self { weighting }
    }
}

impl GyrationSource for PdbGyration {
    fn radius_of_gyration(&self, path: &Path) -> Result<f64> {
        let atoms = structure::read_atoms(path)?;
        let points = weighted_positions(&atoms, self.weighting).map_err(|reason| {
            SizerError::ParseError {
                path: path.display().to_string(),
                reason,
            }
        })?;

        radius_of_gyration(&points).ok_or_else(|| SizerError::ParseError {
            path: path.display().to_string(),
            reason: "radius of gyration is undefined for this atom set".to_string(),
        })
    }
}

/// 按权重方案为原子赋权
fn weighted_positions(
    atoms: &[AtomSite],
    weighting: Weighting,
) -> std::result::Result<Vec<([f64; 3], f64)>, String> {
    atoms
        .iter()
        .map(|atom| match weighting {
            Weighting::Uniform => Ok((atom.position, 1.0)),
            Weighting::Mass => atom
                .mass
                .map(|m| (atom.position, m))
                .ok_or_else(|| format!("cannot determine the mass of atom '{}'", atom.name.trim())),
        })
        .collect()
}

/// 加权回转半径
///
/// 空集或总权重非正时返回 None。
pub fn radius_of_gyration(points: &[([f64; 3], f64)]) -> Option<f64> {
    let total_weight: f64 = points.iter().map(|(_, w)| w).sum();
    if points.is_empty() || total_weight <= 0.0 || !total_weight.is_finite() {
        return None;
    }

    let mut center = [0.0f64; 3];
    for (pos, w) in points {
        center[0] += w * pos[0];
        center[1] += w * pos[1];
        center[2] += w * pos[2];
    }
    center.iter_mut().for_each(|c| *c /= total_weight);

    let sum_sq: f64 = points
        .iter()
        .map(|(pos, w)| {
            let dx = pos[0] - center[0];
            let dy = pos[1] - center[1];
            let dz = pos[2] - center[2];
            w * (dx * dx + dy * dy + dz * dz)
        })
        .sum();

    Some((sum_sq / total_weight).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_rg_symmetric_pair() {
        let points = [([-1.0, 0.0, 0.0], 1.0), ([1.0, 0.0, 0.0], 1.0)];
        assert!((radius_of_gyration(&points).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rg_mass_weighting_shifts_center() {
        // 重原子拉近中心：r_c = 1.5，Rg² = (3·0.25 + 1·2.25)/4 = 0.75
        let points = [([0.0, 0.0, 0.0], 1.0), ([2.0, 0.0, 0.0], 3.0)];
        let rg = radius_of_gyration(&points).unwrap();
        assert!((rg - 0.75f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_rg_octahedron() {
        let d = 3.0;
        let points: Vec<([f64; 3], f64)> = [
            [d, 0.0, 0.0],
            [-d, 0.0, 0.0],
            [0.0, d, 0.0],
            [0.0, -d, 0.0],
            [0.0, 0.0, d],
            [0.0, 0.0, -d],
        ]
        .iter()
        .map(|p| (*p, 12.011))
        .collect();
        assert!((radius_of_gyration(&points).unwrap() - d).abs() < 1e-12);
    }

    #[test]
    fn test_rg_undefined() {
        assert_eq!(radius_of_gyration(&[]), None);
        assert_eq!(radius_of_gyration(&[([1.0, 2.0, 3.0], 0.0)]), None);
    }

    #[test]
    fn test_weighted_positions_requires_mass() {
        let atoms = vec![
            AtomSite {
                name: " CA ".to_string(),
                position: [0.0; 3],
                mass: Some(12.011),
            },
            AtomSite {
                name: " XX ".to_string(),
                position: [1.0, 0.0, 0.0],
                mass: None,
            },
        ];
        let err = weighted_positions(&atoms, Weighting::Mass).unwrap_err();
        assert!(err.contains("XX"));
        let uniform = weighted_positions(&atoms, Weighting::Uniform).unwrap();
        assert_eq!(uniform.len(), 2);
        assert!(uniform.iter().all(|(_, w)| *w == 1.0));
    }

    #[test]
    fn test_pdb_gyration_from_file() {
        let pdb = "\
ATOM      1  CA  ALA A   1      -5.000   0.000   0.000  1.00  0.00           C
ATOM      2  CA  ALA A   2       5.000   0.000   0.000  1.00  0.00           C
END
";
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pair.pdb");
        fs::write(&path, pdb).unwrap();

        for weighting in [Weighting::Mass, Weighting::Uniform] {
            let rg = PdbGyration::new(weighting).radius_of_gyration(&path).unwrap();
            assert!((rg - 5.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_pdb_gyration_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdb");
        fs::write(&path, "this is not a structure\n").unwrap();
        let err = PdbGyration::default().radius_of_gyration(&path).unwrap_err();
        assert!(matches!(err, SizerError::ParseError { .. }));
    }
}

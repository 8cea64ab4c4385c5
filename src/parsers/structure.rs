//! # 蛋白结构文件解析器
//!
//! 使用 `pdbtbx` 读取 PDB / mmCIF 文件，提取第一个模型中所有原子的坐标与质量。
//!
//! ## 依赖关系
//! - 被 `sec/gyration.rs` 使用
//! - 使用 `pdbtbx` 解析原子坐标

use crate::error::{Result, SizerError};

use pdbtbx::StrictnessLevel;
use std::path::Path;

/// 单个原子位点
#[derive(Debug, Clone, PartialEq)]
pub struct AtomSite {
    /// 原子名称（PDB 列 13-16）
    pub name: String,
    /// 笛卡尔坐标 (Å)
    pub position: [f64; 3],
    /// 标准原子量 (Da)，无法确定时为 None
    pub mass: Option<f64>,
}

/// 读取结构文件中第一个模型的全部原子
pub fn read_atoms(path: &Path) -> Result<Vec<AtomSite>> {
    let path_str = path.to_str().ok_or_else(|| SizerError::ParseError {
        path: path.display().to_string(),
        reason: "path is not valid UTF-8".to_string(),
    })?;

    let (pdb, _warnings) = pdbtbx::open(path_str, StrictnessLevel::Loose).map_err(|errors| {
        SizerError::ParseError {
            path: path.display().to_string(),
            reason: errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; "),
        }
    })?;

    let model = pdb.models().next().ok_or_else(|| SizerError::ParseError {
        path: path.display().to_string(),
        reason: "structure contains no models".to_string(),
    })?;

    let atoms: Vec<AtomSite> = model
        .atoms()
        .map(|atom| {
            let (x, y, z) = atom.pos();
            let mass = atom
                .element()
                .and_then(|e| e.weight())
                .or_else(|| mass_from_atom_name(atom.name()));
            AtomSite {
                name: atom.name().to_string(),
                position: [x, y, z],
                mass,
            }
        })
        .collect();

    if atoms.is_empty() {
        return Err(SizerError::ParseError {
            path: path.display().to_string(),
            reason: "structure contains no atoms".to_string(),
        });
    }

    Ok(atoms)
}

/// 元素列缺失时，按原子名称首字母推断常见生物元素的原子量
fn mass_from_atom_name(name: &str) -> Option<f64> {
    let first = name.trim().chars().find(|c| c.is_ascii_alphabetic())?;
    match first.to_ascii_uppercase() {
        'H' => Some(1.008),
        'C' => Some(12.011),
        'N' => Some(14.007),
        'O' => Some(15.999),
        'S' => Some(32.06),
        'P' => Some(30.974),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// 三个原子的最小 PDB 文件
    const TINY_PDB: &str = "\
ATOM      1  N   GLY A   1       0.000   0.000   0.000  1.00  0.00           N
ATOM      2  CA  GLY A   1       1.458   0.000   0.000  1.00  0.00           C
ATOM      3  C   GLY A   1       2.009   1.420   0.000  1.00  0.00           C
END
";

    #[test]
    fn test_mass_from_atom_name() {
        assert_eq!(mass_from_atom_name(" CA "), Some(12.011));
        assert_eq!(mass_from_atom_name("1HB"), Some(1.008));
        assert_eq!(mass_from_atom_name("OXT"), Some(15.999));
        assert_eq!(mass_from_atom_name("XX"), None);
        assert_eq!(mass_from_atom_name("  "), None);
    }

    #[test]
    fn test_read_atoms_pdb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.pdb");
        fs::write(&path, TINY_PDB).unwrap();

        let atoms = read_atoms(&path).unwrap();
        assert_eq!(atoms.len(), 3);
        assert!((atoms[1].position[0] - 1.458).abs() < 1e-6);
        assert!(atoms.iter().all(|a| a.mass.is_some()));
        let n_mass = atoms[0].mass.unwrap();
        assert!((n_mass - 14.007).abs() < 0.01);
    }

    #[test]
    fn test_read_atoms_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_atoms(&dir.path().join("absent.pdb")).unwrap_err();
        assert!(matches!(err, SizerError::ParseError { .. }));
    }
}

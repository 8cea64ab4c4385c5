//! # 结构文件定位
//!
//! 在结构目录树中按文件名查找结构文件。
//!
//! ## 规则
//! - 名称本身是存在的路径（绝对路径或相对于根目录）时直接使用
//! - 否则先按完整文件名匹配，再按去掉结构扩展名后的文件名匹配
//! - 无匹配返回 `NotFound`，多于一个匹配返回 `DuplicateStructure`
//!
//! ## 依赖关系
//! - 被 `commands/estimate.rs` 调用
//! - 使用 `walkdir` 遍历目录

use crate::error::{Result, SizerError};

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 可识别的结构文件扩展名
pub const STRUCTURE_EXTENSIONS: &[&str] = &["pdb", "ent", "cif", "mmcif"];

/// 结构目录索引，只遍历一次目录树
#[derive(Debug, Clone)]
pub struct StructureIndex {
    root: PathBuf,
    by_name: HashMap<String, Vec<PathBuf>>,
    by_stem: HashMap<String, Vec<PathBuf>>,
}

impl StructureIndex {
    /// 遍历根目录建立索引
    pub fn build(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(SizerError::DirectoryNotFound {
                path: root.display().to_string(),
            });
        }

        let mut by_name: HashMap<String, Vec<PathBuf>> = HashMap::new();
        let mut by_stem: HashMap<String, Vec<PathBuf>> = HashMap::new();

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file());

        for entry in walker {
            let path = entry.path().to_path_buf();
            let name = entry.file_name().to_string_lossy().to_string();

            if let (Some(stem), Some(ext)) = (
                path.file_stem().and_then(|s| s.to_str()),
                path.extension().and_then(|e| e.to_str()),
            ) {
                if is_structure_extension(ext) {
                    by_stem
                        .entry(stem.to_string())
                        .or_default()
                        .push(path.clone());
                }
            }

            by_name.entry(name).or_default().push(path);
        }

        Ok(StructureIndex {
            root: root.to_path_buf(),
            by_name,
            by_stem,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 已索引的文件数
    pub fn len(&self) -> usize {
        self.by_name.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// 将结构标识解析为唯一的文件路径
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let name = name.trim();

        // 显式路径
        let explicit = Path::new(name);
        if explicit.is_absolute() && explicit.is_file() {
            return Ok(explicit.to_path_buf());
        }
        if explicit.components().count() > 1 {
            let joined = self.root.join(explicit);
            if joined.is_file() {
                return Ok(joined);
            }
        }

        let matches = match self.by_name.get(name) {
            Some(paths) => paths,
            None => match self.by_stem.get(name) {
                Some(paths) => paths,
                None => {
                    return Err(SizerError::NotFound {
                        name: name.to_string(),
                        root: self.root.display().to_string(),
                    })
                }
            },
        };

        match matches.as_slice() {
            [single] => Ok(single.clone()),
            _ => Err(SizerError::DuplicateStructure {
                name: name.to_string(),
                candidates: matches.iter().map(|p| p.display().to_string()).collect(),
            }),
        }
    }
}

fn is_structure_extension(ext: &str) -> bool {
    STRUCTURE_EXTENSIONS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn resolve(name: &str, root: &Path) -> Result<PathBuf> {
        StructureIndex::build(root)?.resolve(name)
    }

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "END\n").unwrap();
    }

    #[test]
    fn test_resolve_nested_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("standards/globular/foo.pdb");
        touch(&target);
        touch(&dir.path().join("samples/bar.pdb"));

        assert_eq!(resolve("foo.pdb", dir.path()).unwrap(), target);
    }

    #[test]
    fn test_resolve_not_found() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("bar.pdb"));

        let err = resolve("foo.pdb", dir.path()).unwrap_err();
        assert!(matches!(err, SizerError::NotFound { .. }));
    }

    #[test]
    fn test_resolve_duplicate_fails_loudly() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a/foo.pdb"));
        touch(&dir.path().join("b/foo.pdb"));

        match resolve("foo.pdb", dir.path()).unwrap_err() {
            SizerError::DuplicateStructure { candidates, .. } => assert_eq!(candidates.len(), 2),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_resolve_by_stem_and_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let cif = dir.path().join("models/dimer.cif");
        touch(&cif);
        touch(&dir.path().join("models/dimer.txt"));

        let index = StructureIndex::build(dir.path()).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.resolve("dimer").unwrap(), cif);
        assert_eq!(index.resolve("models/dimer.cif").unwrap(), cif);
        assert_eq!(index.resolve(cif.to_str().unwrap()).unwrap(), cif);
    }

    #[test]
    fn test_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = StructureIndex::build(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, SizerError::DirectoryNotFound { .. }));
    }
}

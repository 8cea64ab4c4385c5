//! # 统一错误处理模块
//!
//! 定义 Sizer 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// Sizer 统一错误类型
#[derive(Error, Debug)]
pub enum SizerError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 结构文件错误（单行可恢复）
    // ─────────────────────────────────────────────────────────────
    #[error("No structure file matching '{name}' under {root}")]
    NotFound { name: String, root: String },

    #[error("Structure name '{name}' is ambiguous, {} files match: {}", .candidates.len(), .candidates.join(", "))]
    DuplicateStructure {
        name: String,
        candidates: Vec<String>,
    },

    #[error("Failed to parse structure file: {path}\nReason: {reason}")]
    ParseError { path: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 运行级错误
    // ─────────────────────────────────────────────────────────────
    #[error("Column configuration error: {0}")]
    ConfigurationError(String),

    #[error("Insufficient calibration data: {0}")]
    InsufficientData(String),

    #[error("No candidate structures available for oligomer matching")]
    EmptyCandidateSet,

    #[error("Invalid data: {0}")]
    InvalidData(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid table {path}: {reason}")]
    TableError { path: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("Plotting failed: {0}")]
    PlotError(String),

    #[error("{0}")]
    Other(String),
}

impl SizerError {
    /// 是否为单个结构的错误（可通过排除该行恢复）
    pub fn is_row_level(&self) -> bool {
        matches!(
            self,
            SizerError::NotFound { .. }
                | SizerError::DuplicateStructure { .. }
                | SizerError::ParseError { .. }
        )
    }

    /// 输出表 `note` 列使用的简短描述
    pub fn short_note(&self) -> String {
        match self {
            SizerError::NotFound { .. } => "structure not found".to_string(),
            SizerError::DuplicateStructure { candidates, .. } => {
                format!("ambiguous structure name ({} matches)", candidates.len())
            }
            SizerError::ParseError { reason, .. } => format!("unreadable structure: {}", reason),
            other => other.to_string(),
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, SizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_level_classification() {
        let nf = SizerError::NotFound {
            name: "a.pdb".to_string(),
            root: "/data".to_string(),
        };
        assert!(nf.is_row_level());
        assert_eq!(nf.short_note(), "structure not found");
        assert!(!SizerError::EmptyCandidateSet.is_row_level());
        assert!(!SizerError::InsufficientData("x".to_string()).is_row_level());
    }

    #[test]
    fn test_duplicate_message_lists_paths() {
        let err = SizerError::DuplicateStructure {
            name: "a.pdb".to_string(),
            candidates: vec!["/x/a.pdb".to_string(), "/y/a.pdb".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("2 files match"));
        assert!(msg.contains("/x/a.pdb, /y/a.pdb"));
    }
}

//! 定跡変換のエラー型

use std::path::PathBuf;

use crate::coordinate::Dialect;

/// 定跡変換で発生するエラー
#[derive(thiserror::Error, Debug)]
pub enum BookError {
    /// 升目表記が不正（長さ違い・範囲外）
    #[error("invalid coordinate {token:?} ({dialect} dialect)")]
    InvalidCoordinate { token: String, dialect: Dialect },

    /// 入力ファイルが存在しない
    #[error("input file not found: {}", .0.display())]
    MissingInputFile(PathBuf),

    /// 入力レコードに必須フィールドが無い
    #[error("malformed move #{index} in {opening:?} at {position:?}: {reason}")]
    MalformedInputRecord {
        opening: String,
        position: String,
        index: usize,
        reason: String,
    },

    /// 読み込んだカタログが不変条件を満たさない
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    /// ヒューリスティックテーブルが不正
    #[error("invalid heuristic tables: {0}")]
    InvalidTables(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type for book conversion
pub type BookResult<T> = Result<T, BookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_single_line() {
        let err = BookError::InvalidCoordinate {
            token: "0".to_string(),
            dialect: Dialect::Digits,
        };
        assert_eq!(err.to_string(), "invalid coordinate \"0\" (digits dialect)");

        let err = BookError::MalformedInputRecord {
            opening: "Yagura".to_string(),
            position: "startpos".to_string(),
            index: 3,
            reason: "missing `to`".to_string(),
        };
        assert!(!err.to_string().contains('\n'));
        assert!(err.to_string().contains("#3"));
    }
}

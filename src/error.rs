use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while compiling a workbook into a
/// [`DataTableModel`](crate::model::DataTableModel). Each variant carries the
/// offending value and, where one exists, the bound it violated, so callers
/// can surface an actionable message without re-deriving context.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("source file not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("failed to read source {path}: {reason}")]
    SourceRead { path: PathBuf, reason: String },

    #[error("{what} {value} is out of range (bound: {bound})")]
    IndexOutOfRange {
        what: &'static str,
        value: usize,
        bound: usize,
    },

    #[error("no processor registered for type keyword `{keyword}` (column {column})")]
    UnknownTypeKeyword { keyword: String, column: usize },
}

pub type Result<T> = std::result::Result<T, SheetError>;

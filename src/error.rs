use thiserror::Error;

pub type Result<T> = std::result::Result<T, TabulaError>;

/// Errors raised by the filter/detection core.
///
/// The first group are precondition violations: they signal misuse of the
/// API, not data-quality problems, and are never recovered from internally.
/// Data-quality problems (a cell that fails to parse under its column's
/// locked type) degrade to the missing-value sentinel instead, unless the
/// reader was configured strict.
#[derive(Debug, Error)]
pub enum TabulaError {
    #[error("column '{0}' not found in table")]
    ColumnNotFound(String),

    #[error("table already has a column named '{0}'")]
    DuplicateColumn(String),

    #[error("column '{column}' is {actual}, operation expects {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("row count mismatch: '{left_name}' has {left} rows, '{right_name}' has {right}")]
    RowCountMismatch {
        left_name: String,
        left: usize,
        right_name: String,
        right: usize,
    },

    #[error("cannot complement selection with max index {max_index} against universe of {universe} rows")]
    UniverseTooSmall { universe: usize, max_index: u32 },

    #[error("universe of {0} rows exceeds the u32 row index range")]
    UniverseTooLarge(usize),

    #[error("two-column filter right side '{0}' cannot be resolved without a table")]
    UnboundReference(String),

    #[error("invalid read options: {0}")]
    InvalidOptions(String),

    #[error("cannot parse '{cell}' in column '{column}' (row {row}) as {expected}")]
    CellParse {
        column: String,
        row: usize,
        cell: String,
        expected: &'static str,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

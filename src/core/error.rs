use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaintError {
    #[error("malformed header: {0}")]
    MalformedHeader(String),
    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },
    #[error("expected {expected} rows, found {found}")]
    MissingRow { expected: usize, found: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength { row: usize, expected: usize, found: usize },
    #[error("invalid cell {ch:?} at ({row}, {col})")]
    InvalidCell { row: usize, col: usize, ch: char },

    #[error("black cell ({row}, {col}) is not covered by any draw candidate")]
    UncoveredCell { row: usize, col: usize },
    #[error("white cell ({row}, {col}) has draw candidates but no trailing erase")]
    MissingErase { row: usize, col: usize },

    #[error("model is infeasible")]
    Infeasible,
    #[error("solver failed: {0}")]
    Solver(String),

    #[error("invalid command on line {line}: {text:?}")]
    InvalidCommand { line: usize, text: String },
    #[error("program declares {declared} operations but lists {found}")]
    ObjectiveMismatch { declared: usize, found: usize },
    #[error("operation {op} does not fit a {rows}x{cols} canvas")]
    OutOfBounds { op: String, rows: usize, cols: usize },
    #[error("replay differs from target at ({row}, {col})")]
    Mismatch { row: usize, col: usize },

    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PaintError>;

//! Error types for matrix construction and the shortcut engines.

use thiserror::Error;

/// Errors that can occur while building a matrix or computing shortcuts.
#[derive(Debug, Error)]
pub enum ShortcutError {
    /// A matrix must have at least one row.
    #[error("matrix must not be empty")]
    Empty,

    /// A row does not have as many entries as there are rows.
    #[error("row {row} has {found} entries, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Flat row-major data does not hold exactly n×n entries.
    #[error("expected {expected} entries, got {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// n×n does not fit in `usize`.
    #[error("{size}×{size} matrix is too large to address")]
    TooLarge { size: usize },

    /// Entry lookup outside the matrix.
    #[error("index ({row}, {col}) out of bounds for {size}×{size} matrix")]
    OutOfBounds { row: usize, col: usize, size: usize },

    /// The computation was cancelled through its cancel token.
    #[error("computation cancelled")]
    Cancelled,

    /// A worker thread panicked.
    #[error("worker {worker} panicked: {message}")]
    WorkerPanicked { worker: usize, message: String },

    /// The OS refused to spawn a worker thread.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Result type for shortcut operations.
pub type Result<T> = std::result::Result<T, ShortcutError>;

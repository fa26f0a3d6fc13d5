//! Error types for loading and multiplying sparse matrices.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading a matrix or running a product.
#[derive(Debug, Error)]
pub enum SpmvError {
    /// The input file could not be opened.
    #[error("could not open {}: {source}", path.display())]
    FileOpen {
        /// Path that was requested
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// Reading a line failed after the file was opened.
    #[error("read error at line {line}: {source}")]
    Read {
        /// 1-based line number
        line: usize,
        /// Underlying I/O error
        source: io::Error,
    },

    /// The input contained no header line at all.
    #[error("missing header line (expected `rows cols nnz`)")]
    MissingHeader,

    /// The header line does not parse as three non-negative integers.
    #[error("format error in matrix header at line {line}: {content:?}")]
    HeaderFormat {
        /// 1-based line number
        line: usize,
        /// Offending line
        content: String,
    },

    /// A data line does not parse as `row col value`.
    #[error("format error in matrix entry at line {line}: {content:?}")]
    DataFormat {
        /// 1-based line number
        line: usize,
        /// Offending line
        content: String,
    },

    /// A data line refers to a position outside the declared dimensions.
    #[error("entry ({row}, {col}) at line {line} is outside a {n_rows}×{n_cols} matrix")]
    IndexOutOfBounds {
        /// 1-based line number, 0 for in-memory assembly
        line: usize,
        /// Row index as written in the source
        row: usize,
        /// Column index as written in the source
        col: usize,
        /// Declared row count
        n_rows: usize,
        /// Declared column count
        n_cols: usize,
    },

    /// A vector length does not match the matrix dimension it multiplies against.
    #[error("dimension mismatch: expected vector of length {expected}, got {found}")]
    DimensionMismatch {
        /// Required length
        expected: usize,
        /// Supplied length
        found: usize,
    },

    /// Raw CSR arrays violate a structural invariant.
    #[error("invalid CSR structure: {0}")]
    InvalidStructure(String),

    /// A dedicated worker pool could not be created.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// A specialized `Result` type for matrix operations.
pub type Result<T> = std::result::Result<T, SpmvError>;

impl SpmvError {
    /// Returns `true` for errors caused by malformed input text.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            SpmvError::MissingHeader
                | SpmvError::HeaderFormat { .. }
                | SpmvError::DataFormat { .. }
                | SpmvError::IndexOutOfBounds { .. }
        )
    }

    /// Returns `true` if a vector had the wrong length.
    pub fn is_dimension_error(&self) -> bool {
        matches!(self, SpmvError::DimensionMismatch { .. })
    }
}

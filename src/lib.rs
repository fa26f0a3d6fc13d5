//! # symspmv: symmetric sparse matrix-vector multiplication
//!
//! Loads a symmetric matrix stored as one triangle in a coordinate
//! (MatrixMarket-like) text file, expands it into Compressed Sparse Row
//! form and multiplies it by dense vectors.
//!
//! ## Overview
//!
//! - **Loader** ([`loader`]): parses the file, mirrors off-diagonal entries
//!   and builds the CSR arrays with each row sorted by column.
//! - **CSR store** ([`SparseMatrixCSR`]): immutable once built; exposes the
//!   dimensions and the multiply kernels.
//! - **Parallel kernel** ([`parallel`]): splits rows across a rayon pool
//!   while keeping per-row summation order, so results match the
//!   sequential kernel exactly.
//!
//! ## Usage
//!
//! ```
//! use std::io::Cursor;
//! use symspmv::loader::read_matrix;
//!
//! let text = "% lower triangle\n3 3 3\n1 1 4.0\n2 1 2.0\n3 3 5.0\n";
//! let a = read_matrix(Cursor::new(text)).unwrap();
//!
//! assert_eq!(a.row_count(), 3);
//! assert_eq!(a.multiply(&[1.0, 1.0, 1.0]).unwrap(), vec![6.0, 2.0, 5.0]);
//! ```
//!
//! Files are loaded with [`SparseMatrixCSR::from_file`] or [`load`], and
//! large products can be scheduled with [`SpmvConfig`]:
//!
//! ```no_run
//! use symspmv::{SparseMatrixCSR, SpmvConfig};
//!
//! let a = SparseMatrixCSR::from_file("matrix.mtx")?;
//! let x = vec![1.0; a.col_count()];
//! let y = a.multiply_with_config(&x, &SpmvConfig::default())?;
//! # Ok::<(), symspmv::SpmvError>(())
//! ```

pub mod error;
pub mod loader;
pub mod matrix;
pub mod parallel;
pub mod utils;

// Re-export primary components
pub use error::{Result, SpmvError};
pub use loader::{load, read_matrix};
pub use matrix::{ExecutionStrategy, SparseMatrixCSR, SpmvConfig, SymmetricAssembler};
pub use utils::{from_sprs_csr, to_sprs_csr};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

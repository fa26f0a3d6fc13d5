// Matrix data structures and operations

pub mod assembly;
pub mod config;
pub mod csr;
pub mod spmv;

pub use assembly::{SymmetricAssembler, TotalOrder};
pub use config::{ExecutionStrategy, SpmvConfig};
pub use csr::SparseMatrixCSR;

//! Conversions between our CSR matrix and `sprs`

use crate::matrix::SparseMatrixCSR;
use num_traits::Num;
use sprs::{CsMat, TriMat};

/// Converts our CSR matrix to an sprs `CsMat` in CSR storage
///
/// Goes through a triplet matrix because sprs requires strictly increasing
/// column indices per row; duplicate positions are summed on the way, which
/// leaves the matrix-vector product unchanged.
pub fn to_sprs_csr<T>(matrix: &SparseMatrixCSR<T>) -> CsMat<T>
where
    T: Copy + Num + Default,
{
    let mut triplets = TriMat::with_capacity((matrix.row_count(), matrix.col_count()), matrix.nnz());

    for i in 0..matrix.row_count() {
        for (j, &val) in matrix.row_iter(i) {
            triplets.add_triplet(i, j, val);
        }
    }

    triplets.to_csr()
}

/// Converts an sprs `CsMat` to our CSR matrix
pub fn from_sprs_csr<T>(matrix: CsMat<T>) -> SparseMatrixCSR<T>
where
    T: Copy + Num + Default,
{
    // Ensure matrix is in CSR format
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let shape = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    SparseMatrixCSR::new(shape.0, shape.1, indptr, indices, data)
}

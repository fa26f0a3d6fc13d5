//! Sequential sparse matrix-vector product
//!
//! Every row is reduced with a single accumulator in ascending storage
//! order, which makes results reproducible for a given input. The parallel
//! kernel in [`crate::parallel`] reuses [`SparseMatrixCSR::row_dot`] and so
//! produces bit-identical output.

use ndarray::{Array1, Array2, ArrayView1};
use num_traits::Num;
use std::ops::AddAssign;

use crate::error::{Result, SpmvError};
use crate::matrix::SparseMatrixCSR;

impl<T> SparseMatrixCSR<T>
where
    T: Copy + Num + AddAssign,
{
    /// Dot product of row `i` with `x`.
    ///
    /// `x` must already have been checked against `col_count()`.
    #[inline]
    pub(crate) fn row_dot(&self, i: usize, x: &[T]) -> T {
        let offsets = self.row_offsets();
        let start = offsets[i];
        let end = offsets[i + 1];

        let mut partial_sum = T::zero();
        for (&col, &val) in self.col_indices()[start..end]
            .iter()
            .zip(&self.values()[start..end])
        {
            partial_sum += x[col] * val;
        }
        partial_sum
    }

    pub(crate) fn check_input(&self, x: &[T]) -> Result<()> {
        if x.len() != self.col_count() {
            return Err(SpmvError::DimensionMismatch {
                expected: self.col_count(),
                found: x.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn check_output(&self, y: &[T]) -> Result<()> {
        if y.len() != self.row_count() {
            return Err(SpmvError::DimensionMismatch {
                expected: self.row_count(),
                found: y.len(),
            });
        }
        Ok(())
    }

    /// Computes `A * x`
    ///
    /// # Errors
    ///
    /// Returns [`SpmvError::DimensionMismatch`] when `x.len() != col_count()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use symspmv::SparseMatrixCSR;
    ///
    /// let a = SparseMatrixCSR::<f64>::new(
    ///     2, 2,
    ///     vec![0, 2, 3],
    ///     vec![0, 1, 0],
    ///     vec![4.0, 2.0, 2.0],
    /// );
    ///
    /// let y = a.multiply(&[1.0, 1.0]).unwrap();
    /// assert_eq!(y, vec![6.0, 2.0]);
    /// ```
    pub fn multiply(&self, x: &[T]) -> Result<Vec<T>> {
        let mut result = vec![T::zero(); self.row_count()];
        self.multiply_into(x, &mut result)?;
        Ok(result)
    }

    /// Computes `A * x` into a caller-provided buffer of length `row_count()`
    pub fn multiply_into(&self, x: &[T], y: &mut [T]) -> Result<()> {
        self.check_input(x)?;
        self.check_output(y)?;

        for (i, slot) in y.iter_mut().enumerate() {
            *slot = self.row_dot(i, x);
        }
        Ok(())
    }

    /// Computes `A * x` for an ndarray vector
    pub fn multiply_ndarray(&self, x: ArrayView1<'_, T>) -> Result<Array1<T>> {
        match x.as_slice() {
            Some(slice) => self.multiply(slice).map(Array1::from_vec),
            None => {
                // Strided view, copy to contiguous storage first
                let owned: Vec<T> = x.iter().copied().collect();
                self.multiply(&owned).map(Array1::from_vec)
            }
        }
    }

    /// Expands the matrix into a dense ndarray, summing duplicate entries
    pub fn to_dense(&self) -> Array2<T> {
        let mut dense = Array2::from_elem((self.row_count(), self.col_count()), T::zero());
        for i in 0..self.row_count() {
            for (j, &val) in self.row_iter(i) {
                dense[[i, j]] += val;
            }
        }
        dense
    }
}

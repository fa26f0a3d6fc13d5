//! Coordinate-to-CSR assembly with symmetric expansion
//!
//! Entries are collected per row in the order they arrive, each
//! off-diagonal entry also stored at its mirrored position. `finish`
//! sorts every row by (column, value) and flattens the rows into CSR
//! arrays. Duplicate positions are kept side by side, never merged.

use num_traits::Num;
use std::cmp::Ordering;

use crate::error::{Result, SpmvError};
use crate::matrix::SparseMatrixCSR;
use crate::utils::exclusive_scan;

/// Upper bound on the per-row capacity derived from a declared nnz count.
const MAX_ROW_RESERVE: usize = 64;

/// Total ordering used to break ties between entries in the same column.
pub trait TotalOrder: Copy {
    fn total_order(&self, other: &Self) -> Ordering;
}

macro_rules! impl_total_order_float {
    ($($t:ty),*) => {
        $(impl TotalOrder for $t {
            #[inline]
            fn total_order(&self, other: &Self) -> Ordering {
                self.total_cmp(other)
            }
        })*
    };
}

macro_rules! impl_total_order_int {
    ($($t:ty),*) => {
        $(impl TotalOrder for $t {
            #[inline]
            fn total_order(&self, other: &Self) -> Ordering {
                self.cmp(other)
            }
        })*
    };
}

impl_total_order_float!(f32, f64);
impl_total_order_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Builds a symmetric [`SparseMatrixCSR`] from lower- or upper-triangle entries
///
/// # Examples
///
/// ```
/// use symspmv::SymmetricAssembler;
///
/// let mut asm = SymmetricAssembler::new(3, 3);
/// asm.push(0, 0, 4.0).unwrap();
/// asm.push(1, 0, 2.0).unwrap();
/// asm.push(2, 2, 5.0).unwrap();
///
/// let a = asm.finish();
/// assert_eq!(a.nnz(), 4);
/// assert_eq!(a.multiply(&[1.0, 1.0, 1.0]).unwrap(), vec![6.0, 2.0, 5.0]);
/// ```
#[derive(Debug, Clone)]
pub struct SymmetricAssembler<T> {
    n_rows: usize,
    n_cols: usize,
    rows: Vec<Vec<(usize, T)>>,
    entries: usize,
}

impl<T> SymmetricAssembler<T>
where
    T: Copy + Num + TotalOrder,
{
    /// Creates an empty assembler for an `n_rows` × `n_cols` matrix
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        Self::with_capacity(n_rows, n_cols, 0)
    }

    /// Creates an assembler, pre-reserving room for about `nnz_hint` entries
    /// (before mirroring) spread evenly over the rows
    pub fn with_capacity(n_rows: usize, n_cols: usize, nnz_hint: usize) -> Self {
        let per_row = (nnz_hint.saturating_mul(2) / n_rows.max(1)).min(MAX_ROW_RESERVE);
        let rows = (0..n_rows).map(|_| Vec::with_capacity(per_row)).collect();

        Self {
            n_rows,
            n_cols,
            rows,
            entries: 0,
        }
    }

    /// Adds the entry at 0-based position (row, col) and, off the diagonal,
    /// its mirror at (col, row)
    ///
    /// # Errors
    ///
    /// Returns [`SpmvError::IndexOutOfBounds`] (reporting 1-based indices)
    /// when either position falls outside the matrix. Nothing is stored in
    /// that case.
    pub fn push(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        let fits = |r: usize, c: usize| r < self.n_rows && c < self.n_cols;
        if !fits(row, col) || (row != col && !fits(col, row)) {
            return Err(SpmvError::IndexOutOfBounds {
                line: 0,
                row: row + 1,
                col: col + 1,
                n_rows: self.n_rows,
                n_cols: self.n_cols,
            });
        }

        self.rows[row].push((col, value));
        if row != col {
            self.rows[col].push((row, value));
        }
        self.entries += 1;
        Ok(())
    }

    /// Number of entries pushed, not counting mirrors
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Number of entries that will be stored, mirrors included
    pub fn stored(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Declared `(rows, cols)` of the matrix being built
    pub fn dimensions(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    /// Sorts each row and compresses the rows into CSR form
    pub fn finish(self) -> SparseMatrixCSR<T> {
        let mut rows = self.rows;

        let counts: Vec<usize> = rows.iter().map(Vec::len).collect();
        let row_offsets = exclusive_scan(&counts);
        let nnz = row_offsets[self.n_rows];

        let mut col_indices = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);

        for row in rows.iter_mut() {
            row.sort_unstable_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.total_order(&b.1)));

            for &(col, val) in row.iter() {
                col_indices.push(col);
                values.push(val);
            }
        }

        SparseMatrixCSR::from_parts_unchecked(self.n_rows, self.n_cols, row_offsets, col_indices, values)
    }
}

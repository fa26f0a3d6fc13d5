//! Compressed Sparse Row (CSR) matrix format implementation

use std::fmt;
use num_traits::Num;

use crate::error::{Result, SpmvError};

/// A sparse matrix in Compressed Sparse Row (CSR) format
///
/// The CSR format stores a sparse matrix using three arrays:
/// - row_offsets: Array of size row_count + 1 containing indices into col_indices and values
/// - col_indices: Array of size nnz containing column indices of non-zero elements
/// - values: Array of size nnz containing the non-zero values
///
/// Within a row, column indices are sorted in non-decreasing order. The same
/// column may appear more than once when the source carried duplicate entries;
/// such entries are kept separately and add up when the matrix is applied.
///
/// The matrix is immutable once built, so a shared reference can be handed to
/// any number of reader threads.
#[derive(Clone, PartialEq)]
pub struct SparseMatrixCSR<T> {
    n_rows: usize,
    n_cols: usize,
    /// row_offsets[i] is the index in col_indices and values where row i starts;
    /// row_offsets[n_rows] is equal to nnz
    row_offsets: Vec<usize>,
    col_indices: Vec<usize>,
    values: Vec<T>,
}

impl<T> SparseMatrixCSR<T>
where
    T: Copy + Num,
{
    /// Creates a new CSR matrix with the given dimensions and data
    ///
    /// # Arguments
    ///
    /// * `n_rows` - Number of rows
    /// * `n_cols` - Number of columns
    /// * `row_offsets` - Row offsets
    /// * `col_indices` - Column indices
    /// * `values` - Non-zero values
    ///
    /// # Panics
    ///
    /// Panics if the arrays violate any CSR invariant. Use
    /// [`SparseMatrixCSR::try_new`] to get an error instead.
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        row_offsets: Vec<usize>,
        col_indices: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        match Self::try_new(n_rows, n_cols, row_offsets, col_indices, values) {
            Ok(matrix) => matrix,
            Err(err) => panic!("{}", err),
        }
    }

    /// Creates a new CSR matrix, checking that:
    /// - row_offsets.len() is n_rows + 1 and starts at 0
    /// - row_offsets is non-decreasing and ends at col_indices.len()
    /// - col_indices.len() equals values.len()
    /// - every column index is below n_cols
    /// - column indices are sorted within each row
    pub fn try_new(
        n_rows: usize,
        n_cols: usize,
        row_offsets: Vec<usize>,
        col_indices: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        let invalid = |msg: String| Err(SpmvError::InvalidStructure(msg));

        if row_offsets.len() != n_rows + 1 {
            return invalid(format!(
                "row_offsets.len() must be n_rows + 1 (got {}, n_rows = {})",
                row_offsets.len(),
                n_rows
            ));
        }
        if col_indices.len() != values.len() {
            return invalid(format!(
                "col_indices.len() must equal values.len() ({} != {})",
                col_indices.len(),
                values.len()
            ));
        }
        if row_offsets[0] != 0 {
            return invalid(format!("row_offsets[0] must be 0 (got {})", row_offsets[0]));
        }
        if row_offsets[n_rows] != col_indices.len() {
            return invalid(format!(
                "row_offsets[n_rows] must equal col_indices.len() ({} != {})",
                row_offsets[n_rows],
                col_indices.len()
            ));
        }

        for i in 0..n_rows {
            let (start, end) = (row_offsets[i], row_offsets[i + 1]);
            if start > end {
                return invalid(format!(
                    "row_offsets must be non-decreasing ({} > {} at row {})",
                    start, end, i
                ));
            }

            let row = &col_indices[start..end];
            if let Some(&col) = row.iter().find(|&&col| col >= n_cols) {
                return invalid(format!(
                    "Column index {} out of bounds (n_cols = {})",
                    col, n_cols
                ));
            }
            if row.windows(2).any(|w| w[0] > w[1]) {
                return invalid(format!("column indices of row {} are not sorted", i));
            }
        }

        Ok(Self {
            n_rows,
            n_cols,
            row_offsets,
            col_indices,
            values,
        })
    }

    /// Builds a matrix from parts already known to satisfy every invariant.
    pub(crate) fn from_parts_unchecked(
        n_rows: usize,
        n_cols: usize,
        row_offsets: Vec<usize>,
        col_indices: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        debug_assert_eq!(row_offsets.len(), n_rows + 1);
        debug_assert_eq!(col_indices.len(), values.len());
        Self {
            n_rows,
            n_cols,
            row_offsets,
            col_indices,
            values,
        }
    }

    /// Number of rows of the logical matrix
    pub fn row_count(&self) -> usize {
        self.n_rows
    }

    /// Number of columns of the logical matrix
    pub fn col_count(&self) -> usize {
        self.n_cols
    }

    /// Returns the number of stored elements in the matrix
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn row_offsets(&self) -> &[usize] {
        &self.row_offsets
    }

    pub fn col_indices(&self) -> &[usize] {
        &self.col_indices
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Returns an iterator over the stored elements in row i
    ///
    /// Each item is a tuple (col_idx, value) representing a stored element
    pub fn row_iter(&self, i: usize) -> impl Iterator<Item = (usize, &T)> {
        assert!(i < self.n_rows, "Row index out of bounds");

        let start = self.row_offsets[i];
        let end = self.row_offsets[i + 1];

        self.col_indices[start..end]
            .iter()
            .zip(&self.values[start..end])
            .map(|(&col, val)| (col, val))
    }

    /// Returns the logical value at (i, j): the sum of all stored entries
    /// at that position, or zero when there are none.
    pub fn get(&self, i: usize, j: usize) -> T {
        assert!(i < self.n_rows, "Row index out of bounds");
        assert!(j < self.n_cols, "Column index out of bounds");

        let start = self.row_offsets[i];
        let end = self.row_offsets[i + 1];
        let cols = &self.col_indices[start..end];

        let first = cols.partition_point(|&c| c < j);
        let last = cols.partition_point(|&c| c <= j);

        self.values[start + first..start + last]
            .iter()
            .fold(T::zero(), |acc, &v| acc + v)
    }

    /// Checks that the matrix is square and that every stored position
    /// (i, j) holds the same logical value as (j, i)
    pub fn is_symmetric(&self) -> bool {
        if self.n_rows != self.n_cols {
            return false;
        }

        (0..self.n_rows).all(|i| {
            self.row_iter(i)
                .all(|(j, _)| i == j || self.get(i, j) == self.get(j, i))
        })
    }

    /// Creates an empty matrix with the given dimensions
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            row_offsets: vec![0; n_rows + 1],
            col_indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Creates an identity matrix of the given size
    pub fn identity(n: usize) -> Self {
        Self {
            n_rows: n,
            n_cols: n,
            row_offsets: (0..=n).collect(),
            col_indices: (0..n).collect(),
            values: vec![T::one(); n],
        }
    }

    /// Consumes the matrix and returns `(row_offsets, col_indices, values)`
    pub fn into_raw_parts(self) -> (Vec<usize>, Vec<usize>, Vec<T>) {
        (self.row_offsets, self.col_indices, self.values)
    }
}

impl<T: fmt::Debug + Copy + Num> fmt::Debug for SparseMatrixCSR<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseMatrixCSR {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {}", self.nnz())?;

        let max_rows_to_print = 5.min(self.n_rows);

        if max_rows_to_print > 0 {
            writeln!(f, "  content sample:")?;

            for i in 0..max_rows_to_print {
                write!(f, "    row {}: ", i)?;
                let start = self.row_offsets[i];
                let end = self.row_offsets[i + 1];

                if start == end {
                    writeln!(f, "(empty)")?;
                    continue;
                }

                let max_elements = 5.min(end - start);
                for j in start..(start + max_elements) {
                    write!(f, "({}, {:?}) ", self.col_indices[j], self.values[j])?;
                }
                if end - start > max_elements {
                    write!(f, "... ({} more)", end - start - max_elements)?;
                }
                writeln!(f)?;
            }

            if self.n_rows > max_rows_to_print {
                writeln!(f, "    ... ({} more rows)", self.n_rows - max_rows_to_print)?;
            }
        }

        write!(f, "}}")
    }
}

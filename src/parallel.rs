//! # Parallel sparse matrix-vector product
//!
//! Rows carry no dependency on each other, so the output vector is split
//! into disjoint contiguous chunks and each rayon task fills one chunk.
//! Workers only read the matrix and the input vector.
//!
//! Each row is still reduced sequentially with [`SparseMatrixCSR::row_dot`],
//! so the result is bit-identical to [`SparseMatrixCSR::multiply`].

use num_traits::Num;
use rayon::prelude::*;
use std::ops::AddAssign;

use crate::error::Result;
use crate::matrix::{SparseMatrixCSR, SpmvConfig};

impl<T> SparseMatrixCSR<T>
where
    T: Copy + Num + AddAssign + Send + Sync,
{
    /// Computes `A * x` on the current rayon pool
    ///
    /// # Examples
    ///
    /// ```
    /// use symspmv::SparseMatrixCSR;
    ///
    /// let a = SparseMatrixCSR::<f64>::identity(3);
    /// let y = a.multiply_parallel(&[1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(y, vec![1.0, 2.0, 3.0]);
    /// ```
    pub fn multiply_parallel(&self, x: &[T]) -> Result<Vec<T>> {
        let config = SpmvConfig::parallel().with_threads(rayon::current_num_threads());
        let mut result = vec![T::zero(); self.row_count()];
        self.multiply_parallel_into(x, &mut result, config.chunk_size(self.row_count()))?;
        Ok(result)
    }

    /// Computes `A * x` using the scheduling described by `config`
    ///
    /// A dedicated pool is built when `config.n_threads` differs from the
    /// size of the global rayon pool. That pool is created and torn down on
    /// every call; callers repeating products should build one pool and use
    /// [`SparseMatrixCSR::multiply_in_pool`].
    pub fn multiply_with_config(&self, x: &[T], config: &SpmvConfig) -> Result<Vec<T>> {
        if !config.use_parallel(self.row_count()) {
            log::debug!("sequential product over {} rows", self.row_count());
            return self.multiply(x);
        }

        let chunk = config.chunk_size(self.row_count());
        log::debug!(
            "parallel product over {} rows: {} threads, {} rows per task",
            self.row_count(),
            config.n_threads,
            chunk
        );

        let mut result = vec![T::zero(); self.row_count()];
        if config.n_threads == rayon::current_num_threads() {
            self.multiply_parallel_into(x, &mut result, chunk)?;
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.n_threads)
                .build()?;
            pool.install(|| self.multiply_parallel_into(x, &mut result, chunk))?;
        }
        Ok(result)
    }

    /// Computes `A * x` on a caller-owned pool, ignoring `config.n_threads`
    pub fn multiply_in_pool(
        &self,
        x: &[T],
        pool: &rayon::ThreadPool,
        config: &SpmvConfig,
    ) -> Result<Vec<T>> {
        let chunk = config
            .clone()
            .with_threads(pool.current_num_threads())
            .chunk_size(self.row_count());

        let mut result = vec![T::zero(); self.row_count()];
        pool.install(|| self.multiply_parallel_into(x, &mut result, chunk))?;
        Ok(result)
    }

    fn multiply_parallel_into(&self, x: &[T], y: &mut [T], chunk: usize) -> Result<()> {
        self.check_input(x)?;
        self.check_output(y)?;

        let chunk = chunk.max(1);
        y.par_chunks_mut(chunk)
            .enumerate()
            .for_each(|(c, out)| {
                let base = c * chunk;
                for (k, slot) in out.iter_mut().enumerate() {
                    *slot = self.row_dot(base + k, x);
                }
            });
        Ok(())
    }
}

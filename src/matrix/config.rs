//! Execution configuration for the multiply kernels

/// How a product is scheduled across threads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Single thread, rows in order
    Sequential,
    /// Rows partitioned across a rayon pool
    Parallel,
    /// Parallel only for matrices large enough to amortize the scheduling cost
    Auto,
}

/// Configuration for sparse matrix-vector products
#[derive(Debug, Clone)]
pub struct SpmvConfig {
    /// Scheduling strategy
    pub strategy: ExecutionStrategy,

    /// Number of worker threads for parallel execution
    pub n_threads: usize,

    /// Minimum row count for `Auto` to pick the parallel kernel
    pub parallel_row_threshold: usize,

    /// Smallest block of consecutive rows handed to a single worker
    pub min_rows_per_task: usize,
}

impl Default for SpmvConfig {
    fn default() -> Self {
        Self {
            strategy: ExecutionStrategy::Auto,
            n_threads: num_cpus::get(), // Use all available cores
            parallel_row_threshold: 4096,
            min_rows_per_task: 256,
        }
    }
}

impl SpmvConfig {
    /// Always run on the calling thread
    pub fn sequential() -> Self {
        Self {
            strategy: ExecutionStrategy::Sequential,
            n_threads: 1,
            ..Self::default()
        }
    }

    /// Always use the parallel kernel
    pub fn parallel() -> Self {
        Self {
            strategy: ExecutionStrategy::Parallel,
            ..Self::default()
        }
    }

    pub fn with_threads(mut self, n_threads: usize) -> Self {
        self.n_threads = n_threads.max(1);
        self
    }

    pub fn with_min_rows_per_task(mut self, rows: usize) -> Self {
        self.min_rows_per_task = rows.max(1);
        self
    }

    /// Whether a matrix with `n_rows` rows should go to the parallel kernel
    pub fn use_parallel(&self, n_rows: usize) -> bool {
        match self.strategy {
            ExecutionStrategy::Sequential => false,
            ExecutionStrategy::Parallel => true,
            ExecutionStrategy::Auto => {
                self.n_threads > 1 && n_rows >= self.parallel_row_threshold
            }
        }
    }

    /// Rows per task so that each thread gets a few tasks to balance load
    pub fn chunk_size(&self, n_rows: usize) -> usize {
        let tasks = self.n_threads.max(1) * 4;
        let even_split = (n_rows + tasks - 1) / tasks;
        even_split.max(self.min_rows_per_task).max(1)
    }
}

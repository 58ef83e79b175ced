//! Row-level execution engine.
//!
//! ## Purpose
//!
//! This module applies one validated estimator to every row of a
//! [`SpectrumTable`], either one row after another or on a dedicated rayon
//! pool of `worker_count` threads.
//!
//! ## Design notes
//!
//! * **Independent rows**: Each worker returns an immutable result for its
//!   row; nothing is shared or locked between rows.
//! * **Ordered slots**: Results are collected by row index, so completion
//!   order never shows in the output.
//! * **Isolation**: A failing row yields `Err` in its own slot.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Invariants
//!
//! * `results[i]` belongs to `table.rows[i]` in both modes.
//! * Sequential and parallel runs give identical results.
//!
//! ## Non-goals
//!
//! * This module does not read or write files.
//! * This module does not retry failed rows.

// Feature-gated imports
#[cfg(feature = "parallel")]
use rayon::prelude::*;

// External dependencies
use log::{debug, warn};
use num_traits::Float;

// Export dependencies from snt crate
use snt::prelude::{Header, RowResult, Snt};

// Internal dependencies
use crate::error::BatchError;
use crate::table::SpectrumTable;

/// Outcome of one row.
pub type RowOutcome<T> = Result<RowResult<T>, BatchError>;

// ============================================================================
// Batch Executor
// ============================================================================

/// Applies an estimator to many rows.
#[derive(Debug, Clone)]
pub struct BatchExecutor<T> {
    snt: Snt<T>,
    run_parallel: bool,
    worker_count: usize,
}

impl<T> BatchExecutor<T>
where
    T: Float + Send + Sync,
{
    /// Create an executor. `worker_count` is only used when `run_parallel` is set.
    pub fn new(snt: Snt<T>, run_parallel: bool, worker_count: usize) -> Self {
        Self {
            snt,
            run_parallel,
            worker_count: worker_count.max(1),
        }
    }

    /// Single-row estimator.
    pub fn estimator(&self) -> &Snt<T> {
        &self.snt
    }

    /// Whether rows run on a worker pool.
    pub fn is_parallel(&self) -> bool {
        self.run_parallel
    }

    /// Threads in the worker pool.
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Estimate one row, tagging a failure with its index.
    pub fn fit_row(&self, row: usize, wavelength: &[T], flux: &[T], header: Option<&Header>) -> RowOutcome<T> {
        let result = match header {
            Some(h) => self.snt.fit_with_header(wavelength, flux, h),
            None => self.snt.fit(wavelength, flux),
        };
        result.map_err(|source| BatchError::Row { row, source })
    }

    /// Estimate every row of `table`.
    ///
    /// The outer error is reserved for failures that stop the whole batch
    /// (the worker pool could not be started); row failures are inner.
    pub fn run(&self, table: &SpectrumTable<T>, header: Option<&Header>) -> Result<Vec<RowOutcome<T>>, BatchError> {
        debug!(
            "Batch of {} rows, {}",
            table.len(),
            if self.run_parallel { "parallel" } else { "sequential" }
        );

        let results = if self.run_parallel {
            self.run_pooled(table, header)?
        } else {
            self.run_sequential(table, header)
        };

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            warn!("{failed} of {} rows failed", results.len());
        }
        Ok(results)
    }

    /// Estimate every row on the calling thread.
    pub fn run_sequential(&self, table: &SpectrumTable<T>, header: Option<&Header>) -> Vec<RowOutcome<T>> {
        table
            .rows
            .iter()
            .enumerate()
            .map(|(i, flux)| self.fit_row(i, &table.wavelength, flux, header))
            .collect()
    }

    /// Estimate every row on a pool of `worker_count` threads.
    #[cfg(feature = "parallel")]
    pub fn run_pooled(&self, table: &SpectrumTable<T>, header: Option<&Header>) -> Result<Vec<RowOutcome<T>>, BatchError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.worker_count)
            .build()?;

        Ok(pool.install(|| {
            table
                .rows
                .par_iter()
                .enumerate()
                .map(|(i, flux)| self.fit_row(i, &table.wavelength, flux, header))
                .collect()
        }))
    }

    /// Without the `parallel` feature rows run on the calling thread.
    #[cfg(not(feature = "parallel"))]
    pub fn run_pooled(&self, table: &SpectrumTable<T>, header: Option<&Header>) -> Result<Vec<RowOutcome<T>>, BatchError> {
        warn!("Built without the `parallel` feature; running rows sequentially");
        Ok(self.run_sequential(table, header))
    }
}

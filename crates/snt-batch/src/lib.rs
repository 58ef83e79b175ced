//! # snt-batch
//!
//! Batch continuum estimation built on [`snt`]: many flux rows on one
//! wavelength grid, processed one after another or on a rayon worker pool,
//! configured from JSON and exchanged as CSV.
//!
//! ## Quick Start
//!
//! ```rust
//! use snt_batch::prelude::*;
//!
//! let wavelength: Vec<f64> = (0..400).map(|i| 5500.0 + i as f64 * 0.05).collect();
//! let rows = (0..4)
//!     .map(|k| wavelength.iter().map(|&w| 1.0 + 0.01 * (w * (k as f64 + 1.0)).sin()).collect())
//!     .collect();
//! let table = SpectrumTable::unnamed(wavelength, rows)?;
//!
//! let config = BatchConfig {
//!     resolution: ResolutionSpec::Wavelength(0.2),
//!     run_parallel: true,
//!     worker_count: 2,
//!     ..BatchConfig::default()
//! };
//! let results = config.build()?.run(&table, None)?;
//!
//! assert_eq!(results.len(), 4);
//! # Result::<(), BatchError>::Ok(())
//! ```
//!
//! ## Parallelism
//!
//! With the default `parallel` feature, `run_parallel = true` runs rows on a
//! dedicated pool of `worker_count` threads. Results always come back in
//! row order and a failing row only fails its own slot.
//!
//! ## Command line
//!
//! The `snt` binary wraps this crate:
//!
//! ```bash
//! snt normalize spectra.csv --fwhm 0.12 --out results/
//! snt normalize spectra.csv --config run.json --header header.json
//! snt describe
//! ```

// Layer 1: Table - spectra on a shared grid.
mod table;

// Error types.
mod error;

// Layer 2: Engine - row distribution.
mod engine;

// Layer 3: I/O and configuration.
mod io;
mod config;

// High-level API.
pub mod api;

// Standard snt-batch prelude.
pub mod prelude {
    pub use crate::api::{
        read_header, read_table, write_outputs, BatchConfig, BatchError, BatchExecutor, ResolutionSpec, RowOutcome,
        SpectrumTable,
    };
}

// Internal modules for development and testing.
//
// Only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod table {
        pub use crate::table::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod io {
        pub use crate::io::*;
    }
    pub mod config {
        pub use crate::config::*;
    }
}

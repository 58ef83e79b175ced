//! High-level API for batch continuum estimation.
//!
//! ## Purpose
//!
//! Collects the types a batch run needs: the JSON configuration, the table
//! of spectra, the executor, and the CSV readers and writers.
//!
//! ### Workflow
//!
//! 1. Load a [`BatchConfig`] (or start from its default).
//! 2. `config.build()` validates every option and returns a [`BatchExecutor`].
//! 3. Read a [`SpectrumTable`], run it, write the outputs.

pub use crate::config::{BatchConfig, ResolutionSpec, BATCH_OPTIONS};
pub use crate::engine::executor::{BatchExecutor, RowOutcome};
pub use crate::error::BatchError;
pub use crate::io::reader::{read_header, read_table, read_table_from};
pub use crate::io::writer::{
    write_anchors, write_candidates, write_continuum, write_outputs, write_penalty, OutputFiles, ANCHORS_FILE,
    CANDIDATES_FILE, CONTINUUM_FILE, PENALTY_FILE,
};
pub use crate::table::SpectrumTable;

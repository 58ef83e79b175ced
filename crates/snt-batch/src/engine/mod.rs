//! Layer 2: Engine
//!
//! # Purpose
//!
//! This layer distributes the rows of a spectrum table over the single-row
//! estimator, one after another or on a rayon worker pool.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: I/O and configuration
//!   ↓
//! Layer 2: Engine ← You are here
//!   ↓
//! Layer 1: Table
//!   ↓
//! snt
//! ```

/// Row-level execution engine.
pub mod executor;

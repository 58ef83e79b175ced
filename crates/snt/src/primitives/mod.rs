//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the data structures shared by every stage of the
//! pipeline: spectra, anchors, the penalty step function and the error type.
//! It has zero internal dependencies within the crate.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Shared error types.
pub mod errors;

/// Wavelength/flux sample sequences.
pub mod spectrum;

/// Anchor points and mark-then-compact removal.
pub mod anchors;

/// Piecewise-constant lookup tables.
pub mod step;

/// Line width given directly, as a velocity, or by header keyword.
pub mod resolution;

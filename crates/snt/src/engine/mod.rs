//! Layer 4: Engine
//!
//! # Purpose
//!
//! This layer orchestrates the algorithms over one row. It validates the
//! row, runs every stage in order, applies the documented fallbacks and
//! packages the outcome as a result record.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Single-row execution engine and configuration.
pub mod executor;

/// Validation utilities.
pub mod validator;

/// Per-row result record.
pub mod output;

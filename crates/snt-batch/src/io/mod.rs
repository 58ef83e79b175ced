//! Layer 3: I/O
//!
//! # Purpose
//!
//! This layer moves data between files and the batch engine: spectrum
//! tables and header keywords in, continua and diagnostics out.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: I/O and configuration ← You are here
//!   ↓
//! Layer 2: Engine
//!   ↓
//! Layer 1: Table
//!   ↓
//! snt
//! ```

/// CSV spectrum tables and JSON header files.
pub mod reader;

/// CSV continuum and diagnostic files.
pub mod writer;

//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer implements the stages of continuum estimation, each as a pure
//! function of its inputs:
//!
//! - Pre-filtering (drop, rolling clip, smoothing)
//! - Peak detection
//! - Penalty map and plateau step function
//! - Search radius
//! - Boundary walk
//! - Anchor refinement and denoising
//! - Interpolation
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Local-median re-valuation of anchors.
pub mod denoise;

/// Linear and cubic interpolation.
pub mod interpolation;

/// Local-maximum detection.
pub mod peaks;

/// Dual-window penalty map.
pub mod penalty;

/// Drop, clip and smooth raw spectra.
pub mod prefilter;

/// Wavelength-dependent search radius.
pub mod radius;

/// Sharp-peak and close-point pruning.
pub mod refine;

/// Boundary walk over candidate maxima.
pub mod walker;

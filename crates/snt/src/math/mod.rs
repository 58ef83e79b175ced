//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure numerical functions: order statistics and the
//! polynomial smoothing filter. Nothing here knows about anchors or spectra.
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
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

// External dependencies
use num_traits::Float;

/// Percentiles, medians and IQR bounds.
pub mod quantile;

/// Savitzky-Golay smoothing.
pub mod savgol;

/// Convert an `f64` literal into the working float type.
#[inline]
pub fn lit<T: Float>(v: f64) -> T {
    T::from(v).unwrap_or_else(T::nan)
}

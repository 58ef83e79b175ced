//! # SNT: Continuum estimation for 1-D spectra
//!
//! Estimates the smooth continuum of a noisy spectrum (flux sampled at
//! increasing wavelength) so the spectrum can be normalized by it.
//!
//! ## How it works
//!
//! 1. **Pre-filter**: leading samples are dropped, upward spikes are clipped
//!    window by window, and the flux is optionally smoothed.
//! 2. **Penalty map**: rolling-maximum envelopes at 40 and 400 FWHM show
//!    where absorption gaps are wider than the small window can bridge.
//! 3. **Boundary walk**: a disc whose radius grows with the penalty is rolled
//!    along the local maxima; the points it touches become anchors.
//! 4. **Refinement**: the sharpest peaks and abnormally close pairs are
//!    removed; anchors may be re-valued with a local median.
//! 5. **Interpolation**: a linear or not-a-knot cubic continuum through the
//!    anchors is evaluated at every input wavelength.
//!
//! ## Quick Start
//!
//! ```rust
//! use snt::prelude::*;
//!
//! let wavelength: Vec<f64> = (0..600).map(|i| 5000.0 + i as f64 * 0.05).collect();
//! let flux: Vec<f64> = wavelength
//!     .iter()
//!     .map(|&w| {
//!         let line = 0.6 * (-((w - 5012.0) / 0.3).powi(2)).exp();
//!         (1.0 + 1e-4 * (w - 5000.0) + 2e-3 * (7.0 * w).sin()) * (1.0 - line)
//!     })
//!     .collect();
//!
//! let snt = Snt::builder()
//!     .fwhm(0.1)              // line width in wavelength units
//!     .radius_max(30.0)
//!     .interpolation(Cubic)
//!     .build()?;
//!
//! let result = snt.fit(&wavelength, &flux)?;
//! assert_eq!(result.continuum.len(), wavelength.len());
//! println!("{}", result);
//! # Result::<(), SntError>::Ok(())
//! ```
//!
//! ## Line width
//!
//! The FWHM may be given in wavelength units ([`fwhm`](api::SntBuilder::fwhm)),
//! as a velocity in km/s ([`fwhm_velocity`](api::SntBuilder::fwhm_velocity)),
//! or read from a header keyword
//! ([`fwhm_header`](api::SntBuilder::fwhm_header), default
//! `HIERARCH ESO QC CCF FWHM`).
//!
//! ## Errors
//!
//! Option errors are reported by `build()`; data errors by `fit()`. See
//! [`SntError`](prelude::SntError).

// Layer 1: Primitives - data structures and basic utilities.
mod primitives;

// Layer 2: Math - pure numerical functions.
mod math;

// Layer 3: Algorithms - pipeline stages.
mod algorithms;

// Layer 4: Engine - single-row orchestration.
mod engine;

// High-level fluent API.
pub mod api;

// Standard SNT prelude.
pub mod prelude {
    pub use crate::api::{
        describe, Anchor, Header, InterpolationKind,
        InterpolationKind::{Cubic, Linear},
        OptionInfo, Resolution, RowResult, Snt, SntBuilder, SntConfig, SntError, DEFAULT_FWHM_KEY,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}

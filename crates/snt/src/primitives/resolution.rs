//! Instrumental line width.
//!
//! ## Purpose
//!
//! The penalty-map window sizes are multiples of the line FWHM expressed in
//! wavelength units. Callers may give it directly, as a velocity width, or
//! as the name of a header keyword holding a velocity width.
//!
//! ## Key concepts
//!
//! A velocity width `v` (km/s) converts at the shortest wavelength:
//!
//! ```text
//! fwhm_wl = lambda_min · v / (c / 1000)
//! ```

// External dependencies
use std::collections::HashMap;
use num_traits::Float;

// Internal dependencies
use crate::math::lit;
use crate::primitives::errors::SntError;

/// Speed of light in m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Header keyword read when no other resolution is configured.
pub const DEFAULT_FWHM_KEY: &str = "HIERARCH ESO QC CCF FWHM";

/// Header keywords with numeric values.
pub type Header = HashMap<String, f64>;

/// Source of the line FWHM.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<T> {
    /// FWHM already in wavelength units.
    Wavelength(T),

    /// FWHM as a velocity width in km/s.
    Velocity(T),

    /// Header keyword holding a velocity width in km/s.
    Header(String),
}

impl<T: Float> Default for Resolution<T> {
    fn default() -> Self {
        Self::Header(DEFAULT_FWHM_KEY.to_string())
    }
}

impl<T: Float> Resolution<T> {
    /// FWHM in wavelength units for a row starting at `lambda_min`.
    pub fn resolve(&self, lambda_min: T, header: Option<&Header>) -> Result<T, SntError> {
        let fwhm = match self {
            Self::Wavelength(w) => *w,
            Self::Velocity(kms) => velocity_to_wavelength(*kms, lambda_min),
            Self::Header(key) => {
                let kms = header
                    .and_then(|h| h.get(key))
                    .copied()
                    .ok_or_else(|| SntError::InvalidInput(format!("header keyword '{key}' not found")))?;
                velocity_to_wavelength(lit(kms), lambda_min)
            }
        };

        if !(fwhm > T::zero()) || !fwhm.is_finite() {
            return Err(SntError::InvalidInput(format!(
                "line width must be positive, got {} in wavelength units",
                fwhm.to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(fwhm)
    }
}

/// Convert a km/s width to wavelength units at `lambda`.
#[inline]
pub fn velocity_to_wavelength<T: Float>(kms: T, lambda: T) -> T {
    lambda * kms / lit(SPEED_OF_LIGHT / 1000.0)
}

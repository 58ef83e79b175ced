//! Input and configuration validation.
//!
//! ## Purpose
//!
//! Every configuration option has one validation function here. The builder
//! calls them all from `build()`, so a bad option is reported before any row
//! is processed. Input arrays are checked once per row by the executor.
//!
//! ## Design notes
//!
//! * **Fail-fast**: The first violation is returned.
//! * **Side-effect free**: Nothing is corrected or reordered.
//!
//! ## Non-goals
//!
//! * This module does not sort or deduplicate wavelengths.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::SntError;
use crate::primitives::resolution::Resolution;

// ============================================================================
// Validator
// ============================================================================

/// Validation functions for configuration options and row data.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Row Validation
    // ========================================================================

    /// Validate one row: non-empty, equal lengths, finite, strictly increasing.
    pub fn validate_inputs<T: Float>(wavelength: &[T], flux: &[T]) -> Result<(), SntError> {
        if wavelength.is_empty() || flux.is_empty() {
            return Err(SntError::EmptyInput);
        }

        if wavelength.len() != flux.len() {
            return Err(SntError::MismatchedInputs {
                wavelength_len: wavelength.len(),
                flux_len: flux.len(),
            });
        }

        for (i, (&x, &y)) in wavelength.iter().zip(flux).enumerate() {
            if !x.is_finite() {
                return Err(SntError::InvalidInput(format!(
                    "wavelength[{}]={}",
                    i,
                    x.to_f64().unwrap_or(f64::NAN)
                )));
            }
            if !y.is_finite() {
                return Err(SntError::InvalidInput(format!(
                    "flux[{}]={}",
                    i,
                    y.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }

        if let Some(i) = wavelength.windows(2).position(|w| w[0] >= w[1]) {
            return Err(SntError::InvalidInput(format!(
                "wavelength must be strictly increasing (index {})",
                i + 1
            )));
        }

        Ok(())
    }

    /// The adaptive radius scales with `x / lambda_min`.
    pub fn validate_lambda_min<T: Float>(lambda_min: T, adaptive: bool) -> Result<(), SntError> {
        if adaptive && !(lambda_min > T::zero()) {
            return Err(SntError::InvalidInput(format!(
                "adaptive radius requires positive wavelengths, got lambda_min={}",
                lambda_min.to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(())
    }

    // ========================================================================
    // Option Validation
    // ========================================================================

    /// Validate a radius bound (`radius_min` or `radius_max`).
    pub fn validate_radius<T: Float>(radius: T, parameter: &'static str) -> Result<(), SntError> {
        if !radius.is_finite() || radius < T::zero() {
            return Err(SntError::config(
                parameter,
                format!(
                    "must be a finite value >= 0, got {}",
                    radius.to_f64().unwrap_or(f64::NAN)
                ),
            ));
        }
        Ok(())
    }

    /// `radius_max` must not be below `radius_min`.
    pub fn validate_radius_order<T: Float>(radius_min: T, radius_max: T) -> Result<(), SntError> {
        if radius_max < radius_min {
            return Err(SntError::config(
                "radius_max",
                format!(
                    "must be >= radius_min ({} < {})",
                    radius_max.to_f64().unwrap_or(f64::NAN),
                    radius_min.to_f64().unwrap_or(f64::NAN)
                ),
            ));
        }
        Ok(())
    }

    /// Validate the flux stretching factor.
    pub fn validate_stretch<T: Float>(stretch: T) -> Result<(), SntError> {
        if !stretch.is_finite() || stretch <= T::zero() {
            return Err(SntError::config(
                "stretch",
                format!(
                    "must be a finite value > 0, got {}",
                    stretch.to_f64().unwrap_or(f64::NAN)
                ),
            ));
        }
        Ok(())
    }

    /// Validate the penalty exponent.
    pub fn validate_penalty_exponent<T: Float>(nu: T) -> Result<(), SntError> {
        if !nu.is_finite() {
            return Err(SntError::config("penalty_exponent", "must be finite"));
        }
        Ok(())
    }

    /// Validate the clipping window length.
    pub fn validate_clip_window(window: usize) -> Result<(), SntError> {
        if window < 1 {
            return Err(SntError::config("clip_window", "must be >= 1"));
        }
        Ok(())
    }

    /// Validate the batch worker count.
    pub fn validate_worker_count(workers: usize) -> Result<(), SntError> {
        if workers < 1 {
            return Err(SntError::config("worker_count", "must be >= 1"));
        }
        Ok(())
    }

    /// Validate a statically known line width.
    pub fn validate_resolution<T: Float>(resolution: &Resolution<T>) -> Result<(), SntError> {
        let (width, unit) = match resolution {
            Resolution::Wavelength(w) => (*w, "wavelength"),
            Resolution::Velocity(v) => (*v, "velocity"),
            Resolution::Header(key) => {
                if key.trim().is_empty() {
                    return Err(SntError::config("resolution", "header keyword is empty"));
                }
                return Ok(());
            }
        };
        if !width.is_finite() || width <= T::zero() {
            return Err(SntError::config(
                "resolution",
                format!(
                    "{} width must be a finite value > 0, got {}",
                    unit,
                    width.to_f64().unwrap_or(f64::NAN)
                ),
            ));
        }
        Ok(())
    }

    /// Validate that no option was set twice in the builder.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), SntError> {
        if let Some(param) = duplicate_param {
            return Err(SntError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}

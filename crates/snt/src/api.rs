//! High-level API for continuum estimation.
//!
//! ## Purpose
//!
//! This module provides the user-facing entry point: a fluent builder that
//! collects options, validates them once in `build()`, and returns an
//! [`Snt`] estimator that can be applied to any number of rows.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Every option has a default; set only what differs.
//! * **Validated**: All checks run in `build()`, before any row is processed.
//! * **Strict**: Setting the same option twice is an error.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`SntBuilder`] via `Snt::builder()` or `SntBuilder::new()`.
//! 2. Chain configuration methods (`.radius_max()`, `.fwhm()`, etc.).
//! 3. Call `.build()` and run `.fit()` on each row.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::engine::executor::{SntExecutor, OPTIONS};

// Publicly re-exported types
pub use crate::algorithms::interpolation::InterpolationKind;
pub use crate::algorithms::penalty::PenaltyMap;
pub use crate::engine::executor::{OptionInfo, SntConfig};
pub use crate::engine::output::RowResult;
pub use crate::engine::validator::Validator;
pub use crate::primitives::anchors::Anchor;
pub use crate::primitives::errors::SntError;
pub use crate::primitives::resolution::{Header, Resolution, DEFAULT_FWHM_KEY};
pub use crate::primitives::spectrum::Spectrum;
pub use crate::primitives::step::StepFunction;

/// Name, description and default of every configuration option.
pub fn describe() -> &'static [OptionInfo] {
    OPTIONS
}

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for continuum estimation options.
#[derive(Debug, Clone)]
pub struct SntBuilder<T> {
    /// Leading samples to drop.
    pub drop_first_n: Option<usize>,

    /// Minimum search radius.
    pub radius_min: Option<T>,

    /// Maximum search radius.
    pub radius_max: Option<T>,

    /// Minimum separation between candidate maxima.
    pub max_vicinity: Option<usize>,

    /// Flux stretching factor.
    pub stretch: Option<T>,

    /// Penalty-driven radius.
    pub use_adaptive_radius: Option<bool>,

    /// Interpolation kind.
    pub interpolation: Option<InterpolationKind>,

    /// Local-median anchor values.
    pub use_denoise: Option<bool>,

    /// Savitzky-Golay smoothing.
    pub use_smoothing_filter: Option<bool>,

    /// Penalty exponent.
    pub penalty_exponent: Option<T>,

    /// Sharp-peak removal rounds.
    pub sharpness_iterations: Option<usize>,

    /// Denoising half-window.
    pub denoise_window: Option<usize>,

    /// Rolling-clip window.
    pub clip_window: Option<usize>,

    /// Source of the line width.
    pub resolution: Option<Resolution<T>>,

    /// First error raised by a setter, reported by `build()`.
    #[doc(hidden)]
    pub deferred_error: Option<SntError>,

    /// Tracks if any option was set multiple times.
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for SntBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Record a setter call, flagging repeats.
macro_rules! set_once {
    ($self:ident, $field:ident, $value:expr) => {{
        if $self.$field.is_some() {
            $self.duplicate_param = Some(stringify!($field));
        }
        $self.$field = Some($value);
        $self
    }};
}

impl<T: Float> SntBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            drop_first_n: None,
            radius_min: None,
            radius_max: None,
            max_vicinity: None,
            stretch: None,
            use_adaptive_radius: None,
            interpolation: None,
            use_denoise: None,
            use_smoothing_filter: None,
            penalty_exponent: None,
            sharpness_iterations: None,
            denoise_window: None,
            clip_window: None,
            resolution: None,
            deferred_error: None,
            duplicate_param: None,
        }
    }

    /// Drop the first `n` samples of every row.
    pub fn drop_first_n(mut self, n: usize) -> Self {
        set_once!(self, drop_first_n, n)
    }

    /// Set the minimum search radius.
    pub fn radius_min(mut self, radius: T) -> Self {
        set_once!(self, radius_min, radius)
    }

    /// Set the maximum search radius (at least the width of the largest gap).
    pub fn radius_max(mut self, radius: T) -> Self {
        set_once!(self, radius_max, radius)
    }

    /// Set the minimum number of samples between candidate maxima.
    pub fn max_vicinity(mut self, samples: usize) -> Self {
        set_once!(self, max_vicinity, samples)
    }

    /// Set the flux stretching factor.
    pub fn stretch(mut self, stretch: T) -> Self {
        set_once!(self, stretch, stretch)
    }

    /// Enable or disable the penalty-driven radius.
    pub fn adaptive_radius(mut self, enabled: bool) -> Self {
        set_once!(self, use_adaptive_radius, enabled)
    }

    /// Set the interpolation kind.
    pub fn interpolation(mut self, kind: InterpolationKind) -> Self {
        set_once!(self, interpolation, kind)
    }

    /// Set the interpolation kind by name (`"linear"` or `"cubic"`).
    pub fn interpolation_name(mut self, name: &str) -> Self {
        match name.parse() {
            Ok(kind) => set_once!(self, interpolation, kind),
            Err(e) => {
                self.deferred_error.get_or_insert(e);
                self
            }
        }
    }

    /// Replace anchor flux with the local median of the cleaned flux.
    pub fn denoise(mut self, enabled: bool) -> Self {
        set_once!(self, use_denoise, enabled)
    }

    /// Enable or disable Savitzky-Golay smoothing.
    pub fn smoothing_filter(mut self, enabled: bool) -> Self {
        set_once!(self, use_smoothing_filter, enabled)
    }

    /// Set the exponent applied to the penalty.
    pub fn penalty_exponent(mut self, nu: T) -> Self {
        set_once!(self, penalty_exponent, nu)
    }

    /// Set the number of sharp-peak removal rounds.
    pub fn sharpness_iterations(mut self, rounds: usize) -> Self {
        set_once!(self, sharpness_iterations, rounds)
    }

    /// Set the denoising half-window in samples.
    pub fn denoise_window(mut self, samples: usize) -> Self {
        set_once!(self, denoise_window, samples)
    }

    /// Set the rolling-clip window in samples.
    pub fn clip_window(mut self, samples: usize) -> Self {
        set_once!(self, clip_window, samples)
    }

    /// Set the line width source.
    pub fn resolution(mut self, resolution: Resolution<T>) -> Self {
        set_once!(self, resolution, resolution)
    }

    /// Line width in wavelength units.
    pub fn fwhm(self, width: T) -> Self {
        self.resolution(Resolution::Wavelength(width))
    }

    /// Line width as a velocity in km/s.
    pub fn fwhm_velocity(self, kms: T) -> Self {
        self.resolution(Resolution::Velocity(kms))
    }

    /// Read the velocity line width from a header keyword.
    pub fn fwhm_header(self, key: impl Into<String>) -> Self {
        self.resolution(Resolution::Header(key.into()))
    }

    /// Validate every option and build the estimator.
    pub fn build(self) -> Result<Snt<T>, SntError> {
        if let Some(err) = self.deferred_error {
            return Err(err);
        }

        Validator::validate_no_duplicates(self.duplicate_param)?;

        let d = SntConfig::<T>::default();
        let config = SntConfig {
            drop_first_n: self.drop_first_n.unwrap_or(d.drop_first_n),
            radius_min: self.radius_min.unwrap_or(d.radius_min),
            radius_max: self.radius_max.unwrap_or(d.radius_max),
            max_vicinity: self.max_vicinity.unwrap_or(d.max_vicinity),
            stretch: self.stretch.unwrap_or(d.stretch),
            use_adaptive_radius: self.use_adaptive_radius.unwrap_or(d.use_adaptive_radius),
            interpolation: self.interpolation.unwrap_or(d.interpolation),
            use_denoise: self.use_denoise.unwrap_or(d.use_denoise),
            use_smoothing_filter: self.use_smoothing_filter.unwrap_or(d.use_smoothing_filter),
            penalty_exponent: self.penalty_exponent.unwrap_or(d.penalty_exponent),
            sharpness_iterations: self.sharpness_iterations.unwrap_or(d.sharpness_iterations),
            denoise_window: self.denoise_window.unwrap_or(d.denoise_window),
            clip_window: self.clip_window.unwrap_or(d.clip_window),
        };
        let resolution = self.resolution.unwrap_or_default();

        Validator::validate_radius(config.radius_min, "radius_min")?;
        Validator::validate_radius(config.radius_max, "radius_max")?;
        Validator::validate_radius_order(config.radius_min, config.radius_max)?;
        Validator::validate_stretch(config.stretch)?;
        Validator::validate_penalty_exponent(config.penalty_exponent)?;
        Validator::validate_clip_window(config.clip_window)?;
        Validator::validate_resolution(&resolution)?;

        Ok(Snt {
            executor: SntExecutor::from_config(config),
            resolution,
        })
    }
}

// ============================================================================
// Estimator
// ============================================================================

/// Validated continuum estimator.
#[derive(Debug, Clone, PartialEq)]
pub struct Snt<T> {
    executor: SntExecutor<T>,
    resolution: Resolution<T>,
}

impl<T: Float> Snt<T> {
    /// Start configuring an estimator.
    pub fn builder() -> SntBuilder<T> {
        SntBuilder::new()
    }

    /// Validated options.
    pub fn config(&self) -> &SntConfig<T> {
        &self.executor.config
    }

    /// Line width source.
    pub fn resolution(&self) -> &Resolution<T> {
        &self.resolution
    }

    /// Estimate the continuum of one row.
    ///
    /// Fails with `InvalidInput` if the resolution is a header keyword; use
    /// [`Snt::fit_with_header`] for those.
    pub fn fit(&self, wavelength: &[T], flux: &[T]) -> Result<RowResult<T>, SntError> {
        self.executor.run(wavelength, flux, &self.resolution, None)
    }

    /// Estimate the continuum of one row, reading the line width from `header`.
    pub fn fit_with_header(&self, wavelength: &[T], flux: &[T], header: &Header) -> Result<RowResult<T>, SntError> {
        self.executor
            .run(wavelength, flux, &self.resolution, Some(header))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_setter_is_rejected_at_build() {
        let err = SntBuilder::<f64>::new()
            .radius_min(10.0)
            .radius_min(12.0)
            .build()
            .unwrap_err();
        assert_eq!(err, SntError::DuplicateParameter { parameter: "radius_min" });
    }

    #[test]
    fn fwhm_shorthands_share_one_slot() {
        let err = Snt::<f64>::builder().fwhm(0.1).fwhm_velocity(5.0).build().unwrap_err();
        assert_eq!(err, SntError::DuplicateParameter { parameter: "resolution" });
    }

    #[test]
    fn unknown_interpolation_name_is_deferred() {
        let err = Snt::<f64>::builder()
            .interpolation_name("quadratic")
            .build()
            .unwrap_err();
        assert_eq!(err, SntError::UnsupportedInterpolation("quadratic".into()));
    }

    #[test]
    fn defaults_build() {
        let snt = Snt::<f64>::builder().build().unwrap();
        assert_eq!(snt.config(), &SntConfig::default());
        assert_eq!(snt.resolution(), &Resolution::Header(DEFAULT_FWHM_KEY.into()));
    }
}

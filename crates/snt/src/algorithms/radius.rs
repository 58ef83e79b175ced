//! Wavelength-dependent search radius.
//!
//! ## Purpose
//!
//! Maps a wavelength to the radius the boundary walk uses around it. Where
//! the penalty map reports wide absorption gaps the radius grows towards
//! `radius_max`; elsewhere it stays near `radius_min`.
//!
//! ## Key concepts
//!
//! ```text
//! r(x) = (x / lambda_min) · (r_min + (r_max − r_min) · penalty(x)^nu)
//! ```
//!
//! The leading factor keeps the radius proportional to wavelength, so a
//! constant velocity width maps to a constant radius in velocity space.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::SntError;
use crate::primitives::step::StepFunction;

/// Parameters of the radius function for one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusConfig<T> {
    /// Radius where the penalty is zero.
    pub radius_min: T,

    /// Radius where the penalty is one.
    pub radius_max: T,

    /// Exponent applied to the penalty.
    pub nu: T,

    /// Shortest input wavelength of the row.
    pub lambda_min: T,

    /// Whether the penalty map is consulted at all.
    pub adaptive: bool,
}

impl<T: Float> RadiusConfig<T> {
    /// Radius at wavelength `x`.
    ///
    /// Fails with `OutOfRange` when `x` precedes the first break point of
    /// `step`.
    pub fn radius_at(&self, x: T, step: &StepFunction<T>) -> Result<T, SntError> {
        if !self.adaptive {
            return Ok(self.radius_min);
        }
        let penalty = step.lookup(x)?;
        Ok(radius_at(x, penalty, self))
    }
}

/// Radius for a penalty value already looked up.
#[inline]
pub fn radius_at<T: Float>(x: T, penalty: T, config: &RadiusConfig<T>) -> T {
    let spread = config.radius_max - config.radius_min;
    (x / config.lambda_min) * (config.radius_min + spread * penalty.powf(config.nu))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn config(adaptive: bool) -> RadiusConfig<f64> {
        RadiusConfig {
            radius_min: 20.0,
            radius_max: 70.0,
            nu: 1.0,
            lambda_min: 100.0,
            adaptive,
        }
    }

    #[test]
    fn interpolates_between_bounds() {
        let step = StepFunction::new(vec![100.0, 150.0, 200.0], vec![0.0, 0.5, 1.0]);
        let c = config(true);
        assert_relative_eq!(c.radius_at(100.0, &step).unwrap(), 20.0);
        assert_relative_eq!(c.radius_at(160.0, &step).unwrap(), 1.6 * 45.0);
        assert_relative_eq!(c.radius_at(200.0, &step).unwrap(), 2.0 * 70.0);
    }

    #[test]
    fn before_first_break_point_is_out_of_range() {
        let step = StepFunction::new(vec![100.0, 150.0], vec![0.0, 0.5]);
        assert!(matches!(
            config(true).radius_at(99.0, &step),
            Err(SntError::OutOfRange { .. })
        ));
        // Non-adaptive never looks at the map
        assert_eq!(config(false).radius_at(99.0, &step), Ok(20.0));
    }
}

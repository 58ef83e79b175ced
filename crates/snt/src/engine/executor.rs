//! Execution engine for single-row continuum estimation.
//!
//! ## Purpose
//!
//! This module runs the pipeline over one row: validation, pre-filter,
//! penalty map, candidate detection, boundary walk, refinement, optional
//! denoising and interpolation. It owns the validated configuration and
//! produces an immutable [`RowResult`].
//!
//! ## Design notes
//!
//! * **Pure**: A row's result depends only on its inputs and the config.
//! * **Fallbacks**: A penalty map with no spread is replaced by a zero map
//!   (the radius stays at its scaled minimum). A row without local maxima
//!   walks from its highest sample alone. Both are logged as warnings.
//! * **Generic**: Works for `f32` and `f64`.
//!
//! ## Invariants
//!
//! * The caller's arrays are never modified.
//! * The continuum has the length of the input row.
//!
//! ## Non-goals
//!
//! * This module does not validate configuration (handled by the builder).
//! * This module does not batch rows (handled by the batch crate).

// External dependencies
use log::{debug, warn};
use num_traits::Float;

// Internal dependencies
use crate::algorithms::denoise::denoise;
use crate::algorithms::interpolation::{Continuum, InterpolationKind};
use crate::algorithms::peaks::{find_peaks, PeakOptions};
use crate::algorithms::penalty::{build_penalty_map, step_size, PenaltyMap, LARGE_WINDOW_FWHM, SMALL_WINDOW_FWHM};
use crate::algorithms::prefilter::prefilter;
use crate::algorithms::radius::RadiusConfig;
use crate::algorithms::refine::refine;
use crate::algorithms::walker::select_anchors;
use crate::engine::output::RowResult;
use crate::engine::validator::Validator;
use crate::math::lit;
use crate::primitives::errors::SntError;
use crate::primitives::resolution::{Header, Resolution};
use crate::primitives::spectrum::Spectrum;
use crate::primitives::step::StepFunction;

// ============================================================================
// Configuration
// ============================================================================

/// Pipeline options for one row.
#[derive(Debug, Clone, PartialEq)]
pub struct SntConfig<T> {
    /// Leading samples dropped before anything else.
    pub drop_first_n: usize,

    /// Search radius where the penalty is zero.
    pub radius_min: T,

    /// Search radius where the penalty is one.
    pub radius_max: T,

    /// Minimum index separation between candidate maxima.
    pub max_vicinity: usize,

    /// Flux stretching factor of the walk coordinates.
    pub stretch: T,

    /// Whether the penalty map drives the radius.
    pub use_adaptive_radius: bool,

    /// Continuum interpolation kind.
    pub interpolation: InterpolationKind,

    /// Whether anchors are re-valued with a local median.
    pub use_denoise: bool,

    /// Whether the pre-filter smooths the flux.
    pub use_smoothing_filter: bool,

    /// Exponent applied to the penalty in the radius function.
    pub penalty_exponent: T,

    /// Rounds of sharp-peak removal.
    pub sharpness_iterations: usize,

    /// Half-width of the denoising median window.
    pub denoise_window: usize,

    /// Samples per rolling-clip window.
    pub clip_window: usize,
}

impl<T: Float> Default for SntConfig<T> {
    fn default() -> Self {
        Self {
            drop_first_n: 0,
            radius_min: lit(20.0),
            radius_max: lit(70.0),
            max_vicinity: 10,
            stretch: lit(40.0),
            use_adaptive_radius: true,
            interpolation: InterpolationKind::Linear,
            use_denoise: false,
            use_smoothing_filter: true,
            penalty_exponent: T::one(),
            sharpness_iterations: 10,
            denoise_window: 5,
            clip_window: 20,
        }
    }
}

/// Name, description and default of one configuration option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionInfo {
    /// Option name as used by the builder and config files.
    pub name: &'static str,

    /// What the option controls.
    pub description: &'static str,

    /// Default value.
    pub default: &'static str,
}

/// Every configuration option, in declaration order.
pub const OPTIONS: &[OptionInfo] = &[
    OptionInfo {
        name: "drop_first_n",
        description: "leading samples to discard (only when they are not useful)",
        default: "0",
    },
    OptionInfo {
        name: "radius_min",
        description: "minimum search radius of the boundary walk",
        default: "20",
    },
    OptionInfo {
        name: "radius_max",
        description: "maximum search radius; at least the width of the largest gap",
        default: "70",
    },
    OptionInfo {
        name: "max_vicinity",
        description: "required number of samples between adjacent maxima",
        default: "10",
    },
    OptionInfo {
        name: "stretch",
        description: "flux stretching factor of the walk coordinates",
        default: "40",
    },
    OptionInfo {
        name: "use_adaptive_radius",
        description: "let the penalty map widen the radius across deep absorption",
        default: "true",
    },
    OptionInfo {
        name: "interpolation_kind",
        description: "continuum interpolation: linear or cubic",
        default: "linear",
    },
    OptionInfo {
        name: "use_denoise",
        description: "replace anchor flux with the local median (noisy spectra)",
        default: "false",
    },
    OptionInfo {
        name: "use_smoothing_filter",
        description: "smooth the clipped flux with a Savitzky-Golay filter",
        default: "true",
    },
    OptionInfo {
        name: "penalty_exponent",
        description: "exponent applied to the penalty in the radius function",
        default: "1",
    },
    OptionInfo {
        name: "sharpness_iterations",
        description: "rounds of sharpest-peak removal before interpolation",
        default: "10",
    },
    OptionInfo {
        name: "denoise_window",
        description: "samples on each side of an anchor used by the denoiser",
        default: "5",
    },
    OptionInfo {
        name: "clip_window",
        description: "samples per rolling outlier-clipping window",
        default: "20",
    },
];

// ============================================================================
// Executor
// ============================================================================

/// Runs the pipeline with a fixed configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SntExecutor<T> {
    /// Validated options.
    pub config: SntConfig<T>,
}

impl<T: Float> SntExecutor<T> {
    /// Create an executor from a validated configuration.
    pub fn from_config(config: SntConfig<T>) -> Self {
        Self { config }
    }

    /// Estimate the continuum of one row.
    pub fn run(
        &self,
        wavelength: &[T],
        flux: &[T],
        resolution: &Resolution<T>,
        header: Option<&Header>,
    ) -> Result<RowResult<T>, SntError> {
        let c = &self.config;

        Validator::validate_inputs(wavelength, flux)?;
        let lambda_min = wavelength[0];
        Validator::validate_lambda_min(lambda_min, c.use_adaptive_radius)?;
        let fwhm = resolution.resolve(lambda_min, header)?;

        // Pre-filter
        let raw = Spectrum::from_slices(wavelength, flux)?;
        let cleaned = prefilter(&raw, c.drop_first_n, c.clip_window, c.use_smoothing_filter)?;
        if cleaned.is_empty() {
            return Err(SntError::DegenerateInput(
                "no samples left after pre-filtering".into(),
            ));
        }

        // Penalty map
        let (penalty, penalty_fallback) = self.penalty_map(&cleaned, fwhm)?;

        // Candidates
        let candidates = Self::candidates(&cleaned, c.max_vicinity);

        // Walk
        let radius = RadiusConfig {
            radius_min: c.radius_min,
            radius_max: c.radius_max,
            nu: c.penalty_exponent,
            lambda_min,
            adaptive: c.use_adaptive_radius,
        };
        let walked = select_anchors(&cleaned, &candidates, &penalty.step, &radius, c.stretch)?;

        // Refine
        let mut anchors = refine(&walked, c.sharpness_iterations);
        if c.use_denoise {
            anchors = denoise(&anchors, &cleaned.flux, c.denoise_window)?;
        }

        // Interpolate
        let continuum = Continuum::build(&anchors, c.interpolation)?.eval_many(wavelength);
        debug!(
            "row of {} samples: {} candidates, {} walked, {} anchors",
            wavelength.len(),
            candidates.len(),
            walked.len(),
            anchors.len()
        );

        Ok(RowResult {
            wavelength: wavelength.to_vec(),
            continuum,
            anchors,
            candidates,
            cleaned,
            penalty,
            fwhm,
            penalty_fallback,
        })
    }

    /// Penalty map for the cleaned spectrum; a zero map if it has no spread.
    pub fn penalty_map(&self, cleaned: &Spectrum<T>, fwhm: T) -> Result<(PenaltyMap<T>, bool), SntError> {
        let small = fwhm * lit(SMALL_WINDOW_FWHM);
        let large = fwhm * lit(LARGE_WINDOW_FWHM);
        let step = step_size(self.config.radius_max);

        match build_penalty_map(cleaned, small, large, step) {
            Ok(map) => Ok((map, false)),
            Err(SntError::DegenerateInput(reason)) => {
                warn!("{reason}; using a zero penalty map");
                let penalty = vec![T::zero(); cleaned.len()];
                let step = StepFunction::zeros(cleaned.wavelength.clone());
                Ok((PenaltyMap { penalty, step }, true))
            }
            Err(e) => Err(e),
        }
    }

    /// Candidate maxima of the cleaned flux; the highest sample if there are none.
    pub fn candidates(cleaned: &Spectrum<T>, max_vicinity: usize) -> Vec<usize> {
        let peaks = find_peaks(&cleaned.flux, PeakOptions::nonnegative(max_vicinity));
        if !peaks.is_empty() {
            return peaks;
        }

        // First occurrence of the maximum
        let mut highest: Option<(usize, T)> = None;
        for (i, &y) in cleaned.flux.iter().enumerate() {
            if highest.map_or(!y.is_nan(), |(_, best)| y > best) {
                highest = Some((i, y));
            }
        }
        match highest {
            Some((i, _)) => {
                warn!("no local maxima found; walking from the highest sample at index {i}");
                vec![i]
            }
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_option_table() {
        let c = SntConfig::<f64>::default();
        assert_eq!(c.radius_min, 20.0);
        assert_eq!(c.radius_max, 70.0);
        assert_eq!(c.clip_window, 20);
        assert_eq!(OPTIONS.len(), 13);
        assert!(OPTIONS.iter().any(|o| o.name == "interpolation_kind" && o.default == "linear"));
    }

    #[test]
    fn flat_row_falls_back_to_highest_sample() {
        let s = Spectrum {
            wavelength: vec![1.0f64, 2.0, 3.0, 4.0],
            flux: vec![1.0, 1.0, 1.0, 1.0],
        };
        assert_eq!(SntExecutor::candidates(&s, 10), vec![0]);
    }

    #[test]
    fn flat_row_has_zero_penalty() {
        let s = Spectrum {
            wavelength: (0..50).map(|i| 5000.0 + i as f64).collect::<Vec<f64>>(),
            flux: vec![1.0; 50],
        };
        let exec = SntExecutor::from_config(SntConfig::default());
        let (map, fallback) = exec.penalty_map(&s, 0.1).unwrap();
        assert!(fallback);
        assert!(map.step.y.iter().all(|&v| v == 0.0));
    }
}

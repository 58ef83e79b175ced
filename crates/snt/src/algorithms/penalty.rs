//! Penalty map: where does the walk need a larger radius?
//!
//! ## Purpose
//!
//! Two rolling-maximum envelopes are computed at a small and a large
//! wavelength scale. Where both agree the continuum is well sampled; where
//! the large one rises above the small one the small windows are sitting
//! inside absorption gaps. The normalized difference is the penalty, and the
//! step function derived from it drives the adaptive radius.
//!
//! ## Design notes
//!
//! * **Envelope**: Non-overlapping wavelength windows; each non-empty window
//!   contributes its maximum sample. Linear in between, NaN outside.
//! * **No information**: A NaN envelope value or a zero large envelope gives
//!   a penalty of zero at that sample.
//! * **Plateaus**: Local maxima of the penalty are widened into flat steps
//!   of `step_size` on either side, tallest first; a plateau only ever
//!   raises its neighbours.
//!
//! ## Invariants
//!
//! * Normalized penalties and step values lie in `[0, 1]`.
//! * Step break points are the cleaned wavelengths, strictly increasing.

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

// Internal dependencies
use crate::algorithms::interpolation::LinearInterpolant;
use crate::algorithms::peaks::{find_peaks, PeakOptions};
use crate::math::lit;
use crate::primitives::errors::SntError;
use crate::primitives::spectrum::{range, Spectrum};
use crate::primitives::step::StepFunction;

/// Small envelope window in units of FWHM.
pub const SMALL_WINDOW_FWHM: f64 = 40.0;

/// Large envelope window in units of FWHM.
pub const LARGE_WINDOW_FWHM: f64 = 400.0;

/// Normalized penalty samples and the step function built from them.
#[derive(Debug, Clone, PartialEq)]
pub struct PenaltyMap<T> {
    /// Normalized penalty at every cleaned wavelength.
    pub penalty: Vec<T>,

    /// Plateau step function used for radius lookups.
    pub step: StepFunction<T>,
}

/// Rolling-maximum envelope over windows of wavelength width `window`.
pub fn envelope<T: Float>(spectrum: &Spectrum<T>, window: T) -> Result<LinearInterpolant<T>, SntError> {
    if spectrum.is_empty() {
        return Err(SntError::EmptyInput);
    }
    if !(window > T::zero()) {
        return Err(SntError::InvalidInput(format!(
            "envelope window must be positive, got {}",
            window.to_f64().unwrap_or(f64::NAN)
        )));
    }

    let (start, _) = spectrum.wavelength_range().ok_or(SntError::EmptyInput)?;
    let mut end = start + window;
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let mut best: Option<(T, T)> = None;

    for (&x, &y) in spectrum.wavelength.iter().zip(&spectrum.flux) {
        if x >= end {
            if let Some((bx, by)) = best.take() {
                xs.push(bx);
                ys.push(by);
            }
            // Skip empty windows
            let skipped = ((x - end) / window).floor() + T::one();
            end = end + skipped * window;
            while x >= end {
                end = end + window;
            }
        }
        let replace = match best {
            Some((_, by)) => y > by,
            None => true,
        };
        if replace {
            best = Some((x, y));
        }
    }
    if let Some((bx, by)) = best {
        xs.push(bx);
        ys.push(by);
    }

    LinearInterpolant::new(xs, ys)
}

/// Raw penalty `large(x) - small(x)` at every wavelength.
pub fn raw_penalty<T: Float>(
    small: &LinearInterpolant<T>,
    large: &LinearInterpolant<T>,
    wavelength: &[T],
) -> Vec<T> {
    wavelength
        .iter()
        .map(|&x| {
            let s = small.eval(x);
            let l = large.eval(x);
            if s.is_nan() || l.is_nan() || l == T::zero() {
                T::zero()
            } else {
                l - s
            }
        })
        .collect()
}

/// Rescale to `[0, 1]`; fails when every value is equal.
pub fn normalize<T: Float>(values: &[T]) -> Result<Vec<T>, SntError> {
    let (lo, hi) = range(values).ok_or(SntError::EmptyInput)?;
    let span = hi - lo;
    if !(span > T::zero()) || !span.is_finite() {
        return Err(SntError::DegenerateInput(
            "penalty range is zero (no gaps between envelopes)".into(),
        ));
    }
    Ok(values.iter().map(|&p| (p - lo) / span).collect())
}

/// Plateau half-width derived from the maximum radius.
pub fn step_size<T: Float>(radius_max: T) -> T {
    (radius_max / lit(4.0)).max(T::one())
}

/// Widen local maxima of `penalty` into plateaus of half-width `step`.
pub fn step_transform<T: Float>(wavelength: &[T], penalty: &[T], step: T) -> StepFunction<T> {
    let distance = step.round().to_usize().unwrap_or(1).max(1);
    let peaks = find_peaks(penalty, PeakOptions::nonnegative(distance));

    let mut by_height: Vec<(usize, T)> = peaks.iter().map(|&p| (p, penalty[p])).collect();
    by_height.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Equal));

    let n = wavelength.len();
    let mut y = penalty.to_vec();
    for (p, height) in by_height {
        let center = wavelength[p];

        let mut j = p;
        while j < n && wavelength[j] < center + step {
            y[j] = y[j].max(height);
            j += 1;
        }

        let mut j = p;
        loop {
            if wavelength[j] <= center - step {
                break;
            }
            y[j] = y[j].max(height);
            if j == 0 {
                break;
            }
            j -= 1;
        }
    }

    StepFunction::new(wavelength.to_vec(), y)
}

/// Build the normalized penalty and its step function.
pub fn build_penalty_map<T: Float>(
    spectrum: &Spectrum<T>,
    small_window: T,
    large_window: T,
    step: T,
) -> Result<PenaltyMap<T>, SntError> {
    let small = envelope(spectrum, small_window)?;
    let large = envelope(spectrum, large_window)?;

    let raw = raw_penalty(&small, &large, &spectrum.wavelength);
    let penalty = normalize(&raw)?;
    let step = step_transform(&spectrum.wavelength, &penalty, step);

    Ok(PenaltyMap { penalty, step })
}

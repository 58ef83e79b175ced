//! Pre-filtering of raw spectra.
//!
//! ## Purpose
//!
//! Produces the cleaned spectrum every later stage works on: drops leading
//! samples, removes upward noise spikes with a windowed Tukey fence, and
//! optionally smooths the flux.
//!
//! ## Design notes
//!
//! * **Asymmetric clip**: Only samples above `Q3 + 1.5·IQR` of their window
//!   are removed. Continuum points are maxima, so low outliers are kept.
//! * **Two passes**: The second pass catches spikes that only stand out once
//!   the larger ones are gone.
//! * **Windows**: Consecutive blocks of `window` samples; the trailing
//!   partial block is fenced on its own statistics.
//!
//! ## Invariants
//!
//! * Output wavelength and flux have equal length.
//! * Clipping never adds samples and preserves sample order.

// External dependencies
use log::debug;
use num_traits::Float;

// Internal dependencies
use crate::math::quantile::upper_fence;
use crate::math::savgol::{savgol_filter, ORDER, WINDOW};
use crate::primitives::errors::SntError;
use crate::primitives::spectrum::Spectrum;

/// Number of clipping passes applied by [`prefilter`].
pub const CLIP_PASSES: usize = 2;

/// Remove upward outliers window by window.
pub fn rolling_clip<T: Float>(spectrum: &Spectrum<T>, window: usize) -> Spectrum<T> {
    let n = spectrum.len();
    let window = window.max(1);
    let mut out = Spectrum::with_capacity(n);

    let mut start = 0;
    while start < n {
        let end = (start + window).min(n);
        let upper = upper_fence(&spectrum.flux[start..end]);
        for i in start..end {
            // NaN compares false and is kept, matching `!(y > upper)`
            if !(spectrum.flux[i] > upper) {
                out.push(spectrum.wavelength[i], spectrum.flux[i]);
            }
        }
        start = end;
    }

    out
}

/// Full pre-filter: drop, clip twice, optionally smooth.
pub fn prefilter<T: Float>(
    spectrum: &Spectrum<T>,
    drop_first: usize,
    window: usize,
    use_smoothing: bool,
) -> Result<Spectrum<T>, SntError> {
    let mut cleaned = spectrum.drop_first(drop_first);
    for _ in 0..CLIP_PASSES {
        cleaned = rolling_clip(&cleaned, window);
    }
    debug!(
        "pre-filter kept {} of {} samples",
        cleaned.len(),
        spectrum.len()
    );

    if use_smoothing {
        cleaned.flux = savgol_filter(&cleaned.flux, WINDOW, ORDER)?;
    }

    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spiky() -> Spectrum<f64> {
        let wavelength: Vec<f64> = (0..40).map(|i| 5000.0 + i as f64).collect();
        let mut flux: Vec<f64> = (0..40).map(|i| 1.0 + 0.01 * (i % 3) as f64).collect();
        flux[7] = 9.0;
        flux[25] = 4.0;
        Spectrum { wavelength, flux }
    }

    #[test]
    fn clip_removes_upward_spikes_only() {
        let mut s = spiky();
        s.flux[12] = -5.0;
        let clipped = rolling_clip(&s, 20);
        assert_eq!(clipped.len(), 38);
        assert!(clipped.flux.iter().all(|&f| f < 4.0));
        assert!(clipped.flux.contains(&-5.0));
    }

    #[test]
    fn drop_first_and_no_smoothing() {
        let s = spiky();
        let out = prefilter(&s, 10, 20, false).unwrap();
        assert_eq!(out.wavelength[0], 5010.0);
        assert_eq!(out.len(), 29);
    }

    #[test]
    fn smoothing_needs_a_full_window() {
        let s = Spectrum {
            wavelength: vec![1.0f64, 2.0, 3.0],
            flux: vec![1.0, 1.0, 1.0],
        };
        assert!(prefilter(&s, 0, 20, true).is_err());
    }
}

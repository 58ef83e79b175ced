//! Local-median re-valuation of anchors.
//!
//! For noisy spectra a single maximum overestimates the continuum. Each
//! anchor's flux is replaced with the median of the pre-filtered flux within
//! `window` samples on either side of its source index, clamped to the
//! sequence bounds. Anchor positions are unchanged.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::quantile::median_inplace;
use crate::primitives::anchors::Anchor;
use crate::primitives::errors::SntError;

/// Replace every anchor's flux with the local median of `flux`.
pub fn denoise<T: Float>(anchors: &[Anchor<T>], flux: &[T], window: usize) -> Result<Vec<Anchor<T>>, SntError> {
    let n = flux.len();
    let mut buf = Vec::with_capacity(2 * window + 1);

    anchors
        .iter()
        .map(|a| {
            if a.index >= n {
                return Err(SntError::InvalidInput(format!(
                    "anchor index {} outside pre-filtered spectrum of {} samples",
                    a.index, n
                )));
            }
            let lo = a.index.saturating_sub(window);
            let hi = (a.index + window).min(n - 1);
            buf.clear();
            buf.extend_from_slice(&flux[lo..=hi]);
            Ok(Anchor::new(a.x, median_inplace(&mut buf), a.index))
        })
        .collect()
}

//! Local-maximum detection.
//!
//! ## Purpose
//!
//! Finds candidate maxima in a sampled signal. Used on the pre-filtered flux
//! to produce the boundary walk's candidates, and on the penalty curve to
//! seed the step-function plateaus.
//!
//! ## Design notes
//!
//! * **Plateaus**: A flat top counts as one peak located at its middle
//!   sample (left-biased for even widths). Plateaus touching either end of
//!   the signal are not peaks.
//! * **Height**: Peaks below the minimum height are discarded.
//! * **Distance**: Peaks closer than `distance` samples to a taller peak are
//!   discarded, tallest first; among equal heights the later peak wins.
//!
//! ## Invariants
//!
//! * Returned indices are sorted ascending and never include `0` or `n - 1`.

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

/// Filters applied to raw local maxima.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PeakOptions<T> {
    /// Minimum peak height.
    pub height: Option<T>,

    /// Minimum index separation between kept peaks.
    pub distance: Option<usize>,
}

impl<T: Float> PeakOptions<T> {
    /// Options with a minimum height of zero and the given separation.
    pub fn nonnegative(distance: usize) -> Self {
        Self {
            height: Some(T::zero()),
            distance: Some(distance),
        }
    }
}

/// Indices of local maxima in `values`, filtered by `options`.
pub fn find_peaks<T: Float>(values: &[T], options: PeakOptions<T>) -> Vec<usize> {
    let mut peaks = local_maxima(values);

    if let Some(height) = options.height {
        peaks.retain(|&i| values[i] >= height);
    }

    if let Some(distance) = options.distance {
        if distance > 1 && peaks.len() > 1 {
            peaks = select_by_distance(values, &peaks, distance);
        }
    }

    peaks
}

// Raw maxima with plateau midpoints.
fn local_maxima<T: Float>(x: &[T]) -> Vec<usize> {
    let n = x.len();
    let mut peaks = Vec::new();
    if n < 3 {
        return peaks;
    }

    let i_max = n - 1;
    let mut i = 1;
    while i < i_max {
        if x[i - 1] < x[i] {
            let mut ahead = i + 1;
            while ahead < i_max && x[ahead] == x[i] {
                ahead += 1;
            }
            if x[ahead] < x[i] {
                let left = i;
                let right = ahead - 1;
                peaks.push((left + right) / 2);
                i = ahead;
            }
        }
        i += 1;
    }

    peaks
}

// Drop peaks within `distance` samples of a higher-priority peak.
fn select_by_distance<T: Float>(x: &[T], peaks: &[usize], distance: usize) -> Vec<usize> {
    let n = peaks.len();
    let mut keep = vec![true; n];

    // Ascending by height; stable so equal heights stay in index order
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| x[peaks[a]].partial_cmp(&x[peaks[b]]).unwrap_or(Equal));

    for &j in order.iter().rev() {
        if !keep[j] {
            continue;
        }
        let mut k = j;
        while k > 0 && peaks[j] - peaks[k - 1] < distance {
            keep[k - 1] = false;
            k -= 1;
        }
        let mut k = j + 1;
        while k < n && peaks[k] - peaks[j] < distance {
            keep[k] = false;
            k += 1;
        }
    }

    peaks
        .iter()
        .zip(&keep)
        .filter(|&(_, &kept)| kept)
        .map(|(&p, _)| p)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_has_single_peak() {
        let y = [0.0f64, 1.0, 2.0, 3.0, 2.0, 1.0, 0.0];
        assert_eq!(find_peaks(&y, PeakOptions::nonnegative(1)), vec![3]);
    }

    #[test]
    fn plateau_midpoint_and_edges() {
        let y = [0.0f64, 2.0, 2.0, 2.0, 0.0, 1.0, 1.0];
        // The second plateau touches the right edge
        assert_eq!(find_peaks(&y, PeakOptions::default()), vec![2]);
        // Flat signal has no peaks
        assert!(find_peaks(&[1.0f64; 8], PeakOptions::default()).is_empty());
    }

    #[test]
    fn distance_prefers_taller_peaks() {
        let y = [0.0f64, 1.0, 0.0, 3.0, 0.0, 2.0, 0.0, 0.0, 5.0, 0.0];
        let all = find_peaks(&y, PeakOptions::default());
        assert_eq!(all, vec![1, 3, 5, 8]);
        let spaced = find_peaks(
            &y,
            PeakOptions {
                height: None,
                distance: Some(3),
            },
        );
        assert_eq!(spaced, vec![3, 8]);
    }

    #[test]
    fn height_filter() {
        let y = [0.0f64, -1.0, -0.5, -1.0, 2.0, 0.0];
        assert_eq!(find_peaks(&y, PeakOptions::default()), vec![2, 4]);
        assert_eq!(find_peaks(&y, PeakOptions::nonnegative(1)), vec![4]);
    }
}

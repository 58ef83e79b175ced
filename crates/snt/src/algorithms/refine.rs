//! Statistical pruning of spurious anchors.
//!
//! ## Purpose
//!
//! The boundary walk occasionally lands on residual noise spikes or picks
//! two anchors almost on top of each other. This module removes both kinds
//! before the continuum is interpolated.
//!
//! ## Design notes
//!
//! * **Sharpness**: `|left slope| + |right slope|` for interior anchors whose
//!   two slopes have opposite sign; zero otherwise.
//! * **Sharp peaks**: Each round removes anchors whose sharpness lies
//!   strictly above the 99.5th percentile of the nonzero scores and above
//!   their upper Tukey fence. Once no score is an outlier the pass stops, so
//!   re-running it on its own output changes nothing.
//! * **Close points**: Consecutive distances below the lower Tukey fence
//!   mark one anchor of the pair; the one nearer to its other neighbour goes.
//! * **Mark, then compact**: Indices are always decided against the
//!   unchanged sequence.
//!
//! ## Invariants
//!
//! * Output is an ordered subset of the input.
//! * Endpoints are never removed by the sharp-peak pass.

// External dependencies
use log::debug;
use num_traits::Float;

// Internal dependencies
use crate::math::lit;
use crate::math::quantile::{lower_fence, percentile, upper_fence};
use crate::primitives::anchors::{compact, Anchor};

/// Percentile above which sharpness counts as a spike.
pub const SHARPNESS_PERCENTILE: f64 = 99.5;

/// Sharpness of every anchor; endpoints score zero.
pub fn sharpness<T: Float>(anchors: &[Anchor<T>]) -> Vec<T> {
    let n = anchors.len();
    let mut scores = vec![T::zero(); n];
    for i in 1..n.saturating_sub(1) {
        let (a, b, c) = (&anchors[i - 1], &anchors[i], &anchors[i + 1]);
        let left = (b.y - a.y) / (b.x - a.x);
        let right = (c.y - b.y) / (c.x - b.x);
        if left * right < T::zero() {
            scores[i] = left.abs() + right.abs();
        }
    }
    scores
}

/// Remove the sharpest peaks for up to `iterations` rounds.
pub fn remove_sharp_peaks<T: Float>(anchors: &[Anchor<T>], iterations: usize) -> Vec<Anchor<T>> {
    let mut current = anchors.to_vec();

    for round in 0..iterations {
        if current.len() < 3 {
            break;
        }
        let scores = sharpness(&current);
        let nonzero: Vec<T> = scores.iter().copied().filter(|&s| s != T::zero()).collect();
        if nonzero.is_empty() {
            break;
        }

        let threshold = percentile(&nonzero, lit(SHARPNESS_PERCENTILE)).max(upper_fence(&nonzero));
        let remove: Vec<bool> = scores.iter().map(|&s| s > threshold).collect();
        let count = remove.iter().filter(|&&r| r).count();
        if count == 0 {
            break;
        }
        debug!("sharpness round {round}: removed {count} anchors");
        current = compact(&current, &remove);
    }

    current
}

/// Remove one anchor of every abnormally close consecutive pair.
pub fn remove_close_points<T: Float>(anchors: &[Anchor<T>]) -> Vec<Anchor<T>> {
    let distances: Vec<T> = anchors.windows(2).map(|w| w[0].distance(&w[1])).collect();
    if distances.len() < 3 {
        return anchors.to_vec();
    }

    let lower = lower_fence(&distances);
    let mut remove = vec![false; anchors.len()];
    for i in 1..distances.len() - 1 {
        if distances[i] < lower {
            if distances[i - 1] < distances[i + 1] {
                remove[i] = true;
            } else {
                remove[i + 1] = true;
            }
        }
    }

    compact(anchors, &remove)
}

/// Sharp-peak removal followed by close-point removal.
pub fn refine<T: Float>(anchors: &[Anchor<T>], iterations: usize) -> Vec<Anchor<T>> {
    let sharp = remove_sharp_peaks(anchors, iterations);
    let refined = remove_close_points(&sharp);
    debug!(
        "refined anchors: {} -> {} (sharp) -> {} (close)",
        anchors.len(),
        sharp.len(),
        refined.len()
    );
    refined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchors(points: &[(f64, f64)]) -> Vec<Anchor<f64>> {
        points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Anchor::new(x, y, i))
            .collect()
    }

    #[test]
    fn sharpness_needs_opposite_slopes() {
        let a = anchors(&[(0.0, 0.0), (1.0, 2.0), (2.0, 0.0), (3.0, 1.0)]);
        assert_eq!(sharpness(&a), vec![0.0, 4.0, 3.0, 0.0]);
        let monotone = anchors(&[(0.0, 0.0), (1.0, 1.0), (2.0, 3.0)]);
        assert_eq!(sharpness(&monotone), vec![0.0; 3]);
    }

    /// Alternating background with a single spike in the middle.
    fn spiked(n: usize, at: usize) -> Vec<Anchor<f64>> {
        let points: Vec<(f64, f64)> = (0..n)
            .map(|i| {
                let y = if i == at { 5.0 } else if i % 2 == 1 { 1.1 } else { 0.9 };
                (i as f64, y)
            })
            .collect();
        anchors(&points)
    }

    #[test]
    fn sharpest_peak_goes_first() {
        let a = spiked(21, 10);
        let once = remove_sharp_peaks(&a, 1);
        assert_eq!(once.len(), 20);
        assert!(once.iter().all(|p| p.x != 10.0));
        // Endpoints survive any number of rounds
        let many = remove_sharp_peaks(&a, 50);
        assert_eq!(many.first().map(|p| p.x), Some(0.0));
        assert_eq!(many.last().map(|p| p.x), Some(20.0));
    }

    #[test]
    fn background_alone_is_kept() {
        let a = spiked(21, 10);
        let once = remove_sharp_peaks(&a, 50);
        assert_eq!(once.len(), 20);
        assert_eq!(remove_sharp_peaks(&once, 50), once);
    }

    #[test]
    fn zero_iterations_is_identity() {
        let a = anchors(&[(0.0, 0.0), (1.0, 5.0), (2.0, 0.0)]);
        assert_eq!(remove_sharp_peaks(&a, 0), a);
    }

    #[test]
    fn close_pair_loses_the_crowded_point() {
        let a = anchors(&[
            (0.0, 1.0),
            (10.0, 1.0),
            (20.0, 1.0),
            (20.1, 1.0),
            (32.0, 1.0),
            (40.0, 1.0),
            (50.0, 1.0),
        ]);
        let kept = remove_close_points(&a);
        assert_eq!(kept.len(), 6);
        // 20.0 has 10.0 to its left, 20.1 has 11.9 to its right: drop 20.0
        assert!(kept.iter().all(|p| p.x != 20.0));
    }
}

//! Order statistics used by the clipping and pruning passes.
//!
//! ## Purpose
//!
//! Percentiles follow the linear-interpolation definition: for sorted values
//! `a[0..n]` the `q`-th percentile sits at fractional rank `q/100 · (n - 1)`.
//! Tukey fences (`Q1 - 1.5·IQR`, `Q3 + 1.5·IQR`) are built on top of it.
//!
//! ## Invariants
//!
//! * NaN values are ordered as equal and should be filtered by the caller.
//! * Empty inputs yield NaN rather than panicking.

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

// Internal dependencies
use crate::math::lit;

/// Tukey fence multiplier.
pub const FENCE: f64 = 1.5;

/// Linear-interpolated percentile of an already sorted slice.
pub fn percentile_sorted<T: Float>(sorted: &[T], q: T) -> T {
    let n = sorted.len();
    if n == 0 {
        return T::nan();
    }
    if n == 1 {
        return sorted[0];
    }

    let rank = q / lit(100.0) * T::from(n - 1).unwrap_or(T::zero());
    let rank = rank.max(T::zero()).min(T::from(n - 1).unwrap_or(T::zero()));
    let lo = rank.floor().to_usize().unwrap_or(0);
    let hi = rank.ceil().to_usize().unwrap_or(lo).min(n - 1);
    let frac = rank - rank.floor();

    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Linear-interpolated percentile of unsorted values.
pub fn percentile<T: Float>(values: &[T], q: T) -> T {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Equal));
    percentile_sorted(&sorted, q)
}

/// First and third quartiles.
pub fn quartiles<T: Float>(values: &[T]) -> (T, T) {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Equal));
    (
        percentile_sorted(&sorted, lit(25.0)),
        percentile_sorted(&sorted, lit(75.0)),
    )
}

/// Upper Tukey fence `Q3 + 1.5·IQR`.
pub fn upper_fence<T: Float>(values: &[T]) -> T {
    let (q1, q3) = quartiles(values);
    q3 + lit::<T>(FENCE) * (q3 - q1)
}

/// Lower Tukey fence `Q1 - 1.5·IQR`.
pub fn lower_fence<T: Float>(values: &[T]) -> T {
    let (q1, q3) = quartiles(values);
    q1 - lit::<T>(FENCE) * (q3 - q1)
}

/// Median computed in place using quickselect.
pub fn median_inplace<T: Float>(vals: &mut [T]) -> T {
    let n = vals.len();
    if n == 0 {
        return T::nan();
    }

    let mid = n / 2;
    vals.select_nth_unstable_by(mid, |a, b| a.partial_cmp(b).unwrap_or(Equal));
    let upper = vals[mid];

    if n % 2 == 0 {
        // Largest value of the lower half
        let lower = vals[..mid].iter().copied().fold(vals[0], T::max);
        (lower + upper) / lit(2.0)
    } else {
        upper
    }
}

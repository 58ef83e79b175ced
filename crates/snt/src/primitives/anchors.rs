//! Anchor points on the continuum.
//!
//! ## Purpose
//!
//! Anchors are the sparse points the boundary walk selects as lying on the
//! continuum. They are created once, thinned by the refiner, optionally
//! re-valued by the denoiser and finally read by the interpolator.
//!
//! ## Invariants
//!
//! * Anchor sequences are ordered by strictly increasing wavelength.
//! * `index` always refers to the pre-filtered spectrum the walk ran on.
//!
//! ## Non-goals
//!
//! * This module does not decide which anchors to remove.

// External dependencies
use num_traits::Float;

/// A selected continuum point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor<T> {
    /// Wavelength of the anchor.
    pub x: T,

    /// Flux of the anchor.
    pub y: T,

    /// Index of the anchor in the pre-filtered spectrum.
    pub index: usize,
}

impl<T: Float> Anchor<T> {
    /// Create a new anchor.
    #[inline]
    pub fn new(x: T, y: T, index: usize) -> Self {
        Self { x, y, index }
    }

    /// Euclidean distance to another anchor in raw (wavelength, flux) units.
    #[inline]
    pub fn distance(&self, other: &Self) -> T {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Split anchors into parallel coordinate vectors.
pub fn unzip<T: Float>(anchors: &[Anchor<T>]) -> (Vec<T>, Vec<T>) {
    anchors.iter().map(|a| (a.x, a.y)).unzip()
}

/// Whether anchor wavelengths are strictly increasing.
pub fn is_strictly_increasing<T: Float>(anchors: &[Anchor<T>]) -> bool {
    anchors.windows(2).all(|w| w[0].x < w[1].x)
}

/// Keep every element whose `remove` flag is unset.
///
/// Removal passes first mark indices against an unchanged sequence and then
/// rebuild it once here.
pub fn compact<A: Copy>(items: &[A], remove: &[bool]) -> Vec<A> {
    debug_assert_eq!(items.len(), remove.len());
    items
        .iter()
        .zip(remove)
        .filter(|&(_, &drop)| !drop)
        .map(|(&item, _)| item)
        .collect()
}

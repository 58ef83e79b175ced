//! Wavelength/flux sample sequences.
//!
//! A [`Spectrum`] owns two equal-length vectors. Every pipeline stage takes a
//! borrowed spectrum and returns a new one; nothing here mutates the caller's
//! arrays.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::SntError;

/// Ordered `(wavelength, flux)` samples with strictly increasing wavelength.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Spectrum<T> {
    /// Sample positions.
    pub wavelength: Vec<T>,

    /// Sample values.
    pub flux: Vec<T>,
}

impl<T: Float> Spectrum<T> {
    /// Copy the given slices into a new spectrum after checking lengths.
    pub fn from_slices(wavelength: &[T], flux: &[T]) -> Result<Self, SntError> {
        if wavelength.len() != flux.len() {
            return Err(SntError::MismatchedInputs {
                wavelength_len: wavelength.len(),
                flux_len: flux.len(),
            });
        }
        Ok(Self {
            wavelength: wavelength.to_vec(),
            flux: flux.to_vec(),
        })
    }

    /// Build a spectrum with the given capacity.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            wavelength: Vec::with_capacity(n),
            flux: Vec::with_capacity(n),
        }
    }

    /// Append one sample.
    #[inline]
    pub fn push(&mut self, wavelength: T, flux: T) {
        self.wavelength.push(wavelength);
        self.flux.push(flux);
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.wavelength.len()
    }

    /// Whether the spectrum has no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.wavelength.is_empty()
    }

    /// Spectrum without its first `n` samples.
    pub fn drop_first(&self, n: usize) -> Self {
        let n = n.min(self.len());
        Self {
            wavelength: self.wavelength[n..].to_vec(),
            flux: self.flux[n..].to_vec(),
        }
    }

    /// Minimum and maximum flux, ignoring NaN.
    pub fn flux_range(&self) -> Option<(T, T)> {
        range(&self.flux)
    }

    /// Minimum and maximum wavelength.
    pub fn wavelength_range(&self) -> Option<(T, T)> {
        range(&self.wavelength)
    }
}

/// Minimum and maximum of a slice, ignoring NaN. `None` if nothing is finite.
pub fn range<T: Float>(values: &[T]) -> Option<(T, T)> {
    let mut iter = values.iter().copied().filter(|v| !v.is_nan());
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

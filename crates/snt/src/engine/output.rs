//! Per-row result record.
//!
//! ## Purpose
//!
//! This module defines [`RowResult`], the immutable output of running the
//! pipeline over one row: the continuum at every input wavelength plus the
//! intermediate products needed to inspect how it was obtained.
//!
//! ## Invariants
//!
//! * `continuum` has the same length as `wavelength`.
//! * `anchors` are strictly increasing in wavelength.
//! * `candidates` index into `cleaned`.
//!
//! ## Non-goals
//!
//! * This module does not write files (handled by the batch crate).

// External dependencies
use core::fmt::{Debug, Display, Formatter, Result};
use num_traits::Float;

// Internal dependencies
use crate::algorithms::penalty::PenaltyMap;
use crate::primitives::anchors::Anchor;
use crate::primitives::spectrum::Spectrum;

// ============================================================================
// Result Structure
// ============================================================================

/// Continuum estimate and diagnostics for one row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowResult<T> {
    /// Input wavelengths.
    pub wavelength: Vec<T>,

    /// Continuum evaluated at every input wavelength (NaN outside the anchors).
    pub continuum: Vec<T>,

    /// Final anchors after refinement and optional denoising.
    pub anchors: Vec<Anchor<T>>,

    /// Candidate maxima the boundary walk ran over, as indices into `cleaned`.
    pub candidates: Vec<usize>,

    /// Pre-filtered spectrum.
    pub cleaned: Spectrum<T>,

    /// Normalized penalty and its step function.
    pub penalty: PenaltyMap<T>,

    /// Line width in wavelength units.
    pub fwhm: T,

    /// Whether the penalty map was degenerate and replaced with zeros.
    pub penalty_fallback: bool,
}

impl<T: Float> RowResult<T> {
    /// Candidate maxima as `(wavelength, flux, index)` points.
    pub fn candidate_points(&self) -> Vec<Anchor<T>> {
        self.candidates
            .iter()
            .map(|&i| Anchor::new(self.cleaned.wavelength[i], self.cleaned.flux[i], i))
            .collect()
    }

    /// Divide `flux` by the continuum sample by sample.
    pub fn normalize(&self, flux: &[T]) -> Vec<T> {
        flux.iter()
            .zip(&self.continuum)
            .map(|(&f, &c)| f / c)
            .collect()
    }

    /// Number of wavelengths where the continuum is defined.
    pub fn covered(&self) -> usize {
        self.continuum.iter().filter(|c| !c.is_nan()).count()
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display + Debug> Display for RowResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Data points: {}", self.wavelength.len())?;
        writeln!(f, "  Cleaned:     {}", self.cleaned.len())?;
        writeln!(f, "  Candidates:  {}", self.candidates.len())?;
        writeln!(f, "  Anchors:     {}", self.anchors.len())?;
        writeln!(f, "  FWHM:        {}", self.fwhm)?;
        writeln!(f, "  Covered:     {}", self.covered())?;
        if self.penalty_fallback {
            writeln!(f, "  Penalty:     degenerate, zero map used")?;
        }
        writeln!(f)?;

        writeln!(f, "Anchors:")?;
        writeln!(f, "{:>12} {:>12} {:>8}", "Wavelength", "Flux", "Index")?;
        writeln!(f, "{:-<34}", "")?;

        // First and last 10 when there are many
        let n = self.anchors.len();
        let rows: Vec<usize> = if n <= 20 {
            (0..n).collect()
        } else {
            (0..10).chain(n - 10..n).collect()
        };

        let mut prev = 0;
        for (k, &i) in rows.iter().enumerate() {
            if k > 0 && i != prev + 1 {
                writeln!(f, "{:>12}", "...")?;
            }
            prev = i;
            let a = &self.anchors[i];
            writeln!(f, "{:>12.4} {:>12.6} {:>8}", a.x, a.y, a.index)?;
        }

        Ok(())
    }
}

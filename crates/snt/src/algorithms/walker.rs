//! Boundary walk over candidate maxima.
//!
//! ## Purpose
//!
//! Selects the anchor sequence by rolling a disc of wavelength-dependent
//! radius along the top of the spectrum. From the current anchor `P` the
//! walk looks for candidates within `2r`, places the disc so that both `P`
//! and the candidate lie on its rim, and moves to the candidate whose disc
//! centre makes the smallest angle with `P`.
//!
//! ## Design notes
//!
//! * **Scaled coordinates**: Flux is rescaled so a unit of flux spans the
//!   same distance as the wavelength range divided by `stretch`. Anchors are
//!   reported in raw units.
//! * **Radius growth**: When no candidate is in reach the radius grows by a
//!   factor of 1.5 per scan. Once the disc would reach past the farthest
//!   point of the spectrum the walk ends normally.
//! * **Bounded**: Growth per step is capped; a walk that would exceed the cap
//!   fails with `DegenerateInput`.
//!
//! ## Key concepts
//!
//! For `Δ = N − P` the disc centre is
//!
//! ```text
//! C = P + Δ/2 + (h / |Δ|) · (−Δy, Δx),   h = √(r² − |Δ|²/4)
//! ```
//!
//! and its angle is `π − acos((Cx − Px)/r)` above `P`, `π − asin((Cy − Py)/r)`
//! below it.
//!
//! ## Invariants
//!
//! * The first anchor is the first candidate.
//! * Anchor wavelengths are strictly increasing.

// External dependencies
use core::f64::consts::PI;
use log::debug;
use num_traits::Float;

// Internal dependencies
use crate::algorithms::radius::RadiusConfig;
use crate::math::lit;
use crate::primitives::anchors::Anchor;
use crate::primitives::errors::SntError;
use crate::primitives::spectrum::Spectrum;
use crate::primitives::step::StepFunction;

/// Radius growth factor between scans.
pub const GROWTH: f64 = 1.5;

// ============================================================================
// Geometry
// ============================================================================

/// Angle of the disc centre `c` as seen from `p`.
#[inline]
pub fn rim_angle<T: Float>(c: (T, T), p: (T, T), r: T) -> T {
    let pi = lit::<T>(PI);
    let clamp = |v: T| v.max(-T::one()).min(T::one());
    if c.1 - p.1 >= T::zero() {
        pi - clamp((c.0 - p.0) / r).acos()
    } else {
        pi - clamp((c.1 - p.1) / r).asin()
    }
}

/// Centre of the radius-`r` disc through `p` and `n`, on the left of `p → n`.
#[inline]
pub fn disc_centre<T: Float>(p: (T, T), n: (T, T), r: T) -> (T, T) {
    let two = lit::<T>(2.0);
    let (dx, dy) = (n.0 - p.0, n.1 - p.1);
    let norm = dx.hypot(dy);
    let h = (r * r - norm * norm / lit(4.0)).max(T::zero()).sqrt();
    (
        p.0 + dx / two + (h / norm) * (-dy),
        p.1 + dy / two + (h / norm) * dx,
    )
}

/// Maximum number of radius growths allowed in one step.
pub fn expansion_cap<T: Float>(diagonal: T, r: T) -> usize {
    let ratio = (diagonal / r).max(T::one());
    let steps = (ratio.ln() / lit::<T>(GROWTH).ln()).ceil();
    steps.to_usize().unwrap_or(0) + 2
}

// ============================================================================
// Walk
// ============================================================================

/// Run the boundary walk over `candidates` (indices into `spectrum`).
pub fn select_anchors<T: Float>(
    spectrum: &Spectrum<T>,
    candidates: &[usize],
    step: &StepFunction<T>,
    radius: &RadiusConfig<T>,
    stretch: T,
) -> Result<Vec<Anchor<T>>, SntError> {
    let Some(&first) = candidates.first() else {
        return Err(SntError::DegenerateInput(
            "no candidate maxima to walk over".into(),
        ));
    };
    if !(stretch > T::zero()) {
        return Err(SntError::config("stretch", "must be positive to run the walk"));
    }

    let (_, max_x) = spectrum.wavelength_range().ok_or(SntError::EmptyInput)?;
    let (min_y, max_y) = spectrum.flux_range().ok_or(SntError::EmptyInput)?;

    let span_y = max_y - min_y;
    let scale = if span_y > T::zero() {
        (max_x - radius.lambda_min) / span_y / stretch
    } else {
        T::one() / stretch
    };
    let furthest = max_x.hypot(max_y) * stretch;
    if !furthest.is_finite() {
        return Err(SntError::DegenerateInput(
            "spectrum extent is not finite".into(),
        ));
    }

    let point = |i: usize| {
        let c = candidates[i];
        (spectrum.wavelength[c], spectrum.flux[c] * scale)
    };
    let anchor_at = |i: usize| {
        let c = candidates[i];
        Anchor::new(spectrum.wavelength[c], spectrum.flux[c], c)
    };

    let growth = lit::<T>(GROWTH);
    let two = lit::<T>(2.0);

    let mut anchors = vec![anchor_at(0)];
    let mut current = 0;
    let mut p = point(0);
    let mut r = radius.radius_at(spectrum.wavelength[first], step)?;

    loop {
        if !(r > T::zero()) || !r.is_finite() {
            return Err(SntError::DegenerateInput(format!(
                "search radius {} at wavelength {} is not positive",
                r.to_f64().unwrap_or(f64::NAN),
                p.0.to_f64().unwrap_or(f64::NAN)
            )));
        }
        let cap = expansion_cap(furthest, r);

        let mut growths = 0;
        let admissible = loop {
            let mut found = Vec::new();
            for i in current + 1..candidates.len() {
                let n = point(i);
                if n.0 > p.0 + two * r {
                    break;
                }
                let d = (n.0 - p.0).hypot(n.1 - p.1);
                if d < two * r && (p.0 != n.0 || p.1 != n.1) {
                    found.push(i);
                }
            }

            r = r * growth;
            if p.0 + two * r > furthest {
                debug!("boundary walk selected {} anchors", anchors.len());
                return Ok(anchors);
            }
            if !found.is_empty() {
                break found;
            }

            growths += 1;
            if growths > cap {
                return Err(SntError::DegenerateInput(format!(
                    "search radius grew {growths} times without reaching a candidate"
                )));
            }
        };
        r = r / growth;

        // Smallest angle wins; ties keep the earlier candidate
        let mut best = admissible[0];
        let mut best_angle = T::infinity();
        for &i in &admissible {
            let n = point(i);
            let a = rim_angle(disc_centre(p, n, r), p, r);
            if a < best_angle {
                best_angle = a;
                best = i;
            }
        }

        current = best;
        p = point(best);
        anchors.push(anchor_at(best));
        r = radius.radius_at(p.0, step)?;
    }
}

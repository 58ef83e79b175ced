#![cfg(feature = "dev")]
//! Tests for the continuum interpolants.
//!
//! ## Test Organization
//!
//! 1. **Exactness** - Knot values are reproduced
//! 2. **Bounds** - No extrapolation
//! 3. **Small sets** - One, two and three anchors
//! 4. **Errors** - Unknown kinds and bad knots

use approx::assert_relative_eq;

use snt::internals::algorithms::interpolation::{Continuum, CubicSpline, InterpolationKind, LinearInterpolant};
use snt::internals::primitives::anchors::Anchor;
use snt::internals::primitives::errors::SntError;

fn anchors() -> Vec<Anchor<f64>> {
    [(4000.0, 1.2), (4003.5, 1.25), (4010.0, 1.1), (4011.0, 1.3), (4020.0, 1.22), (4031.0, 1.27)]
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| Anchor::new(x, y, i * 10))
        .collect()
}

// ============================================================================
// Exactness Tests
// ============================================================================

/// Test that both kinds pass through every anchor.
#[test]
fn test_exact_at_anchors() {
    let a = anchors();
    for kind in [InterpolationKind::Linear, InterpolationKind::Cubic] {
        let f = Continuum::build(&a, kind).unwrap();
        for p in &a {
            assert_relative_eq!(f.eval(p.x), p.y, epsilon = 1e-10);
        }
    }
}

/// Test that the not-a-knot spline reproduces a cubic on uneven knots.
#[test]
fn test_cubic_reproduces_polynomial() {
    let poly = |x: f64| 1.0 - 0.2 * x + 0.05 * x * x - 0.003 * x * x * x;
    let xs = vec![0.0, 0.5, 2.0, 2.5, 4.0, 7.0, 7.5, 10.0];
    let ys: Vec<f64> = xs.iter().map(|&x| poly(x)).collect();
    let s = CubicSpline::new(xs, ys).unwrap();
    for i in 0..=100 {
        let x = i as f64 * 0.1;
        assert_relative_eq!(s.eval(x), poly(x), epsilon = 1e-9);
    }
}

// ============================================================================
// Bounds Tests
// ============================================================================

/// Test NaN outside the anchor range for both kinds.
#[test]
fn test_no_extrapolation() {
    let a = anchors();
    for kind in [InterpolationKind::Linear, InterpolationKind::Cubic] {
        let f = Continuum::build(&a, kind).unwrap();
        let out = f.eval_many(&[3999.9, 4000.0, 4031.0, 4031.1]);
        assert!(out[0].is_nan());
        assert!(!out[1].is_nan());
        assert!(!out[2].is_nan());
        assert!(out[3].is_nan());
    }
}

// ============================================================================
// Small Set Tests
// ============================================================================

/// Test that two anchors give a straight line for both kinds.
#[test]
fn test_two_anchors_are_a_line() {
    let a = [Anchor::new(0.0f64, 1.0, 0), Anchor::new(4.0, 3.0, 4)];
    let lin = Continuum::build(&a, InterpolationKind::Linear).unwrap();
    let cub = Continuum::build(&a, InterpolationKind::Cubic).unwrap();
    assert_relative_eq!(lin.eval(1.0), 1.5);
    assert_relative_eq!(cub.eval(1.0), 1.5, epsilon = 1e-12);
}

/// Test that an empty anchor set cannot be interpolated.
#[test]
fn test_empty_anchor_set() {
    assert!(matches!(
        Continuum::<f64>::build(&[], InterpolationKind::Linear),
        Err(SntError::DegenerateInput(_))
    ));
}

// ============================================================================
// Error Tests
// ============================================================================

/// Test kind parsing.
#[test]
fn test_kind_names() {
    assert_eq!("linear".parse::<InterpolationKind>(), Ok(InterpolationKind::Linear));
    assert_eq!(InterpolationKind::Cubic.to_string(), "cubic");
    assert!(matches!(
        "quadratic".parse::<InterpolationKind>(),
        Err(SntError::UnsupportedInterpolation(name)) if name == "quadratic"
    ));
}

/// Test that non-increasing knots are rejected.
#[test]
fn test_rejects_unordered_knots() {
    assert!(LinearInterpolant::new(vec![0.0f64, 2.0, 1.0], vec![0.0; 3]).is_err());
    assert!(CubicSpline::new(vec![0.0f64, 1.0, 1.0, 2.0], vec![0.0; 4]).is_err());
    assert!(matches!(
        LinearInterpolant::new(vec![0.0f64, 1.0], vec![0.0]),
        Err(SntError::MismatchedInputs { .. })
    ));
}

#![cfg(feature = "dev")]
//! Tests for anchor refinement and denoising.
//!
//! ## Test Organization
//!
//! 1. **Sharp peaks** - Settling and endpoint preservation
//! 2. **Close points** - Pair resolution
//! 3. **Denoise** - Median re-valuation

use snt::internals::algorithms::denoise::denoise;
use snt::internals::algorithms::refine::{refine, remove_close_points, remove_sharp_peaks, sharpness};
use snt::internals::primitives::anchors::{is_strictly_increasing, Anchor};

fn jagged(n: usize) -> Vec<Anchor<f64>> {
    (0..n)
        .map(|i| {
            let x = 100.0 + i as f64 * 2.0;
            let spike = if i % 9 == 4 { 0.3 + 0.01 * i as f64 } else { 0.0 };
            let wiggle = if i % 2 == 0 { 0.01 } else { -0.01 };
            Anchor::new(x, 1.0 + wiggle + spike, i * 5)
        })
        .collect()
}

// ============================================================================
// Sharp Peak Tests
// ============================================================================

/// Test that a refined set is left alone by a second pass.
///
/// Verifies:
/// - Every spike is gone after enough rounds
/// - Running the pass again returns the same set
/// - Output stays ordered
#[test]
fn test_sharp_removal_settles() {
    let a = jagged(60);
    let spikes = (0..60).filter(|i| i % 9 == 4).count();
    let once = remove_sharp_peaks(&a, 10);
    let again = remove_sharp_peaks(&once, 10);

    assert_eq!(once.len(), a.len() - spikes);
    assert!(is_strictly_increasing(&once));
    assert!(once.iter().all(|p| p.y < 1.02));
    assert_eq!(again, once);
    assert_eq!(remove_sharp_peaks(&once, 1), once);
}

/// Test that a plain wiggle without spikes is never pruned.
#[test]
fn test_wiggle_without_spikes_is_kept() {
    let a: Vec<Anchor<f64>> = (0..80)
        .map(|i| {
            let wiggle = if i % 2 == 0 { 0.01 } else { -0.01 };
            Anchor::new(100.0 + i as f64 * 2.0, 1.0 + wiggle, i * 5)
        })
        .collect();
    assert_eq!(remove_sharp_peaks(&a, 10), a);
}

/// Test that each round removes the current maximum sharpness.
#[test]
fn test_each_round_removes_the_sharpest() {
    let a = jagged(40);
    let scores = sharpness(&a);
    let (worst, _) = scores
        .iter()
        .enumerate()
        .fold((0, 0.0), |acc, (i, &s)| if s > acc.1 { (i, s) } else { acc });
    let after = remove_sharp_peaks(&a, 1);
    assert_eq!(after.len(), a.len() - 1);
    assert!(after.iter().all(|p| p.x != a[worst].x));
}

/// Test that fewer than three anchors are left alone.
#[test]
fn test_two_anchors_untouched() {
    let a = vec![Anchor::new(0.0f64, 1.0, 0), Anchor::new(1.0, 9.0, 1)];
    assert_eq!(remove_sharp_peaks(&a, 10), a);
    assert_eq!(refine(&a, 10), a);
}

// ============================================================================
// Close Point Tests
// ============================================================================

/// Test that of a crowded pair the point nearer its other neighbour goes.
#[test]
fn test_close_pair_keeps_the_isolated_point() {
    let a: Vec<Anchor<f64>> = [0.0, 10.0, 20.0, 30.0, 38.0, 38.2, 50.0, 60.0, 70.0]
        .iter()
        .enumerate()
        .map(|(i, &x)| Anchor::new(x, 1.0, i))
        .collect();
    let kept = remove_close_points(&a);
    assert_eq!(kept.len(), a.len() - 1);
    // 38.0 is 8 from its left neighbour, 38.2 is 11.8 from its right one
    assert!(kept.iter().all(|p| p.x != 38.0));
    assert!(kept.iter().any(|p| p.x == 38.2));
}

/// Test that evenly spaced anchors are all kept.
#[test]
fn test_even_spacing_is_kept() {
    let a: Vec<Anchor<f64>> = (0..20).map(|i| Anchor::new(i as f64, 1.0, i)).collect();
    assert_eq!(remove_close_points(&a), a);
}

// ============================================================================
// Denoise Tests
// ============================================================================

/// Test median re-valuation around each anchor.
#[test]
fn test_denoise_uses_local_median() {
    let flux: Vec<f64> = (0..50).map(|i| if i % 2 == 0 { 1.0 } else { 1.2 }).collect();
    let a = [Anchor::new(5.0, 0.0, 5), Anchor::new(20.0, 0.0, 20)];
    let out = denoise(&a, &flux, 2).unwrap();
    // [1.2, 1.0, 1.2, 1.0, 1.2] around odd index 5 -> 1.2
    assert_eq!(out[0].y, 1.2);
    // [1.0, 1.2, 1.0, 1.2, 1.0] around even index 20 -> 1.0
    assert_eq!(out[1].y, 1.0);
    assert!(denoise(&[Anchor::new(0.0, 0.0, 99)], &flux, 2).is_err());
}

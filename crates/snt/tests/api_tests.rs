#![cfg(feature = "dev")]
//! Tests for the high-level continuum API.
//!
//! These tests verify the builder, option validation and complete
//! single-row workflows.
//!
//! ## Test Organization
//!
//! 1. **Builder** - Defaults, duplicates, validation
//! 2. **Resolution** - Wavelength, velocity and header widths
//! 3. **Workflows** - Flat, triangle and absorption spectra
//! 4. **Errors** - Bad rows

use approx::assert_relative_eq;

use snt::prelude::*;

fn flat(n: usize) -> (Vec<f64>, Vec<f64>) {
    let wavelength = (0..n).map(|i| 5000.0 + i as f64).collect();
    (wavelength, vec![1.0; n])
}

fn absorption(n: usize) -> (Vec<f64>, Vec<f64>) {
    let wavelength: Vec<f64> = (0..n).map(|i| 5000.0 + i as f64 * 0.05).collect();
    let flux = wavelength
        .iter()
        .map(|&w| {
            let line = 0.7 * (-((w - 5015.0) / 0.4).powi(2)).exp();
            (1.0 + 0.003 * (5.0 * w).sin()) * (1.0 - line)
        })
        .collect();
    (wavelength, flux)
}

// ============================================================================
// Builder Tests
// ============================================================================

/// Test that the option table lists every option once.
#[test]
fn test_describe_lists_options() {
    let names: Vec<&str> = describe().iter().map(|o| o.name).collect();
    for expected in [
        "drop_first_n",
        "radius_min",
        "radius_max",
        "stretch",
        "interpolation_kind",
        "sharpness_iterations",
        "clip_window",
    ] {
        assert_eq!(names.iter().filter(|&&n| n == expected).count(), 1);
    }
}

/// Test that invalid options are rejected at build time.
///
/// Verifies:
/// - Negative radius
/// - radius_max below radius_min
/// - Zero stretch, zero clip window, non-finite exponent
/// - Non-positive line width
#[test]
fn test_invalid_options_rejected() {
    let cases: Vec<SntBuilder<f64>> = vec![
        Snt::builder().radius_min(-1.0),
        Snt::builder().radius_min(50.0).radius_max(40.0),
        Snt::builder().stretch(0.0),
        Snt::builder().clip_window(0),
        Snt::builder().penalty_exponent(f64::NAN),
        Snt::builder().fwhm(0.0),
        Snt::builder().fwhm_velocity(-3.0),
        Snt::builder().fwhm_header(" "),
    ];
    for builder in cases {
        let err = builder.build().unwrap_err();
        assert!(err.is_configuration(), "{err}");
    }
}

/// Test that an unknown interpolation name fails.
#[test]
fn test_quadratic_is_unsupported() {
    let err = Snt::<f64>::builder().interpolation_name("quadratic").build().unwrap_err();
    assert_eq!(err, SntError::UnsupportedInterpolation("quadratic".into()));
}

/// Test that the validator exported by the API agrees with the builder.
///
/// Verifies:
/// - Input checks reject unordered wavelengths and accept a clean row
/// - Option checks report the offending parameter
#[test]
fn test_api_validator_matches_builder() {
    use snt::api::Validator;

    let (wavelength, flux) = flat(20);
    assert!(Validator::validate_inputs(&wavelength, &flux).is_ok());
    let mut unordered = wavelength.clone();
    unordered.swap(3, 4);
    assert!(matches!(
        Validator::validate_inputs(&unordered, &flux),
        Err(SntError::InvalidInput(_))
    ));

    assert!(Validator::validate_worker_count(0).unwrap_err().is_configuration());
    assert_eq!(
        Validator::validate_radius_order(50.0, 40.0).unwrap_err(),
        Snt::builder().radius_min(50.0).radius_max(40.0).build().unwrap_err()
    );
}

/// Test that builder values reach the configuration.
#[test]
fn test_builder_values_propagate() {
    let snt = Snt::builder()
        .drop_first_n(3)
        .radius_min(10.0)
        .radius_max(15.0)
        .interpolation_name("cubic")
        .denoise(true)
        .clip_window(30)
        .fwhm(0.2)
        .build()
        .unwrap();
    let c = snt.config();
    assert_eq!(c.drop_first_n, 3);
    assert_eq!(c.radius_max, 15.0);
    assert_eq!(c.interpolation, Cubic);
    assert!(c.use_denoise);
    assert_eq!(c.clip_window, 30);
    assert_eq!(snt.resolution(), &Resolution::Wavelength(0.2));
}

// ============================================================================
// Resolution Tests
// ============================================================================

/// Test reading the line width from a header.
#[test]
fn test_header_resolution() {
    let (w, f) = flat(100);
    let mut header = Header::new();
    header.insert(DEFAULT_FWHM_KEY.to_string(), 6.0);

    let snt = Snt::builder().smoothing_filter(false).build().unwrap();
    let result = snt.fit_with_header(&w, &f, &header).unwrap();
    assert_relative_eq!(result.fwhm, 5000.0 * 6.0 / 299_792.458, epsilon = 1e-12);

    // Without a header the keyword cannot be found
    assert!(matches!(snt.fit(&w, &f), Err(SntError::InvalidInput(_))));
}

// ============================================================================
// Workflow Tests
// ============================================================================

/// Test that flat flux gives a continuum of exactly one.
///
/// Verifies:
/// - Single anchor from the highest-sample fallback
/// - Zero penalty map fallback
#[test]
fn test_flat_flux_continuum_is_one() {
    let (w, f) = flat(200);
    let snt = Snt::builder().fwhm(0.5).smoothing_filter(false).build().unwrap();
    let result = snt.fit(&w, &f).unwrap();

    assert_eq!(result.anchors.len(), 1);
    assert!(result.penalty_fallback);
    assert!(result.continuum.iter().all(|&c| c == 1.0));
    assert!(result.normalize(&f).iter().all(|&v| v == 1.0));
}

/// Test the triangle spectrum end to end.
#[test]
fn test_triangle_one_anchor_at_apex() {
    let w: Vec<f64> = (0..7).map(|i| i as f64).collect();
    let f = vec![0.0, 1.0, 2.0, 3.0, 2.0, 1.0, 0.0];
    let snt = Snt::builder()
        .fwhm(0.1)
        .max_vicinity(1)
        .adaptive_radius(false)
        .smoothing_filter(false)
        .build()
        .unwrap();
    let result = snt.fit(&w, &f).unwrap();

    assert_eq!(result.candidates, vec![3]);
    assert_eq!(result.anchors, vec![Anchor::new(3.0, 3.0, 3)]);
    assert!(result.continuum.iter().all(|&c| c == 3.0));
}

/// Test a spectrum with an absorption line for both interpolation kinds.
///
/// Verifies:
/// - Anchors are ordered and lie on the continuum, not in the line
/// - Continuum is exact at anchors and has the row length
#[test]
fn test_absorption_line_is_bridged() {
    let (w, f) = absorption(800);
    for kind in [Linear, Cubic] {
        let snt = Snt::builder().fwhm(0.1).interpolation(kind).build().unwrap();
        let result = snt.fit(&w, &f).unwrap();

        assert_eq!(result.continuum.len(), w.len());
        assert!(!result.anchors.is_empty());
        assert!(result.anchors.windows(2).all(|p| p[0].x < p[1].x));
        assert!(result.anchors.iter().all(|a| a.y > 0.9));
        for a in &result.anchors {
            let i = w.iter().position(|&x| x == a.x).unwrap();
            assert_relative_eq!(result.continuum[i], a.y, epsilon = 1e-9);
        }
    }
}

/// Test that the summary mentions the anchor table.
#[test]
fn test_display_summary() {
    let (w, f) = flat(50);
    let snt = Snt::builder().fwhm(0.5).smoothing_filter(false).build().unwrap();
    let text = snt.fit(&w, &f).unwrap().to_string();
    assert!(text.contains("Anchors:     1"));
    assert!(text.contains("degenerate"));
}

// ============================================================================
// Error Tests
// ============================================================================

/// Test row validation errors.
#[test]
fn test_bad_rows() {
    let snt = Snt::builder().fwhm(0.5).build().unwrap();
    assert_eq!(snt.fit(&[], &[]), Err(SntError::EmptyInput));
    assert!(matches!(
        snt.fit(&[1.0, 2.0], &[1.0]),
        Err(SntError::MismatchedInputs { .. })
    ));
    assert!(matches!(
        snt.fit(&[2.0, 1.0], &[1.0, 1.0]),
        Err(SntError::InvalidInput(_))
    ));
    // Smoothing needs eleven samples
    assert!(matches!(
        snt.fit(&[1.0, 2.0, 3.0], &[1.0, 2.0, 1.0]),
        Err(SntError::TooFewPoints { .. })
    ));
}

/// Test that dropping every sample is reported.
#[test]
fn test_drop_everything() {
    let (w, f) = flat(20);
    let snt = Snt::builder().fwhm(0.5).drop_first_n(20).smoothing_filter(false).build().unwrap();
    assert!(matches!(snt.fit(&w, &f), Err(SntError::DegenerateInput(_))));
}

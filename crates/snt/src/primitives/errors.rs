//! Error types for continuum estimation.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while building a
//! pipeline configuration or running it over a spectral row.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors carry the offending parameter name or value.
//! * **Deferred**: Configuration errors are collected by the builder and
//!   surfaced by `build()`, before any row is processed.
//! * **Deterministic**: Every error is a pure function of the input; none of
//!   them is worth retrying with the same data.
//!
//! ## Key concepts
//!
//! 1. **Configuration**: A parameter violates its declared constraint.
//! 2. **Input**: Sequences are empty, mismatched or too short for a filter.
//! 3. **Degenerate data**: Zero-variance penalty, no candidate maxima,
//!    runaway radius expansion.
//! 4. **Lookup**: A radius was requested before the start of the penalty map.
//!
//! ## Non-goals
//!
//! * This module does not perform validation itself.
//! * This module does not provide fallback strategies.

// External dependencies
use thiserror::Error;

// ============================================================================
// Error Type
// ============================================================================

/// Error type for continuum estimation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SntError {
    /// A configuration parameter fails its declared constraint.
    #[error("Invalid configuration: {parameter} {reason}")]
    InvalidConfiguration {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Human-readable description of the violated constraint.
        reason: String,
    },

    /// Input arrays are empty.
    #[error("Input arrays are empty")]
    EmptyInput,

    /// Wavelength and flux arrays must have the same number of elements.
    #[error("Length mismatch: wavelength has {wavelength_len} points, flux has {flux_len}")]
    MismatchedInputs {
        /// Number of wavelength samples.
        wavelength_len: usize,
        /// Number of flux samples.
        flux_len: usize,
    },

    /// The sequence is shorter than a filter window or stage requirement.
    #[error("Too few points: got {got}, need at least {min}")]
    TooFewPoints {
        /// Number of points provided.
        got: usize,
        /// Minimum required points.
        min: usize,
    },

    /// Generic invalid input with a descriptive message.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The data carries no usable information for a stage.
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// Interpolation kind is not one of `linear` or `cubic`.
    #[error("Interpolation type <{0}> not implemented (expected 'linear' or 'cubic')")]
    UnsupportedInterpolation(String),

    /// Radius lookup before the first break point of the step function.
    #[error("Position {x} precedes the penalty map start {start}")]
    OutOfRange {
        /// Requested position.
        x: f64,
        /// First break point of the step function.
        start: f64,
    },

    /// Parameter was set multiple times in the builder.
    #[error("Parameter '{parameter}' was set multiple times. Each parameter can only be configured once.")]
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

impl SntError {
    /// Shorthand for a configuration error.
    pub fn config(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            parameter,
            reason: reason.into(),
        }
    }

    /// Whether the error belongs to the configuration stage.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfiguration { .. }
                | Self::DuplicateParameter { .. }
                | Self::UnsupportedInterpolation(_)
        )
    }
}

//! JSON configuration files.
//!
//! ## Purpose
//!
//! Holds every estimator option plus the batch options in one serde record,
//! so a run can be described by a file instead of many command-line flags:
//!
//! ```json
//! {
//!   "radius_max": 45,
//!   "interpolation_kind": "cubic",
//!   "resolution": { "velocity": 6.5 },
//!   "run_parallel": true,
//!   "worker_count": 4
//! }
//! ```
//!
//! Missing keys take their defaults. Values are checked once, by
//! [`BatchConfig::build`], through the same validators the core builder uses.

// External dependencies
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// Export dependencies from snt crate
use snt::api::{OptionInfo, Validator};
use snt::prelude::{Resolution, Snt, SntBuilder, SntConfig, DEFAULT_FWHM_KEY};

// Internal dependencies
use crate::engine::executor::BatchExecutor;
use crate::error::BatchError;

/// Batch-only options, in the layout of the core option table.
pub const BATCH_OPTIONS: &[OptionInfo] = &[
    OptionInfo {
        name: "run_parallel",
        description: "estimate rows on a worker pool instead of one after another",
        default: "false",
    },
    OptionInfo {
        name: "worker_count",
        description: "threads in the worker pool",
        default: "1",
    },
];

/// Serializable line width source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSpec {
    /// FWHM in wavelength units.
    Wavelength(f64),

    /// FWHM in km/s.
    Velocity(f64),

    /// Header keyword holding a km/s width.
    Header(String),
}

impl Default for ResolutionSpec {
    fn default() -> Self {
        Self::Header(DEFAULT_FWHM_KEY.to_string())
    }
}

impl From<ResolutionSpec> for Resolution<f64> {
    fn from(spec: ResolutionSpec) -> Self {
        match spec {
            ResolutionSpec::Wavelength(w) => Resolution::Wavelength(w),
            ResolutionSpec::Velocity(v) => Resolution::Velocity(v),
            ResolutionSpec::Header(key) => Resolution::Header(key),
        }
    }
}

/// Estimator and batch options as stored in a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    pub drop_first_n: usize,
    pub radius_min: f64,
    pub radius_max: f64,
    pub max_vicinity: usize,
    pub stretch: f64,
    pub use_adaptive_radius: bool,
    pub interpolation_kind: String,
    pub use_denoise: bool,
    pub use_smoothing_filter: bool,
    pub penalty_exponent: f64,
    pub sharpness_iterations: usize,
    pub denoise_window: usize,
    pub clip_window: usize,

    /// Source of the line width.
    pub resolution: ResolutionSpec,

    /// Estimate rows on a worker pool.
    pub run_parallel: bool,

    /// Threads in the worker pool.
    pub worker_count: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        let core = SntConfig::<f64>::default();
        Self {
            drop_first_n: core.drop_first_n,
            radius_min: core.radius_min,
            radius_max: core.radius_max,
            max_vicinity: core.max_vicinity,
            stretch: core.stretch,
            use_adaptive_radius: core.use_adaptive_radius,
            interpolation_kind: core.interpolation.as_str().to_string(),
            use_denoise: core.use_denoise,
            use_smoothing_filter: core.use_smoothing_filter,
            penalty_exponent: core.penalty_exponent,
            sharpness_iterations: core.sharpness_iterations,
            denoise_window: core.denoise_window,
            clip_window: core.clip_window,
            resolution: ResolutionSpec::default(),
            run_parallel: false,
            worker_count: 1,
        }
    }
}

impl BatchConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, BatchError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a configuration from JSON text.
    pub fn from_json(content: &str) -> Result<Self, BatchError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, BatchError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the configuration as JSON.
    pub fn save(&self, path: &Path) -> Result<(), BatchError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Core builder carrying every estimator option of this file.
    pub fn builder(&self) -> SntBuilder<f64> {
        Snt::builder()
            .drop_first_n(self.drop_first_n)
            .radius_min(self.radius_min)
            .radius_max(self.radius_max)
            .max_vicinity(self.max_vicinity)
            .stretch(self.stretch)
            .adaptive_radius(self.use_adaptive_radius)
            .interpolation_name(&self.interpolation_kind)
            .denoise(self.use_denoise)
            .smoothing_filter(self.use_smoothing_filter)
            .penalty_exponent(self.penalty_exponent)
            .sharpness_iterations(self.sharpness_iterations)
            .denoise_window(self.denoise_window)
            .clip_window(self.clip_window)
            .resolution(self.resolution.clone().into())
    }

    /// Validate every option and build the batch executor.
    pub fn build(&self) -> Result<BatchExecutor<f64>, BatchError> {
        Validator::validate_worker_count(self.worker_count)?;
        let snt = self.builder().build()?;
        Ok(BatchExecutor::new(snt, self.run_parallel, self.worker_count))
    }
}

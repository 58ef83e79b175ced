//! Spectra sharing one wavelength grid.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::error::BatchError;

/// Several flux rows sampled on the same wavelengths.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumTable<T> {
    /// Shared wavelength grid.
    pub wavelength: Vec<T>,

    /// Row names, one per flux row.
    pub names: Vec<String>,

    /// Flux rows, each as long as the grid.
    pub rows: Vec<Vec<T>>,
}

impl<T: Float> SpectrumTable<T> {
    /// Create a table, checking that every row matches the grid.
    pub fn new(wavelength: Vec<T>, names: Vec<String>, rows: Vec<Vec<T>>) -> Result<Self, BatchError> {
        if names.len() != rows.len() {
            return Err(BatchError::InvalidFormat(format!(
                "{} row names for {} rows",
                names.len(),
                rows.len()
            )));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != wavelength.len()) {
            return Err(BatchError::InvalidFormat(format!(
                "row {i} has {} samples, grid has {}",
                row.len(),
                wavelength.len()
            )));
        }
        Ok(Self { wavelength, names, rows })
    }

    /// Create a table with rows named `flux_0`, `flux_1`, ...
    pub fn unnamed(wavelength: Vec<T>, rows: Vec<Vec<T>>) -> Result<Self, BatchError> {
        let names = (0..rows.len()).map(|i| format!("flux_{i}")).collect();
        Self::new(wavelength, names, rows)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

//! Reading spectrum tables and header files.
//!
//! A spectrum table is a CSV file with a header line. The first column holds
//! the shared wavelength grid, every further column one flux row:
//!
//! ```text
//! wavelength,star_a,star_b
//! 5000.00,0.981,1.204
//! 5000.05,0.979,1.199
//! ```
//!
//! A header file is a JSON object of numeric keywords, e.g.
//! `{ "HIERARCH ESO QC CCF FWHM": 6.2 }`.

// External dependencies
use log::info;
use std::fs::File;
use std::io::Read;
use std::path::Path;

// Export dependencies from snt crate
use snt::prelude::Header;

// Internal dependencies
use crate::error::BatchError;
use crate::table::SpectrumTable;

/// Read a spectrum table from a CSV file.
pub fn read_table(path: &Path) -> Result<SpectrumTable<f64>, BatchError> {
    let table = read_table_from(File::open(path)?)?;
    info!("Read {} rows of {} samples from {}", table.len(), table.wavelength.len(), path.display());
    Ok(table)
}

/// Read a spectrum table from any CSV source.
pub fn read_table_from<R: Read>(source: R) -> Result<SpectrumTable<f64>, BatchError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(source);

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if columns.len() < 2 {
        return Err(BatchError::InvalidFormat(format!(
            "expected a wavelength column and at least one flux column, found {} column(s)",
            columns.len()
        )));
    }

    let mut wavelength = Vec::new();
    let mut rows: Vec<Vec<f64>> = vec![Vec::new(); columns.len() - 1];
    for record in reader.deserialize::<Vec<f64>>() {
        let record = record?;
        wavelength.push(record[0]);
        for (row, &value) in rows.iter_mut().zip(&record[1..]) {
            row.push(value);
        }
    }

    SpectrumTable::new(wavelength, columns[1..].to_vec(), rows)
}

/// Read header keywords from a JSON object.
pub fn read_header(path: &Path) -> Result<Header, BatchError> {
    let header: Header = serde_json::from_reader(File::open(path)?)?;
    info!("Read {} header keywords from {}", header.len(), path.display());
    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_become_rows() {
        let text = "wavelength, a, b\n1.0, 2.0, 3.0\n2.0, 4.0, 5.0\n";
        let t = read_table_from(text.as_bytes()).unwrap();
        assert_eq!(t.wavelength, vec![1.0, 2.0]);
        assert_eq!(t.names, vec!["a", "b"]);
        assert_eq!(t.rows, vec![vec![2.0, 4.0], vec![3.0, 5.0]]);
    }

    #[test]
    fn single_column_is_rejected() {
        let err = read_table_from("wavelength\n1.0\n".as_bytes()).unwrap_err();
        assert!(matches!(err, BatchError::InvalidFormat(_)));
    }

    #[test]
    fn ragged_and_non_numeric_records_fail() {
        assert!(matches!(
            read_table_from("w,a\n1.0,2.0\n2.0\n".as_bytes()),
            Err(BatchError::Csv(_))
        ));
        assert!(matches!(
            read_table_from("w,a\n1.0,abc\n".as_bytes()),
            Err(BatchError::Csv(_))
        ));
    }
}

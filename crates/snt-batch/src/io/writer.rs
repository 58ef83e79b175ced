//! Writing continua and diagnostics as CSV.
//!
//! Every file is in long format with a leading `row` column naming the flux
//! row a record belongs to. Failed rows contribute no records.
//!
//! | File             | Columns                                          |
//! |------------------|--------------------------------------------------|
//! | `anchors.csv`    | row, wavelength, flux, index                     |
//! | `continuum.csv`  | row, wavelength, flux, continuum, normalized     |
//! | `penalty.csv`    | row, wavelength, penalty, step                   |
//! | `candidates.csv` | row, wavelength, flux, index                     |

// External dependencies
use log::info;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

// Export dependencies from snt crate
use snt::prelude::RowResult;

// Internal dependencies
use crate::engine::executor::RowOutcome;
use crate::error::BatchError;
use crate::table::SpectrumTable;

pub const ANCHORS_FILE: &str = "anchors.csv";
pub const CONTINUUM_FILE: &str = "continuum.csv";
pub const PENALTY_FILE: &str = "penalty.csv";
pub const CANDIDATES_FILE: &str = "candidates.csv";

// ============================================================================
// Records
// ============================================================================

#[derive(Serialize)]
struct PointRecord<'a> {
    row: &'a str,
    wavelength: f64,
    flux: f64,
    index: usize,
}

#[derive(Serialize)]
struct ContinuumRecord<'a> {
    row: &'a str,
    wavelength: f64,
    flux: f64,
    continuum: f64,
    normalized: f64,
}

#[derive(Serialize)]
struct PenaltyRecord<'a> {
    row: &'a str,
    wavelength: f64,
    penalty: f64,
    step: f64,
}

/// Successful rows paired with their names and input flux.
fn successes<'a>(
    table: &'a SpectrumTable<f64>,
    results: &'a [RowOutcome<f64>],
) -> impl Iterator<Item = (&'a str, &'a [f64], &'a RowResult<f64>)> {
    table
        .names
        .iter()
        .zip(&table.rows)
        .zip(results)
        .filter_map(|((name, flux), r)| r.as_ref().ok().map(|r| (name.as_str(), flux.as_slice(), r)))
}

// ============================================================================
// Writers
// ============================================================================

/// Write the final anchors of every successful row. Returns the record count.
pub fn write_anchors<W: Write>(sink: W, table: &SpectrumTable<f64>, results: &[RowOutcome<f64>]) -> Result<usize, BatchError> {
    let mut writer = csv::Writer::from_writer(sink);
    let mut count = 0;
    for (row, _, result) in successes(table, results) {
        for a in &result.anchors {
            writer.serialize(PointRecord {
                row,
                wavelength: a.x,
                flux: a.y,
                index: a.index,
            })?;
            count += 1;
        }
    }
    writer.flush()?;
    Ok(count)
}

/// Write the continuum and normalized flux at every input wavelength.
pub fn write_continuum<W: Write>(sink: W, table: &SpectrumTable<f64>, results: &[RowOutcome<f64>]) -> Result<usize, BatchError> {
    let mut writer = csv::Writer::from_writer(sink);
    let mut count = 0;
    for (row, flux, result) in successes(table, results) {
        let normalized = result.normalize(flux);
        for (i, &wavelength) in result.wavelength.iter().enumerate() {
            writer.serialize(ContinuumRecord {
                row,
                wavelength,
                flux: flux[i],
                continuum: result.continuum[i],
                normalized: normalized[i],
            })?;
            count += 1;
        }
    }
    writer.flush()?;
    Ok(count)
}

/// Write the penalty and its step function over the cleaned wavelengths.
pub fn write_penalty<W: Write>(sink: W, table: &SpectrumTable<f64>, results: &[RowOutcome<f64>]) -> Result<usize, BatchError> {
    let mut writer = csv::Writer::from_writer(sink);
    let mut count = 0;
    for (row, _, result) in successes(table, results) {
        let map = &result.penalty;
        for ((&wavelength, &penalty), &step) in map.step.x.iter().zip(&map.penalty).zip(&map.step.y) {
            writer.serialize(PenaltyRecord {
                row,
                wavelength,
                penalty,
                step,
            })?;
            count += 1;
        }
    }
    writer.flush()?;
    Ok(count)
}

/// Write the candidate maxima the boundary walk chose from.
pub fn write_candidates<W: Write>(sink: W, table: &SpectrumTable<f64>, results: &[RowOutcome<f64>]) -> Result<usize, BatchError> {
    let mut writer = csv::Writer::from_writer(sink);
    let mut count = 0;
    for (row, _, result) in successes(table, results) {
        for p in result.candidate_points() {
            writer.serialize(PointRecord {
                row,
                wavelength: p.x,
                flux: p.y,
                index: p.index,
            })?;
            count += 1;
        }
    }
    writer.flush()?;
    Ok(count)
}

/// Paths of the files written by [`write_outputs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    pub anchors: PathBuf,
    pub continuum: PathBuf,
    pub penalty: PathBuf,
    pub candidates: PathBuf,
}

/// Write all four output files into `dir`, creating it if needed.
pub fn write_outputs(dir: &Path, table: &SpectrumTable<f64>, results: &[RowOutcome<f64>]) -> Result<OutputFiles, BatchError> {
    fs::create_dir_all(dir)?;
    let files = OutputFiles {
        anchors: dir.join(ANCHORS_FILE),
        continuum: dir.join(CONTINUUM_FILE),
        penalty: dir.join(PENALTY_FILE),
        candidates: dir.join(CANDIDATES_FILE),
    };

    let n = write_anchors(File::create(&files.anchors)?, table, results)?;
    info!("Wrote {n} anchors to {}", files.anchors.display());
    let n = write_continuum(File::create(&files.continuum)?, table, results)?;
    info!("Wrote {n} continuum samples to {}", files.continuum.display());
    let n = write_penalty(File::create(&files.penalty)?, table, results)?;
    info!("Wrote {n} penalty samples to {}", files.penalty.display());
    let n = write_candidates(File::create(&files.candidates)?, table, results)?;
    info!("Wrote {n} candidates to {}", files.candidates.display());

    Ok(files)
}

//! # snt
//!
//! Command-line continuum estimation for tables of 1-D spectra.
//!
//! ## Usage
//!
//! ```bash
//! # Continuum of every column of a CSV table, FWHM in wavelength units
//! snt normalize spectra.csv --fwhm 0.12 --out results/
//!
//! # Options from a JSON file, line width from a header keyword, 4 workers
//! snt normalize spectra.csv --config run.json --header header.json -j 4
//!
//! # List options and defaults
//! snt describe
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}

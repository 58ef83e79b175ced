use anyhow::Result;
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod describe;
mod normalize;

/// snt - continuum estimation for 1-D spectra
#[derive(Parser)]
#[command(name = "snt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Interpolation through the final anchors.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum InterpolationArg {
    /// Straight segments between anchors
    Linear,
    /// Not-a-knot cubic spline
    Cubic,
}

impl InterpolationArg {
    fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Cubic => "cubic",
        }
    }
}

/// Options of the `normalize` command. Flags override the config file.
#[derive(Args)]
#[command(group(ArgGroup::new("width").args(["fwhm", "fwhm_kms", "fwhm_key"])))]
pub struct NormalizeArgs {
    /// Input CSV: wavelength column followed by one column per spectrum
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output directory for continuum and diagnostic CSV files
    #[arg(short, long, value_name = "DIR", default_value = "snt-output")]
    out: PathBuf,

    /// Load options from a JSON config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON object of header keywords (for a keyword line width)
    #[arg(long, value_name = "FILE")]
    header: Option<PathBuf>,

    /// Line FWHM in wavelength units
    #[arg(long)]
    fwhm: Option<f64>,

    /// Line FWHM in km/s
    #[arg(long)]
    fwhm_kms: Option<f64>,

    /// Header keyword holding the line FWHM in km/s
    #[arg(long, value_name = "KEY")]
    fwhm_key: Option<String>,

    /// Interpolation through the anchors
    #[arg(short, long, value_enum)]
    interpolation: Option<InterpolationArg>,

    /// Maximum search radius
    #[arg(long)]
    radius_max: Option<f64>,

    /// Replace anchor flux with the local median
    #[arg(long)]
    denoise: bool,

    /// Run rows on a worker pool
    #[arg(short, long)]
    parallel: bool,

    /// Threads in the worker pool (implies --parallel)
    #[arg(short = 'j', long)]
    workers: Option<usize>,

    /// Save the effective configuration as JSON
    #[arg(long, value_name = "FILE")]
    save_config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the continuum of every spectrum in a CSV table
    Normalize(NormalizeArgs),

    /// List configuration options and their defaults
    Describe,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Normalize(args) => normalize::run(args),
        Commands::Describe => describe::run(),
    }
}

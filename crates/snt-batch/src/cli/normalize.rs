use anyhow::{bail, Context, Result};
use log::{error, info};

use snt_batch::prelude::*;

use super::NormalizeArgs;

/// Estimate continua for a CSV table and write the output files
pub fn run(args: NormalizeArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => BatchConfig::from_file(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => BatchConfig::default(),
    };
    apply_overrides(&mut config, &args);

    if let Some(path) = &args.save_config {
        config
            .save(path)
            .with_context(|| format!("Failed to save config file: {}", path.display()))?;
        info!("Saved configuration to {}", path.display());
    }

    let executor = config.build().context("Invalid configuration")?;

    let table = read_table(&args.input)
        .with_context(|| format!("Failed to read spectra: {}", args.input.display()))?;
    let header = match &args.header {
        Some(path) => Some(
            read_header(path).with_context(|| format!("Failed to read header file: {}", path.display()))?,
        ),
        None => None,
    };

    let results = executor.run(&table, header.as_ref())?;
    for (name, result) in table.names.iter().zip(&results) {
        match result {
            Ok(r) => info!("{name}: {} anchors, {} of {} samples covered", r.anchors.len(), r.covered(), r.wavelength.len()),
            Err(e) => error!("{name}: {e}"),
        }
    }

    let files = write_outputs(&args.out, &table, &results)
        .with_context(|| format!("Failed to write results to {}", args.out.display()))?;
    println!("Continuum written to {}", files.continuum.display());

    let failed = results.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        bail!("{failed} of {} spectra failed", results.len());
    }
    Ok(())
}

fn apply_overrides(config: &mut BatchConfig, args: &NormalizeArgs) {
    if let Some(w) = args.fwhm {
        config.resolution = ResolutionSpec::Wavelength(w);
    }
    if let Some(v) = args.fwhm_kms {
        config.resolution = ResolutionSpec::Velocity(v);
    }
    if let Some(key) = &args.fwhm_key {
        config.resolution = ResolutionSpec::Header(key.clone());
    }
    if let Some(kind) = args.interpolation {
        config.interpolation_kind = kind.as_str().to_string();
    }
    if let Some(r) = args.radius_max {
        config.radius_max = r;
    }
    if args.denoise {
        config.use_denoise = true;
    }
    if args.parallel {
        config.run_parallel = true;
    }
    if let Some(n) = args.workers {
        config.run_parallel = true;
        config.worker_count = n;
    }
}

//! Bake command - runs ociobakelut for the prescribed LUT.

use anyhow::{bail, Context, Result};
use olp_core::runner::{BakeRunner, ProcessRunner};
use tracing::{info, warn};

use crate::BakeArgs;

/// Runs the bake and prints the LUT path; the report follows with `-v`.
pub fn run(args: BakeArgs, verbose: u8) -> Result<()> {
    let (options, prescription) = super::prescribe(&args.flags)?;
    let flags = &args.flags;
    let icc_given = flags.icc_white_point.is_some()
        || flags.icc_display.is_some()
        || flags.icc_description.is_some()
        || flags.icc_copyright.is_some();
    if icc_given && !options.format.is_icc() {
        warn!("ICC options ignored for {}", options.format.label());
    }

    let outcome = ProcessRunner
        .run(&prescription.command, &prescription.env)
        .with_context(|| format!("Failed to run {}", options.bake_tool))?;

    if !outcome.is_success() {
        eprint!("{}", outcome.stderr);
        match outcome.status {
            Some(code) => bail!("{} exited with status {code}", options.bake_tool),
            None => bail!("{} was terminated by a signal", options.bake_tool),
        }
    }

    info!(filename = %prescription.filename.display(), "LUT written");
    println!("{}", prescription.filename.display());
    if verbose > 0 {
        println!("{}", prescription.report);
    }
    Ok(())
}

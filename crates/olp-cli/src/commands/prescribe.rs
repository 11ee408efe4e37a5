//! Prescribe command - dry run printing what a bake would do.

use anyhow::{Context, Result};

use crate::PrescribeArgs;

/// Prints the report, or filename/command/report as JSON.
pub fn run(args: PrescribeArgs) -> Result<()> {
    let (_, prescription) = super::prescribe(&args.flags)?;

    if args.json {
        let json =
            serde_json::to_string_pretty(&prescription).context("Failed to encode prescription")?;
        println!("{json}");
    } else {
        println!("{}", prescription.report);
    }
    Ok(())
}

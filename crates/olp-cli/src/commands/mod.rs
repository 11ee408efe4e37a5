//! CLI command implementations

pub mod bake;
pub mod config;
pub mod formats;
pub mod prescribe;

#[cfg(feature = "gui")]
pub mod gui;
#[cfg(feature = "gui")]
pub mod prefs;

use anyhow::{Context, Result};
use olp_core::{BakeOptions, Prescription};

use crate::BakeFlags;

/// Validated options and their prescription.
pub fn prescribe(flags: &BakeFlags) -> Result<(BakeOptions, Prescription)> {
    let options = flags.to_options();
    options.validate().context("Invalid bake options")?;
    let prescription = Prescription::prepare(&options);
    Ok((options, prescription))
}

//! # olp-core
//!
//! Prescription engine for `ociobakelut` LUT bakes.
//!
//! Given a [`BakeOptions`] snapshot of the user's selections, this crate
//! derives three things, all pure and deterministic:
//!
//! - [`derive_filename`] - the canonical output path
//! - [`build_command`] - the argument vector for the bake tool
//! - [`format_report`] - a human-readable prescription block
//!
//! [`Prescription::prepare`] runs the three in order. Executing the command
//! is left to a [`runner::BakeRunner`].
//!
//! # Quick Start
//!
//! ```
//! use olp_core::{BakeOptions, Prescription, Toggle};
//!
//! let options = BakeOptions {
//!     config_path: "/path/to/config.ocio".into(),
//!     input_space: "ACEScg".into(),
//!     output_space: Toggle::on("sRGB"),
//!     output_dir: "/var/tmp".into(),
//!     ..Default::default()
//! };
//!
//! let rx = Prescription::prepare(&options);
//! assert_eq!(rx.filename.to_str(), Some("/var/tmp/ACEScg_to_sRGB.csp"));
//! assert_eq!(rx.command[0], "ociobakelut");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod command;
mod error;
mod filename;
mod format;
mod options;
mod report;

pub mod runner;

use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

pub use command::{build_command, flags};
pub use error::{PrescriptionError, PrescriptionResult};
pub use filename::{derive_filename, input_prefix, lut_radical, output_suffix};
pub use format::{sizes, LutFormat, DEFAULT_SIZE, ICC_EXTENSION, LUT_FORMATS, MAX_SIZE, MIN_SIZE};
pub use options::{BakeOptions, Toggle, DEFAULT_BAKE_TOOL, SEQ_ENV, SHOT_ENV};
pub use report::{format_report, NOT_APPLICABLE};

/// Everything derived from one [`BakeOptions`] snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prescription {
    /// Output LUT path.
    pub filename: PathBuf,
    /// Bake tool argument vector, program first.
    pub command: Vec<String>,
    /// Prescription report for the command.
    pub report: String,
    /// Context variables set on the bake process.
    pub env: Vec<(String, String)>,
}

impl Prescription {
    /// Derives filename, command and report from `options`.
    pub fn prepare(options: &BakeOptions) -> Self {
        let filename = derive_filename(options);
        let command = build_command(options, &filename);
        let report = format_report(options, &command);
        let env = options.context_env();
        debug!(command = %command.join(" "), ?env, "prescription prepared");

        Self {
            filename,
            command,
            report,
            env,
        }
    }
}

//! # olp-ocio
//!
//! Colour-config provider for the LUT prescription tools.
//!
//! Reads `.ocio` configuration files (v1 and v2) and returns the ordered
//! name lists a bake front-end offers in its selectors:
//! - colour spaces (scene and display referred, inactive ones removed)
//! - looks
//! - displays (filtered by `active_displays`)
//!
//! # Quick Start
//!
//! ```
//! use olp_ocio::ConfigSummary;
//!
//! let yaml = "ocio_profile_version: 1\ncolorspaces:\n  - !<ColorSpace> {name: linear}\n";
//! let config = ConfigSummary::from_yaml_str(yaml).unwrap();
//! assert_eq!(config.colorspaces, ["linear"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod error;

use std::path::Path;

pub use config::{ConfigSummary, ConfigVersion};
pub use error::{OcioError, OcioResult};

/// Environment variable naming the default config.
pub const OCIO_ENV: &str = "OCIO";

/// Source of config summaries.
///
/// The front-end talks to this trait so tests can hand it fixed name lists.
pub trait ColorConfigProvider {
    /// Loads the config at `path`.
    fn load(&self, path: &Path) -> OcioResult<ConfigSummary>;
}

/// Provider reading config YAML from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlConfigProvider;

impl ColorConfigProvider for YamlConfigProvider {
    fn load(&self, path: &Path) -> OcioResult<ConfigSummary> {
        ConfigSummary::from_file(path)
    }
}

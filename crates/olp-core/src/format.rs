//! LUT output formats understood by `ociobakelut`.
//!
//! A format couples the logical name passed to `--format` with the file
//! extension used for the output path. Both travel together in one
//! [`LutFormat`] value so the ICC gate can never disagree with itself.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{PrescriptionError, PrescriptionResult};

/// Label pattern used by the format selector, e.g. `cinespace (.csp)`.
static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<lut_format>\w+) \(.(?P<lut_ext>\w{3})\)$").expect("valid format label regex")
});

/// Extension that enables the ICC-only options.
pub const ICC_EXTENSION: &str = "icc";

/// Formats offered by the front-ends, as `(name, extension)`.
pub const LUT_FORMATS: &[(&str, &str)] = &[
    ("cinespace", "csp"),
    ("flame", "3dl"),
    ("houdini", "lut"),
    ("icc", "icc"),
    ("iridas_itx", "itx"),
    ("lustre", "3dl"),
    ("truelight", "cub"),
    ("uncompressed_clf", "clf"),
    ("ctf", "ctf"),
];

/// Smallest cube/shaper size offered.
pub const MIN_SIZE: u32 = 1;
/// Largest cube/shaper size offered.
pub const MAX_SIZE: u32 = 66;
/// Size preselected for both cube and shaper.
pub const DEFAULT_SIZE: &str = "33";

/// All selectable cube/shaper sizes as strings, `"1"` to `"66"`.
pub fn sizes() -> Vec<String> {
    (MIN_SIZE..=MAX_SIZE).map(|s| s.to_string()).collect()
}

/// A bake output format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LutFormat {
    /// Name given to `--format`.
    pub name: String,
    /// Output file extension, without the dot.
    pub extension: String,
}

impl LutFormat {
    /// Creates a format from its parts. No catalogue check is made.
    pub fn new(name: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extension: extension.into(),
        }
    }

    /// Parses a selector label such as `icc (.icc)`.
    pub fn from_label(label: &str) -> PrescriptionResult<Self> {
        let caps = LABEL_RE
            .captures(label)
            .ok_or_else(|| PrescriptionError::MalformedFormatSelection {
                label: label.to_string(),
            })?;
        Ok(Self::new(&caps["lut_format"], &caps["lut_ext"]))
    }

    /// Looks a format up in [`LUT_FORMATS`] by name.
    pub fn from_name(name: &str) -> PrescriptionResult<Self> {
        LUT_FORMATS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(n, e)| Self::new(*n, *e))
            .ok_or_else(|| PrescriptionError::UnknownFormat {
                name: name.to_string(),
            })
    }

    /// Every catalogue format, in selector order.
    pub fn all() -> Vec<Self> {
        LUT_FORMATS.iter().map(|(n, e)| Self::new(*n, *e)).collect()
    }

    /// Selector label, the inverse of [`LutFormat::from_label`].
    pub fn label(&self) -> String {
        format!("{} (.{})", self.name, self.extension)
    }

    /// True when ICC metadata options apply.
    pub fn is_icc(&self) -> bool {
        self.extension == ICC_EXTENSION
    }
}

impl Default for LutFormat {
    fn default() -> Self {
        Self::new("cinespace", "csp")
    }
}

impl fmt::Display for LutFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

//! The bake options record.
//!
//! A [`BakeOptions`] is a snapshot of everything the user selected for one
//! bake. It is built fresh for every bake and never mutated afterwards;
//! the filename, argument vector and report are all derived from it.

use serde::{Deserialize, Serialize};

use crate::error::{PrescriptionError, PrescriptionResult};
use crate::format::LutFormat;

/// Executable invoked when no other bake tool is configured.
pub const DEFAULT_BAKE_TOOL: &str = "ociobakelut";

/// OCIO context variable holding the sequence tag.
pub const SEQ_ENV: &str = "SEQ";

/// OCIO context variable holding the shot tag.
pub const SHOT_ENV: &str = "SHOT";

/// An optional value guarded by a checkbox.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toggle {
    /// Checkbox state.
    pub enabled: bool,
    /// Text held by the associated widget, kept even when disabled.
    pub value: String,
}

impl Toggle {
    /// An enabled toggle holding `value`.
    pub fn on(value: impl Into<String>) -> Self {
        Self {
            enabled: true,
            value: value.into(),
        }
    }

    /// A disabled toggle that still remembers `value`.
    pub fn off(value: impl Into<String>) -> Self {
        Self {
            enabled: false,
            value: value.into(),
        }
    }

    /// The value when enabled and non-empty.
    pub fn active(&self) -> Option<&str> {
        self.enabled_value().filter(|v| !v.is_empty())
    }

    /// The value when enabled, possibly empty.
    pub fn enabled_value(&self) -> Option<&str> {
        self.enabled.then_some(self.value.as_str())
    }
}

/// Everything needed to prescribe one LUT bake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BakeOptions {
    /// Name or path of the bake executable.
    pub bake_tool: String,
    /// Active OCIO config.
    pub config_path: String,
    /// Sequence context tag, empty when absent.
    pub sequence: String,
    /// Shot context tag, empty when absent.
    pub shot: String,
    /// Source colour space.
    pub input_space: String,
    /// Optional shaper colour space.
    pub shaper_space: Toggle,
    /// Destination colour space; takes precedence over `looks`.
    pub output_space: Toggle,
    /// Destination look.
    pub looks: Toggle,
    /// 3D cube size.
    pub cube_size: Toggle,
    /// 1D shaper size.
    pub shaper_size: Toggle,
    /// Output format and extension.
    pub format: LutFormat,
    /// ICC white point in kelvin.
    pub icc_white_point: Toggle,
    /// ICC display profile.
    pub icc_displays: Toggle,
    /// ICC profile description.
    pub icc_description: Toggle,
    /// ICC profile copyright.
    pub icc_copyright: Toggle,
    /// Directory receiving the LUT. Not checked for existence.
    pub output_dir: String,
    /// Replacement for the derived filename stem.
    pub override_filename: Toggle,
}

impl Default for BakeOptions {
    fn default() -> Self {
        Self {
            bake_tool: DEFAULT_BAKE_TOOL.to_string(),
            config_path: String::new(),
            sequence: String::new(),
            shot: String::new(),
            input_space: String::new(),
            shaper_space: Toggle::default(),
            output_space: Toggle::default(),
            looks: Toggle::default(),
            cube_size: Toggle::default(),
            shaper_size: Toggle::default(),
            format: LutFormat::default(),
            icc_white_point: Toggle::default(),
            icc_displays: Toggle::default(),
            icc_description: Toggle::default(),
            icc_copyright: Toggle::default(),
            output_dir: String::new(),
            override_filename: Toggle::default(),
        }
    }
}

impl BakeOptions {
    /// Sequence tag, if set.
    pub fn sequence(&self) -> Option<&str> {
        non_empty(&self.sequence)
    }

    /// Shot tag, if set.
    pub fn shot(&self) -> Option<&str> {
        non_empty(&self.shot)
    }

    /// Context variables the bake tool resolves the config with.
    ///
    /// Empty tags are left out, so the child inherits whatever the
    /// environment already holds for them.
    pub fn context_env(&self) -> Vec<(String, String)> {
        [(SEQ_ENV, self.sequence()), (SHOT_ENV, self.shot())]
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key.to_string(), v.to_string())))
            .collect()
    }

    /// True when either destination selector is enabled.
    pub fn has_destination(&self) -> bool {
        self.output_space.enabled || self.looks.enabled
    }

    /// Front-end enablement rule for the bake action.
    pub fn is_bakeable(&self) -> bool {
        self.has_destination() && !self.output_dir.is_empty()
    }

    /// Checks that the required fields hold text.
    ///
    /// Derivation does not depend on this; callers use it to refuse a bake
    /// up front instead of letting the bake tool complain.
    pub fn validate(&self) -> PrescriptionResult<()> {
        let required = [
            ("bake_tool", &self.bake_tool),
            ("config_path", &self.config_path),
            ("input_space", &self.input_space),
            ("output_dir", &self.output_dir),
        ];
        match required.iter().find(|(_, v)| v.is_empty()) {
            Some((field, _)) => Err(PrescriptionError::MissingField { field: *field }),
            None => Ok(()),
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

//! Form state and persistence.
//!
//! Stores UI state that persists between sessions via eframe storage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use olp_core::{sizes, BakeOptions, LutFormat, PrescriptionResult, Toggle, DEFAULT_SIZE};
use olp_ocio::ConfigSummary;

/// Storage key of the preferences inside eframe's `app.ron`.
pub const PREFERENCES_KEY: &str = "olp_preferences";

/// Inclusive range accepted by the ICC white point field.
pub const WHITE_POINT_RANGE: std::ops::RangeInclusive<u32> = 1..=10000;

/// Preference keys, grouped by form section.
#[allow(missing_docs)]
pub mod keys {
    pub const CONFIG_PATH: &str = "ocio/config_path";
    pub const INPUT_SPACE: &str = "colorspaces/input";
    pub const SHAPER_SPACE: &str = "colorspaces/shaper";
    pub const OUTPUT_SPACE: &str = "colorspaces/output";
    pub const LOOKS: &str = "colorspaces/looks";
    pub const OUTPUT_DIR: &str = "output/directory";
    pub const LUT_FORMAT: &str = "baking/lut_format";
    pub const CUBE_SIZE: &str = "baking/cube_size";
    pub const SHAPER_SIZE: &str = "baking/shaper_size";
    pub const ICC_WHITE_POINT: &str = "icc/white_point";
    pub const ICC_DISPLAYS: &str = "icc/displays";
    pub const ICC_DESCRIPTION: &str = "icc/description";
    pub const ICC_COPYRIGHT: &str = "icc/copyright";
    pub const STYLE: &str = "misc/style";
}

/// Window style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Style {
    /// Follow the desktop.
    #[default]
    System,
    /// Always dark.
    Dark,
}

impl Style {
    /// Stored name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Dark => "dark",
        }
    }

    /// Parses a stored name, falling back to [`Style::System`].
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("dark") {
            Self::Dark
        } else {
            Self::System
        }
    }

    /// egui theme preference.
    pub fn theme(self) -> egui::ThemePreference {
        match self {
            Self::System => egui::ThemePreference::System,
            Self::Dark => egui::ThemePreference::Dark,
        }
    }
}

/// Which selector names the bake destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Output colour space.
    OutputSpace,
    /// Look.
    Looks,
}

/// Persisted key/value preferences (saved between sessions).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preferences(BTreeMap<String, String>);

impl Preferences {
    /// Value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Stores `value`, dropping the key when it is empty.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.0.remove(key);
        } else {
            self.0.insert(key.to_string(), value);
        }
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Runtime form state.
#[derive(Debug, Clone)]
pub struct PrescriptionState {
    // OCIO
    /// Config path as typed or picked.
    pub config_path: String,
    /// Sequence tag.
    pub sequence: String,
    /// Shot tag.
    pub shot: String,

    // Lists from the loaded config
    /// Colour spaces.
    pub colorspaces: Vec<String>,
    /// Looks.
    pub looks: Vec<String>,
    /// Displays.
    pub displays: Vec<String>,

    // Colour spaces
    /// Input colour space.
    pub input_space: String,
    /// Shaper checkbox + combo.
    pub shaper_space: Toggle,
    /// Selected destination radio.
    pub destination: Option<Destination>,
    /// Output colour space combo.
    pub output_space: String,
    /// Look combo.
    pub look: String,

    // Baking
    /// Format combo label, e.g. `cinespace (.csp)`.
    pub format_label: String,
    /// Cube size checkbox + combo.
    pub cube_size: Toggle,
    /// Shaper size checkbox + combo.
    pub shaper_size: Toggle,

    // ICC, only passed on for the icc format
    /// White point checkbox + field.
    pub icc_white_point: Toggle,
    /// Display profile checkbox + combo.
    pub icc_displays: Toggle,
    /// Description checkbox + field.
    pub icc_description: Toggle,
    /// Copyright checkbox + field.
    pub icc_copyright: Toggle,

    // Output
    /// Output directory.
    pub output_dir: String,
    /// Override name checkbox + field.
    pub override_filename: Toggle,

    // Result
    /// Result line.
    pub result: String,
    /// Log text.
    pub log: String,
    /// A bake request is in flight.
    pub baking: bool,

    /// Window style.
    pub style: Style,
}

impl Default for PrescriptionState {
    fn default() -> Self {
        Self {
            config_path: String::new(),
            sequence: String::new(),
            shot: String::new(),
            colorspaces: Vec::new(),
            looks: Vec::new(),
            displays: Vec::new(),
            input_space: String::new(),
            shaper_space: Toggle::default(),
            destination: None,
            output_space: String::new(),
            look: String::new(),
            format_label: LutFormat::default().label(),
            cube_size: Toggle::off(DEFAULT_SIZE),
            shaper_size: Toggle::off(DEFAULT_SIZE),
            icc_white_point: Toggle::default(),
            icc_displays: Toggle::default(),
            icc_description: Toggle::default(),
            icc_copyright: Toggle::default(),
            output_dir: String::new(),
            override_filename: Toggle::default(),
            result: String::new(),
            log: String::new(),
            baking: false,
            style: Style::System,
        }
    }
}

impl PrescriptionState {
    /// Creates state from persistence.
    pub fn from_preferences(prefs: &Preferences) -> Self {
        let mut state = Self::default();
        state.apply_preferences(prefs);
        state
    }

    /// Restores the fields that do not depend on a loaded config.
    ///
    /// Combo selections are kept as plain text until [`Self::on_config_loaded`]
    /// checks them against the config's lists.
    pub fn apply_preferences(&mut self, prefs: &Preferences) {
        let text = |key: &str| prefs.get(key).map(String::from);

        if let Some(v) = text(keys::CONFIG_PATH) {
            self.config_path = v;
        }
        if let Some(v) = text(keys::OUTPUT_DIR) {
            self.output_dir = v;
        }
        if let Some(v) = text(keys::INPUT_SPACE) {
            self.input_space = v;
        }
        if let Some(v) = text(keys::SHAPER_SPACE) {
            self.shaper_space.value = v;
        }
        if let Some(v) = text(keys::OUTPUT_SPACE) {
            self.output_space = v;
        }
        if let Some(v) = text(keys::LOOKS) {
            self.look = v;
        }
        if let Some(v) = text(keys::ICC_DISPLAYS) {
            self.icc_displays.value = v;
        }
        if let Some(v) = prefs
            .get(keys::LUT_FORMAT)
            .filter(|label| LutFormat::from_label(label).is_ok())
        {
            self.format_label = v.to_string();
        }

        let catalogue = sizes();
        for (key, toggle) in [
            (keys::CUBE_SIZE, &mut self.cube_size),
            (keys::SHAPER_SIZE, &mut self.shaper_size),
        ] {
            if let Some(v) = prefs
                .get(key)
                .filter(|v| catalogue.iter().any(|s| s.as_str() == *v))
            {
                toggle.value = v.to_string();
            }
        }

        if let Some(v) = prefs
            .get(keys::ICC_WHITE_POINT)
            .filter(|v| accepts_white_point(v))
        {
            self.icc_white_point.value = v.to_string();
        }
        if let Some(v) = text(keys::ICC_DESCRIPTION) {
            self.icc_description.value = v;
        }
        if let Some(v) = text(keys::ICC_COPYRIGHT) {
            self.icc_copyright.value = v;
        }
        if let Some(v) = prefs.get(keys::STYLE) {
            self.style = Style::from_name(v);
        }
    }

    /// Converts to persistence for saving.
    ///
    /// Values equal to the defaults are left out, so a cleared form saves
    /// an empty store.
    pub fn to_preferences(&self) -> Preferences {
        let mut prefs = self.all_preferences();
        let defaults = Self::default().all_preferences();
        prefs.0.retain(|k, v| defaults.get(k) != Some(v.as_str()));
        prefs
    }

    fn all_preferences(&self) -> Preferences {
        let mut prefs = Preferences::default();
        prefs.set(keys::CONFIG_PATH, self.config_path.as_str());
        prefs.set(keys::INPUT_SPACE, self.input_space.as_str());
        prefs.set(keys::SHAPER_SPACE, self.shaper_space.value.as_str());
        prefs.set(keys::OUTPUT_SPACE, self.output_space.as_str());
        prefs.set(keys::LOOKS, self.look.as_str());
        prefs.set(keys::OUTPUT_DIR, self.output_dir.as_str());
        prefs.set(keys::LUT_FORMAT, self.format_label.as_str());
        prefs.set(keys::CUBE_SIZE, self.cube_size.value.as_str());
        prefs.set(keys::SHAPER_SIZE, self.shaper_size.value.as_str());
        prefs.set(keys::ICC_WHITE_POINT, self.icc_white_point.value.as_str());
        prefs.set(keys::ICC_DISPLAYS, self.icc_displays.value.as_str());
        prefs.set(keys::ICC_DESCRIPTION, self.icc_description.value.as_str());
        prefs.set(keys::ICC_COPYRIGHT, self.icc_copyright.value.as_str());
        prefs.set(keys::STYLE, self.style.as_str());
        prefs
    }

    /// Fills the combos from a freshly loaded config.
    ///
    /// A current selection survives when the new list holds it (compared
    /// case-insensitively, the list's spelling wins), otherwise the first
    /// entry is taken. The output radio is selected.
    pub fn on_config_loaded(&mut self, config: ConfigSummary) {
        self.colorspaces = config.colorspaces;
        self.looks = config.looks;
        self.displays = config.displays;

        select_from(&mut self.input_space, &self.colorspaces);
        select_from(&mut self.shaper_space.value, &self.colorspaces);
        select_from(&mut self.output_space, &self.colorspaces);
        select_from(&mut self.look, &self.looks);
        select_from(&mut self.icc_displays.value, &self.displays);

        self.destination = Some(Destination::OutputSpace);
    }

    /// Format selected in the format combo.
    pub fn format(&self) -> PrescriptionResult<LutFormat> {
        LutFormat::from_label(&self.format_label)
    }

    /// True when the ICC fields apply.
    pub fn is_icc(&self) -> bool {
        self.format().is_ok_and(|f| f.is_icc())
    }

    /// Bake button enablement.
    pub fn can_bake(&self) -> bool {
        self.destination.is_some() && !self.output_dir.is_empty() && !self.baking
    }

    /// Builds the options record handed to the worker.
    pub fn to_options(&self, bake_tool: &str) -> PrescriptionResult<BakeOptions> {
        Ok(BakeOptions {
            bake_tool: bake_tool.to_string(),
            config_path: self.config_path.clone(),
            sequence: self.sequence.clone(),
            shot: self.shot.clone(),
            input_space: self.input_space.clone(),
            shaper_space: self.shaper_space.clone(),
            output_space: Toggle {
                enabled: self.destination == Some(Destination::OutputSpace),
                value: self.output_space.clone(),
            },
            looks: Toggle {
                enabled: self.destination == Some(Destination::Looks),
                value: self.look.clone(),
            },
            cube_size: self.cube_size.clone(),
            shaper_size: self.shaper_size.clone(),
            format: self.format()?,
            icc_white_point: self.icc_white_point.clone(),
            icc_displays: self.icc_displays.clone(),
            icc_description: self.icc_description.clone(),
            icc_copyright: self.icc_copyright.clone(),
            output_dir: self.output_dir.clone(),
            override_filename: self.override_filename.clone(),
        })
    }

    /// Resets every widget and switches back to the system style.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// White point field validator: empty while typing, otherwise digits in range.
pub fn accepts_white_point(text: &str) -> bool {
    text.is_empty()
        || (text.bytes().all(|b| b.is_ascii_digit())
            && text.parse::<u32>().is_ok_and(|v| WHITE_POINT_RANGE.contains(&v)))
}

fn select_from(current: &mut String, items: &[String]) {
    if let Some(found) = items.iter().find(|i| i.eq_ignore_ascii_case(current)) {
        *current = found.clone();
    } else if let Some(first) = items.first() {
        *current = first.clone();
    } else {
        current.clear();
    }
}

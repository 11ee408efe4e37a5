//! OCIO config summaries.
//!
//! Only the names a LUT bake front-end needs are extracted: colour
//! spaces, looks and displays. Transforms are never interpreted.
//!
//! # Example
//!
//! ```ignore
//! use olp_ocio::ConfigSummary;
//!
//! let config = ConfigSummary::from_file("aces_1.2/config.ocio")?;
//! for cs in &config.colorspaces {
//!     println!("{cs}");
//! }
//! ```

use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::error::{OcioError, OcioResult};

/// Config format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigVersion {
    /// OCIO v1.x.
    #[default]
    V1,
    /// OCIO v2.x.
    V2,
}

/// Ordered name lists read from one config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSummary {
    /// File the summary was read from, if any.
    pub path: Option<PathBuf>,
    /// Config `name` field.
    pub name: String,
    /// Profile version.
    pub version: ConfigVersion,
    /// Active colour spaces, scene then display referred.
    pub colorspaces: Vec<String>,
    /// Look names.
    pub looks: Vec<String>,
    /// Display names, honouring `active_displays`.
    pub displays: Vec<String>,
}

impl ConfigSummary {
    /// Reads a config file.
    pub fn from_file(path: impl AsRef<Path>) -> OcioResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(OcioError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        debug!(path = %path.display(), "reading OCIO config");
        let content = std::fs::read_to_string(path)?;
        let mut summary = Self::from_yaml_str(&content)?;
        summary.path = Some(path.to_path_buf());
        Ok(summary)
    }

    /// Parses config YAML.
    pub fn from_yaml_str(yaml: &str) -> OcioResult<Self> {
        let root: Value = serde_yaml::from_str(yaml)?;
        let root = untag(&root).as_mapping().ok_or_else(|| OcioError::Malformed {
            reason: "top level is not a mapping".into(),
        })?;

        let version = parse_version(root)?;
        let inactive = names_list(root.get("inactive_colorspaces"));

        let mut colorspaces = named_entries(root.get("colorspaces"), "colorspaces")?;
        if version == ConfigVersion::V2 {
            colorspaces.extend(named_entries(
                root.get("display_colorspaces"),
                "display_colorspaces",
            )?);
        }
        colorspaces.retain(|cs| !inactive.contains(cs));

        let summary = Self {
            path: None,
            name: root
                .get("name")
                .map(untag)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            version,
            colorspaces,
            looks: named_entries(root.get("looks"), "looks")?,
            displays: parse_displays(root)?,
        };
        debug!(
            colorspaces = summary.colorspaces.len(),
            looks = summary.looks.len(),
            displays = summary.displays.len(),
            "OCIO config parsed"
        );
        Ok(summary)
    }
}

// `!<ColorSpace>` style tags wrap the real value.
fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

fn parse_version(root: &Mapping) -> OcioResult<ConfigVersion> {
    let version = match root.get("ocio_profile_version").map(untag) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };

    // Major component only: "2.1" is v2, "20" is not.
    match version.split('.').next() {
        Some("1") => Ok(ConfigVersion::V1),
        Some("2") => Ok(ConfigVersion::V2),
        _ => Err(OcioError::UnsupportedVersion { version }),
    }
}

/// `name` fields of a sequence of mappings.
fn named_entries(value: Option<&Value>, section: &str) -> OcioResult<Vec<String>> {
    let Some(value) = value.map(untag) else {
        return Ok(Vec::new());
    };
    if value.is_null() {
        return Ok(Vec::new());
    }
    let entries = value.as_sequence().ok_or_else(|| OcioError::Malformed {
        reason: format!("'{section}' is not a list"),
    })?;

    entries
        .iter()
        .map(|entry| {
            untag(entry)
                .get("name")
                .map(untag)
                .and_then(scalar_string)
                .ok_or_else(|| OcioError::Malformed {
                    reason: format!("entry in '{section}' has no name"),
                })
        })
        .collect()
}

fn parse_displays(root: &Mapping) -> OcioResult<Vec<String>> {
    let displays: Vec<String> = match root.get("displays").map(untag) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Mapping(map)) => map.keys().filter_map(|k| scalar_string(untag(k))).collect(),
        Some(_) => {
            return Err(OcioError::Malformed {
                reason: "'displays' is not a mapping".into(),
            });
        }
    };

    let active = names_list(root.get("active_displays"));
    if active.is_empty() {
        return Ok(displays);
    }
    Ok(active
        .into_iter()
        .filter(|name| displays.contains(name))
        .collect())
}

/// A list of names given either as a YAML sequence or a comma separated string.
fn names_list(value: Option<&Value>) -> Vec<String> {
    match value.map(untag) {
        Some(Value::Sequence(seq)) => seq.iter().filter_map(|v| scalar_string(untag(v))).collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const V1: &str = r#"
ocio_profile_version: 1

name: test-v1
roles:
  default: raw

displays:
  sRGB:
    - !<View> {name: Film, colorspace: srgb8}
    - !<View> {name: Raw, colorspace: raw}
  DCIP3:
    - !<View> {name: Film, colorspace: p3dci8}

active_displays: []

looks:
  - !<Look>
    name: di
    process_space: lg10

colorspaces:
  - !<ColorSpace>
    name: linear
    family: ln
    isdata: false
  - !<ColorSpace>
    name: srgb8
    family: vd
  - !<ColorSpace>
    name: raw
    isdata: true
"#;

    #[test]
    fn reads_v1_names_in_order() {
        let cfg = ConfigSummary::from_yaml_str(V1).unwrap();
        assert_eq!(cfg.name, "test-v1");
        assert_eq!(cfg.version, ConfigVersion::V1);
        assert_eq!(cfg.colorspaces, ["linear", "srgb8", "raw"]);
        assert_eq!(cfg.looks, ["di"]);
        assert_eq!(cfg.displays, ["sRGB", "DCIP3"]);
        assert!(cfg.path.is_none());
    }

    #[test]
    fn v2_includes_display_colorspaces_and_skips_inactive() {
        let yaml = r#"
ocio_profile_version: 2.1
active_displays: [P3, sRGB]
inactive_colorspaces: [scratch]
displays:
  sRGB:
    - !<View> {name: ACES, view_transform: ACES, display_colorspace: srgb_display}
  P3:
    - !<View> {name: ACES, view_transform: ACES, display_colorspace: p3_display}
  Rec709:
    - !<View> {name: ACES, view_transform: ACES, display_colorspace: rec709_display}
colorspaces:
  - !<ColorSpace> {name: ACEScg}
  - !<ColorSpace> {name: scratch}
display_colorspaces:
  - !<ColorSpace> {name: srgb_display}
"#;
        let cfg = ConfigSummary::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.version, ConfigVersion::V2);
        assert_eq!(cfg.colorspaces, ["ACEScg", "srgb_display"]);
        assert_eq!(cfg.displays, ["P3", "sRGB"]);
        assert!(cfg.looks.is_empty());
    }

    #[test]
    fn string_version_and_comma_lists() {
        let yaml = r#"
ocio_profile_version: "2"
active_displays: "sRGB"
displays:
  sRGB: []
  P3: []
colorspaces: []
"#;
        let cfg = ConfigSummary::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.displays, ["sRGB"]);
    }

    #[test]
    fn missing_version() {
        let err = ConfigSummary::from_yaml_str("colorspaces: []").unwrap_err();
        assert!(matches!(err, OcioError::UnsupportedVersion { .. }));

        let err = ConfigSummary::from_yaml_str("ocio_profile_version: 3").unwrap_err();
        assert!(matches!(err, OcioError::UnsupportedVersion { version } if version == "3"));
    }

    #[test]
    fn version_checks_major_component() {
        let parse = |text: &str| ConfigSummary::from_yaml_str(&format!("ocio_profile_version: {text}"));

        assert_eq!(parse("1").unwrap().version, ConfigVersion::V1);
        assert_eq!(parse("\"1.0\"").unwrap().version, ConfigVersion::V1);
        assert_eq!(parse("2.1").unwrap().version, ConfigVersion::V2);

        for text in ["10", "20", "1abc", "\"2x\""] {
            assert!(
                matches!(parse(text), Err(OcioError::UnsupportedVersion { .. })),
                "{text}"
            );
        }
    }

    #[test]
    fn malformed_sections() {
        let err =
            ConfigSummary::from_yaml_str("ocio_profile_version: 1\ncolorspaces: nope").unwrap_err();
        assert!(matches!(err, OcioError::Malformed { .. }));

        let err = ConfigSummary::from_yaml_str("ocio_profile_version: 1\nlooks:\n  - {process_space: x}")
            .unwrap_err();
        assert!(err.to_string().contains("looks"));

        let err = ConfigSummary::from_yaml_str("- just\n- a list").unwrap_err();
        assert!(matches!(err, OcioError::Malformed { .. }));
    }
}

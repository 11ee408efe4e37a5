//! Filename Deriver: options record to canonical LUT path.
//!
//! The stem ("radical") reads `<prefix>_to_<suffix>`:
//!
//! ```text
//! seq-A_shot-B_ACEScg_shaper-lin_to_sRGB_c33_s44_D6500_displayICC-P3
//! '------------ prefix ---------'    '---------- suffix ------------'
//! ```
//!
//! No filesystem legality check is made on the result.

use std::path::{Path, PathBuf};

use crate::options::BakeOptions;

/// Full output path: `output_dir/<radical>.<extension>`.
pub fn derive_filename(options: &BakeOptions) -> PathBuf {
    let name = format!("{}.{}", lut_radical(options), options.format.extension);
    Path::new(&options.output_dir).join(name)
}

/// Filename stem, honouring the override.
pub fn lut_radical(options: &BakeOptions) -> String {
    match options.override_filename.active() {
        Some(name) => name.to_string(),
        None => format!("{}_to_{}", input_prefix(options), output_suffix(options)),
    }
}

/// Context tags, input space and optional shaper space.
pub fn input_prefix(options: &BakeOptions) -> String {
    let mut prefix = String::new();
    if let Some(seq) = options.sequence() {
        prefix.push_str(&format!("seq-{seq}_"));
    }
    if let Some(shot) = options.shot() {
        prefix.push_str(&format!("shot-{shot}_"));
    }
    prefix.push_str(&underscored(&options.input_space));
    if let Some(shaper) = options.shaper_space.enabled_value() {
        prefix.push_str(&format!("_shaper-{}", underscored(shaper)));
    }
    prefix
}

/// Destination, sizes and ICC metadata, without trailing underscores.
pub fn output_suffix(options: &BakeOptions) -> String {
    // Falls back to looks even when neither destination is enabled.
    let destination = options
        .output_space
        .active()
        .unwrap_or(options.looks.value.as_str());
    let mut suffix = format!("{}_", underscored(destination));

    if let Some(size) = options.cube_size.enabled_value() {
        suffix.push_str(&format!("c{size}_"));
    }
    if let Some(size) = options.shaper_size.enabled_value() {
        suffix.push_str(&format!("s{size}_"));
    }
    if options.format.is_icc() {
        if let Some(white_point) = options.icc_white_point.active() {
            suffix.push_str(&format!("D{white_point}_"));
        }
        if let Some(display) = options.icc_displays.active() {
            suffix.push_str(&format!("displayICC-{}_", underscored(display)));
        }
    }

    suffix.trim_end_matches('_').to_string()
}

fn underscored(name: &str) -> String {
    name.replace(' ', "_")
}

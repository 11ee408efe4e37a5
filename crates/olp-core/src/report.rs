//! Report Formatter: human-readable summary of a bake.

use crate::options::{BakeOptions, Toggle};

/// Placeholder for anything disabled or empty.
pub const NOT_APPLICABLE: &str = "N/A";

const HEADER: &str = "--------- LUT prescription below -----------";
const FOOTER: &str = "--------------------------------------------";

/// Renders the prescription block for `options` and the executed `command`.
///
/// The LUT location is the last token of `command`.
pub fn format_report(options: &BakeOptions, command: &[String]) -> String {
    let location = command.last().map(String::as_str).unwrap_or_default();

    [
        HEADER.to_string(),
        format!("OCIO: {}", options.config_path),
        format!("SEQ: {}", options.sequence().unwrap_or(NOT_APPLICABLE)),
        format!("SHOT: {}", options.shot().unwrap_or(NOT_APPLICABLE)),
        format!("Input ColorSpace: {}", options.input_space),
        format!("Shaper ColorSpace: {}", selected(&options.shaper_space)),
        format!("Output ColorSpace: {}", selected(&options.output_space)),
        format!("Look: {}", selected(&options.looks)),
        String::new(),
        format!("LUT Location: {location}"),
        String::new(),
        format!("Executed command: {}", command.join(" ")),
        FOOTER.to_string(),
    ]
    .join("\n")
}

// Checkbox state decides, not the text.
fn selected(toggle: &Toggle) -> &str {
    toggle.enabled_value().unwrap_or(NOT_APPLICABLE)
}

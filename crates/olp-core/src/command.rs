//! Command Builder: options record to `ociobakelut` argument vector.
//!
//! The vector is meant for direct process spawning; nothing is quoted.

use std::path::Path;

use crate::options::{BakeOptions, Toggle};

/// `ociobakelut` flag names.
pub mod flags {
    /// OCIO config path.
    pub const CONFIG: &str = "--iconfig";
    /// Source colour space.
    pub const INPUT_SPACE: &str = "--inputspace";
    /// Shaper colour space.
    pub const SHAPER_SPACE: &str = "--shaperspace";
    /// Destination colour space.
    pub const OUTPUT_SPACE: &str = "--outputspace";
    /// Destination look.
    pub const LOOKS: &str = "--looks";
    /// Output format.
    pub const FORMAT: &str = "--format";
    /// 3D cube size.
    pub const CUBE_SIZE: &str = "--cubesize";
    /// 1D shaper size.
    pub const SHAPER_SIZE: &str = "--shapersize";
    /// ICC white point.
    pub const WHITE_POINT: &str = "--whitepoint";
    /// ICC display profile.
    pub const DISPLAY_ICC: &str = "--displayicc";
    /// ICC description.
    pub const DESCRIPTION: &str = "--description";
    /// ICC copyright.
    pub const COPYRIGHT: &str = "--copyright";
}

/// Builds the argument vector, program first and output path last.
pub fn build_command(options: &BakeOptions, filename: &Path) -> Vec<String> {
    let mut cmd = CommandLine::new(&options.bake_tool);

    cmd.pair(flags::CONFIG, &options.config_path);
    cmd.pair(flags::INPUT_SPACE, &options.input_space);
    cmd.toggle(flags::SHAPER_SPACE, &options.shaper_space);

    // Output space wins over looks, even when its value is empty.
    if options.output_space.enabled {
        cmd.toggle(flags::OUTPUT_SPACE, &options.output_space);
    } else {
        cmd.toggle(flags::LOOKS, &options.looks);
    }

    cmd.pair(flags::FORMAT, &options.format.name);
    cmd.toggle(flags::CUBE_SIZE, &options.cube_size);
    cmd.toggle(flags::SHAPER_SIZE, &options.shaper_size);

    if options.format.is_icc() {
        cmd.toggle(flags::WHITE_POINT, &options.icc_white_point);
        cmd.toggle(flags::DISPLAY_ICC, &options.icc_displays);
        cmd.toggle(flags::DESCRIPTION, &options.icc_description);
        cmd.toggle(flags::COPYRIGHT, &options.icc_copyright);
    }

    cmd.arg(filename.to_string_lossy());
    cmd.args
}

struct CommandLine {
    args: Vec<String>,
}

impl CommandLine {
    fn new(program: &str) -> Self {
        Self {
            args: vec![program.to_string()],
        }
    }

    fn arg(&mut self, arg: impl Into<String>) {
        self.args.push(arg.into());
    }

    fn pair(&mut self, flag: &str, value: &str) {
        self.arg(flag);
        self.arg(value);
    }

    fn toggle(&mut self, flag: &str, toggle: &Toggle) {
        if let Some(value) = toggle.active() {
            self.pair(flag, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filename::derive_filename;
    use crate::format::LutFormat;

    fn base() -> BakeOptions {
        BakeOptions {
            config_path: "/path/to/test/config.ocio".into(),
            input_space: "test_input_space".into(),
            output_space: Toggle::on("test_output_space"),
            output_dir: "/var/tmp".into(),
            ..Default::default()
        }
    }

    fn command(opts: &BakeOptions) -> Vec<String> {
        build_command(opts, &derive_filename(opts))
    }

    #[test]
    fn default_scenario() {
        assert_eq!(
            command(&base()),
            [
                "ociobakelut",
                "--iconfig",
                "/path/to/test/config.ocio",
                "--inputspace",
                "test_input_space",
                "--outputspace",
                "test_output_space",
                "--format",
                "cinespace",
                "/var/tmp/test_input_space_to_test_output_space.csp",
            ]
        );
    }

    #[test]
    fn shaper_space_only_when_enabled() {
        let mut opts = BakeOptions {
            shaper_space: Toggle::off("lin"),
            ..base()
        };
        assert!(!command(&opts).iter().any(|a| a == flags::SHAPER_SPACE));

        opts.shaper_space.enabled = true;
        let cmd = command(&opts);
        let pos = cmd.iter().position(|a| a == flags::SHAPER_SPACE).unwrap();
        assert_eq!(cmd[pos + 1], "lin");
        assert_eq!(cmd[pos - 1], "test_input_space");
    }

    #[test]
    fn output_space_excludes_looks() {
        let opts = BakeOptions {
            looks: Toggle::on("film"),
            ..base()
        };
        let cmd = command(&opts);
        assert!(cmd.iter().any(|a| a == flags::OUTPUT_SPACE));
        assert!(!cmd.iter().any(|a| a == flags::LOOKS));
    }

    #[test]
    fn empty_output_space_does_not_fall_back_to_looks() {
        let opts = BakeOptions {
            output_space: Toggle::on(""),
            looks: Toggle::on("film"),
            ..base()
        };
        let cmd = command(&opts);
        assert!(!cmd.iter().any(|a| a == flags::OUTPUT_SPACE || a == flags::LOOKS));
    }

    #[test]
    fn no_destination_emits_neither_flag() {
        let opts = BakeOptions {
            output_space: Toggle::off("out"),
            looks: Toggle::off("film"),
            ..base()
        };
        let cmd = command(&opts);
        assert!(!cmd.iter().any(|a| a == flags::OUTPUT_SPACE || a == flags::LOOKS));
        assert_eq!(cmd[5], flags::FORMAT);
    }

    #[test]
    fn enabled_but_empty_sizes_are_omitted() {
        let opts = BakeOptions {
            cube_size: Toggle::on(""),
            shaper_size: Toggle::on("44"),
            ..base()
        };
        let cmd = command(&opts);
        assert!(!cmd.iter().any(|a| a == flags::CUBE_SIZE));
        let pos = cmd.iter().position(|a| a == flags::SHAPER_SIZE).unwrap();
        assert_eq!(cmd[pos + 1], "44");
    }

    #[test]
    fn icc_block_order() {
        let opts = BakeOptions {
            format: LutFormat::new("icc", "icc"),
            icc_white_point: Toggle::on("6700"),
            icc_displays: Toggle::on("test_icc_display"),
            icc_description: Toggle::on("test icc profile"),
            icc_copyright: Toggle::on("djieffx"),
            cube_size: Toggle::on("33"),
            ..base()
        };
        let cmd = command(&opts);
        let tail: Vec<&str> = cmd[9..cmd.len() - 1].iter().map(String::as_str).collect();
        assert_eq!(
            tail,
            [
                "--cubesize",
                "33",
                "--whitepoint",
                "6700",
                "--displayicc",
                "test_icc_display",
                "--description",
                "test icc profile",
                "--copyright",
                "djieffx",
            ]
        );
    }

    #[test]
    fn icc_block_skipped_for_other_extensions() {
        let opts = BakeOptions {
            format: LutFormat::new("flame", "3dl"),
            icc_white_point: Toggle::on("6700"),
            icc_copyright: Toggle::on("me"),
            ..base()
        };
        let cmd = command(&opts);
        assert!(!cmd.iter().any(|a| a == flags::WHITE_POINT || a == flags::COPYRIGHT));
    }

    #[test]
    fn filename_is_last_and_unquoted() {
        let opts = BakeOptions {
            override_filename: Toggle::on("name with spaces"),
            ..base()
        };
        let cmd = command(&opts);
        assert_eq!(cmd.last().unwrap(), "/var/tmp/name with spaces.csp");
    }

    #[test]
    fn custom_tool_leads() {
        let opts = BakeOptions {
            bake_tool: "/opt/ocio/bin/ociobakelut".into(),
            ..base()
        };
        assert_eq!(command(&opts)[0], "/opt/ocio/bin/ociobakelut");
    }

    #[test]
    fn idempotent() {
        let opts = BakeOptions {
            shaper_space: Toggle::on("lin"),
            cube_size: Toggle::on("17"),
            ..base()
        };
        let filename = derive_filename(&opts);
        assert_eq!(build_command(&opts, &filename), build_command(&opts, &filename));
    }
}

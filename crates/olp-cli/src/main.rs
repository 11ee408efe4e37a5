//! olp - OCIO LUT prescription
//!
//! Derives the output name, `ociobakelut` command line and report for a
//! LUT bake, then runs it.

use anyhow::Result;
use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{prelude::*, EnvFilter};

use olp_core::{
    BakeOptions, LutFormat, Toggle, DEFAULT_BAKE_TOOL, MAX_SIZE, MIN_SIZE, SEQ_ENV, SHOT_ENV,
};
use olp_ocio::OCIO_ENV;

mod commands;

#[derive(Parser)]
#[command(name = "olp")]
#[command(author, version, about = "Prescribe and bake OCIO LUTs with ociobakelut")]
#[command(long_about = "
Builds a deterministic LUT filename and the matching ociobakelut command
from a set of bake options, runs it, and prints a prescription report.

Examples:
  olp                                            # Open the desktop front-end
  olp formats                                    # List LUT formats
  olp config /show/config.ocio                   # List colour spaces, looks, displays
  olp prescribe --ocio cfg.ocio -i ACEScg --output-space sRGB -o /tmp
  olp bake --ocio cfg.ocio -i ACEScg --look 'Blue Fix' -o /tmp --format flame
  olp bake -i ACEScg --output-space 'sRGB - Display' -o /tmp --format icc --icc-white-point 6500
")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a bake and print the LUT path
    #[command(visible_alias = "b")]
    Bake(BakeArgs),

    /// Print the report (or JSON) without running anything
    #[command(visible_alias = "p")]
    Prescribe(PrescribeArgs),

    /// List the names an OCIO config offers
    Config(ConfigArgs),

    /// List the LUT formats
    Formats,

    /// Print the front-end's saved preferences
    #[cfg(feature = "gui")]
    Prefs,

    /// Open the desktop front-end
    #[cfg(feature = "gui")]
    Gui(GuiArgs),
}

/// Options shared by `bake` and `prescribe`.
#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("destination").required(true).args(["output_space", "look"])))]
struct BakeFlags {
    /// OCIO config file
    #[arg(long, env = OCIO_ENV)]
    ocio: PathBuf,

    /// Sequence tag
    #[arg(long, env = SEQ_ENV)]
    seq: Option<String>,

    /// Shot tag
    #[arg(long, env = SHOT_ENV)]
    shot: Option<String>,

    /// Input colour space
    #[arg(short = 'i', long = "input-space")]
    input_space: String,

    /// Shaper colour space
    #[arg(long)]
    shaper: Option<String>,

    /// Output colour space
    #[arg(long = "output-space")]
    output_space: Option<String>,

    /// Look to bake instead of an output colour space
    #[arg(long)]
    look: Option<String>,

    /// LUT format, by name (flame) or label ("flame (.3dl)")
    #[arg(short, long, default_value = "cinespace", value_parser = parse_format)]
    format: LutFormat,

    /// Cube size
    #[arg(long, value_parser = clap::value_parser!(u32).range(MIN_SIZE as i64..=MAX_SIZE as i64))]
    cube_size: Option<u32>,

    /// Shaper size
    #[arg(long, value_parser = clap::value_parser!(u32).range(MIN_SIZE as i64..=MAX_SIZE as i64))]
    shaper_size: Option<u32>,

    /// ICC white point in kelvin (icc format only)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=10000))]
    icc_white_point: Option<u32>,

    /// ICC display profile (icc format only)
    #[arg(long)]
    icc_display: Option<String>,

    /// ICC description (icc format only)
    #[arg(long)]
    icc_description: Option<String>,

    /// ICC copyright (icc format only)
    #[arg(long)]
    icc_copyright: Option<String>,

    /// Output directory
    #[arg(short = 'o', long = "out-dir")]
    out_dir: PathBuf,

    /// Use this filename stem instead of the derived one
    #[arg(short = 'n', long = "name")]
    name: Option<String>,

    /// Bake tool executable
    #[arg(long, default_value = DEFAULT_BAKE_TOOL)]
    bake_tool: String,
}

impl BakeFlags {
    /// Options record for the prescription functions.
    fn to_options(&self) -> BakeOptions {
        BakeOptions {
            bake_tool: self.bake_tool.clone(),
            config_path: self.ocio.display().to_string(),
            sequence: self.seq.clone().unwrap_or_default(),
            shot: self.shot.clone().unwrap_or_default(),
            input_space: self.input_space.clone(),
            shaper_space: toggle(self.shaper.as_ref()),
            output_space: toggle(self.output_space.as_ref()),
            looks: toggle(self.look.as_ref()),
            cube_size: toggle(self.cube_size.as_ref()),
            shaper_size: toggle(self.shaper_size.as_ref()),
            format: self.format.clone(),
            icc_white_point: toggle(self.icc_white_point.as_ref()),
            icc_displays: toggle(self.icc_display.as_ref()),
            icc_description: toggle(self.icc_description.as_ref()),
            icc_copyright: toggle(self.icc_copyright.as_ref()),
            output_dir: self.out_dir.display().to_string(),
            override_filename: toggle(self.name.as_ref()),
        }
    }
}

fn toggle(value: Option<&impl ToString>) -> Toggle {
    value.map(|v| Toggle::on(v.to_string())).unwrap_or_default()
}

fn parse_format(s: &str) -> Result<LutFormat, String> {
    LutFormat::from_name(s)
        .or_else(|_| LutFormat::from_label(s))
        .map_err(|e| e.to_string())
}

#[derive(Args)]
struct BakeArgs {
    #[command(flatten)]
    flags: BakeFlags,
}

#[derive(Args)]
struct PrescribeArgs {
    #[command(flatten)]
    flags: BakeFlags,

    /// Print filename, command and report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ConfigArgs {
    /// OCIO config file
    #[arg(env = OCIO_ENV)]
    path: PathBuf,
}

#[cfg(feature = "gui")]
#[derive(Args)]
struct GuiArgs {
    /// OCIO config file to load at start-up
    #[arg(long, env = OCIO_ENV)]
    ocio: Option<PathBuf>,

    /// Sequence tag
    #[arg(long, env = SEQ_ENV)]
    seq: Option<String>,

    /// Shot tag
    #[arg(long, env = SHOT_ENV)]
    shot: Option<String>,

    /// Bake tool executable
    #[arg(long)]
    bake_tool: Option<String>,
}

#[cfg(feature = "gui")]
impl GuiArgs {
    /// Arguments of a bare `olp` run: only the environment applies.
    fn from_env() -> Result<Self> {
        use clap::FromArgMatches;
        let matches = Self::augment_args(clap::Command::new("gui")).try_get_matches_from(["gui"])?;
        Ok(Self::from_arg_matches(&matches)?)
    }
}

/// Installs the stderr subscriber; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let stderr_log = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(stderr_log)
        .with(env_filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Bake(args)) => commands::bake::run(args, cli.verbose),
        Some(Commands::Prescribe(args)) => commands::prescribe::run(args),
        Some(Commands::Config(args)) => commands::config::run(args),
        Some(Commands::Formats) => commands::formats::run(),
        #[cfg(feature = "gui")]
        Some(Commands::Prefs) => commands::prefs::run(),
        #[cfg(feature = "gui")]
        Some(Commands::Gui(args)) => commands::gui::run(args),
        #[cfg(feature = "gui")]
        None => commands::gui::run(GuiArgs::from_env()?),
        #[cfg(not(feature = "gui"))]
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    fn flags(cli: Cli) -> BakeFlags {
        match cli.command {
            Some(Commands::Bake(args)) => args.flags,
            Some(Commands::Prescribe(args)) => args.flags,
            _ => panic!("not a bake command"),
        }
    }

    #[test]
    fn bake_flags_to_options() {
        let cli = parse(&[
            "olp", "bake", "--ocio", "/show/config.ocio", "-i", "ACEScg", "--shaper", "lin",
            "--output-space", "sRGB", "-o", "/tmp/luts", "--cube-size", "65", "--format", "flame",
        ]);
        let options = flags(cli).to_options();

        assert_eq!(options.config_path, "/show/config.ocio");
        assert_eq!(options.shaper_space, Toggle::on("lin"));
        assert_eq!(options.output_space, Toggle::on("sRGB"));
        assert!(!options.looks.enabled);
        assert_eq!(options.cube_size, Toggle::on("65"));
        assert!(!options.shaper_size.enabled);
        assert_eq!(options.format, LutFormat::new("flame", "3dl"));
        assert_eq!(options.bake_tool, "ociobakelut");
        assert!(options.validate().is_ok());
    }

    #[test]
    fn format_by_label() {
        let cli = parse(&[
            "olp", "prescribe", "--ocio", "c.ocio", "-i", "a", "--look", "b", "-o", "/tmp",
            "-f", "icc (.icc)", "--icc-white-point", "6500",
        ]);
        let options = flags(cli).to_options();
        assert!(options.format.is_icc());
        assert_eq!(options.icc_white_point, Toggle::on("6500"));
        assert_eq!(options.looks, Toggle::on("b"));
    }

    #[test]
    fn destination_is_required_and_exclusive() {
        let base = ["olp", "bake", "--ocio", "c.ocio", "-i", "a", "-o", "/tmp"];
        assert!(Cli::try_parse_from(base).is_err());

        let both = [&base[..], &["--output-space", "x", "--look", "y"]].concat();
        assert!(Cli::try_parse_from(both).is_err());
    }

    #[test]
    fn rejects_out_of_range_sizes() {
        let args = [
            "olp", "bake", "--ocio", "c.ocio", "-i", "a", "--look", "b", "-o", "/tmp",
            "--cube-size", "67",
        ];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn rejects_unknown_format() {
        let args = [
            "olp", "bake", "--ocio", "c.ocio", "-i", "a", "--look", "b", "-o", "/tmp", "-f", "exr",
        ];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn verbosity_counts() {
        let cli = parse(&["olp", "-vv", "formats"]);
        assert_eq!(cli.verbose, 2);
    }
}

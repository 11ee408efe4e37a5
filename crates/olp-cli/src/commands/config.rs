//! Config command - lists what an OCIO config offers.

use anyhow::{Context, Result};
use olp_ocio::{ColorConfigProvider, ConfigSummary, YamlConfigProvider};

use crate::ConfigArgs;

/// Prints colour spaces, looks and displays, one per line.
pub fn run(args: ConfigArgs) -> Result<()> {
    let config = YamlConfigProvider
        .load(&args.path)
        .with_context(|| format!("Failed to load: {}", args.path.display()))?;
    print_summary(&config);
    Ok(())
}

fn print_summary(config: &ConfigSummary) {
    if !config.name.is_empty() {
        println!("Name: {}", config.name);
    }
    println!("Version: {:?}", config.version);
    print_section("Colorspaces", &config.colorspaces);
    print_section("Looks", &config.looks);
    print_section("Displays", &config.displays);
}

fn print_section(title: &str, names: &[String]) {
    println!("{title} ({}):", names.len());
    for name in names {
        println!("  {name}");
    }
}

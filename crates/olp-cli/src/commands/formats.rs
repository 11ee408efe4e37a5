//! Formats command.

use anyhow::Result;
use olp_core::LutFormat;

/// Prints every format label, in menu order.
pub fn run() -> Result<()> {
    for format in LutFormat::all() {
        println!("{}", format.label());
    }
    Ok(())
}

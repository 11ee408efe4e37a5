//! Gui command - desktop front-end.

use anyhow::Result;
use olp_core::DEFAULT_BAKE_TOOL;

use crate::GuiArgs;

/// Opens the window and blocks until it closes.
pub fn run(args: GuiArgs) -> Result<()> {
    let config = olp_view::LaunchConfig {
        ocio: args.ocio,
        sequence: args.seq,
        shot: args.shot,
        bake_tool: args.bake_tool.unwrap_or_else(|| DEFAULT_BAKE_TOOL.to_string()),
    };

    let exit_code = olp_view::run(config);

    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

//! # olp-view
//!
//! Desktop front-end for baking OCIO LUTs with `ociobakelut`.
//!
//! Features:
//! - OCIO config loading (colour spaces, looks, displays)
//! - Shaper space, cube and shaper sizes
//! - ICC metadata for the `icc` format
//! - Deterministic output naming with optional override
//! - Bakes run on a worker thread, one at a time
//! - Persistent settings and style
//!
//! # Quick Start
//!
//! ```ignore
//! use olp_view::{run, LaunchConfig};
//!
//! let exit_code = run(LaunchConfig::default());
//! ```
//!
//! # Start-up values
//!
//! The config path, SEQ and SHOT resolve in this order:
//! 1. `LaunchConfig` (CLI flags or `$OCIO` / `$SEQ` / `$SHOT`)
//! 2. Persisted preferences
//! 3. Empty

#![warn(missing_docs)]
#![warn(clippy::all)]

mod app;
mod handler;
mod messages;
mod state;

pub use app::{LaunchConfig, PrescriptionApp};
pub use state::{keys, Destination, Preferences, PrescriptionState, Style, PREFERENCES_KEY};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

/// Window title.
pub const APP_TITLE: &str = "OCIO LUT Prescription";

/// Run the desktop front-end.
///
/// Creates an eframe window and enters the event loop.
/// Returns exit code when window closes.
///
/// # Returns
/// Exit code: 0 for success, 1 for error
pub fn run(config: LaunchConfig) -> i32 {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([720.0, 860.0])
            .with_min_inner_size([560.0, 600.0]),
        persistence_path: persistence_path(),
        ..Default::default()
    };

    info!(ocio = ?config.ocio, "starting front-end");
    let result = eframe::run_native(
        APP_TITLE,
        native_options,
        Box::new(move |cc| Ok(Box::new(PrescriptionApp::new(cc, config)))),
    );

    match result {
        Ok(()) => {
            debug!("exited normally");
            0
        }
        Err(e) => {
            error!("front-end error: {e}");
            1
        }
    }
}

/// Get platform-specific persistence path.
pub fn persistence_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ocio-lut-prescription"))
}

/// Load persisted preferences from disk.
///
/// Returns `None` when nothing was saved yet or the store is unreadable.
pub fn load_preferences() -> Option<Preferences> {
    read_preferences(&persistence_path()?)
}

/// Reads preferences from an eframe store, given as the `app.ron` file or
/// its directory.
pub fn read_preferences(path: &Path) -> Option<Preferences> {
    let file = if path.is_dir() {
        path.join("app.ron")
    } else {
        path.to_path_buf()
    };
    let content = std::fs::read_to_string(&file).ok()?;

    // eframe keeps a map of RON-encoded values.
    let store: HashMap<String, String> = ron::from_str(&content).ok()?;
    ron::from_str(store.get(PREFERENCES_KEY)?).ok()
}

//! Prefs command - shows what the front-end saved.

use anyhow::Result;

/// Prints `key = value` lines from the front-end's store.
pub fn run() -> Result<()> {
    match olp_view::load_preferences() {
        Some(prefs) if !prefs.is_empty() => {
            for (key, value) in prefs.iter() {
                println!("{key} = {value}");
            }
        }
        _ => eprintln!("No saved preferences"),
    }
    Ok(())
}

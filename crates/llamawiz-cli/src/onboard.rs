//! `llamawiz onboard` — initialize configuration and data directories.
//!
//! - Creates `~/.llamawiz/config.json` with defaults
//! - Creates the REPL history directory

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use llamawiz_core::config::{get_config_path, save_config, Config};
use llamawiz_core::utils::get_history_path;

/// Run the onboard command.
pub fn run() -> Result<()> {
    println!();
    println!("{}", "🦙 Llama-Wizard — Setup".cyan().bold());
    println!();

    let config_path = get_config_path();

    // 1. Create config if it doesn't exist
    if write_default_config(&config_path)? {
        println!(
            "  {} created config at {}",
            "✓".green(),
            config_path.display()
        );
    } else {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            config_path.display()
        );
    }

    // 2. History directory for the REPL
    let history_dir = get_history_path();
    std::fs::create_dir_all(&history_dir)?;
    println!("  {} history dir at {}", "✓".green(), history_dir.display());

    println!();
    println!(
        "{}",
        "  Setup complete! Run `llamawiz serve` and open the page in a browser.".green()
    );
    println!();

    Ok(())
}

/// Write the default config to `path` unless a file is already there.
///
/// Returns `true` when a new file was written.
fn write_default_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save_config(&Config::default(), Some(path))?;
    Ok(true)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

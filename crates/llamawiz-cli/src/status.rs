//! `llamawiz status` — show configuration and inference endpoint settings.

use anyhow::Result;
use colored::Colorize;

use llamawiz_core::config::{get_config_path, load_config};

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    println!();
    println!("{}", "🦙 Llama-Wizard Status".cyan().bold());
    println!();

    // Config
    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_path.exists() {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );

    // Endpoint
    let inference = &config.inference;
    println!(
        "  {:<18} {}",
        "Endpoint:".bold(),
        inference.completions_url()
    );
    println!("  {:<18} {}", "Model:".bold(), inference.model);

    let timeout = if inference.timeout_secs == 0 {
        "none".to_string()
    } else {
        format!("{}s", inference.timeout_secs)
    };
    println!(
        "  {:<18} {} | max_tokens: {} | timeout: {}",
        "Parameters:".bold(),
        format!("temp: {}", inference.temperature).dimmed(),
        format!("{}", inference.max_tokens).dimmed(),
        timeout.dimmed(),
    );

    let key_status = if inference.has_api_key() {
        format!("{} (key set)", "✓".green())
    } else {
        format!("{}", "· not configured".dimmed())
    };
    println!("  {:<18} {}", "API key:".bold(), key_status);

    // Server
    println!();
    println!(
        "  {:<18} http://{}",
        "Listen:".bold(),
        config.server.bind_addr()
    );
    println!(
        "  {:<18} {} chars",
        "Title limit:".bold(),
        config.chat.title_max_chars
    );

    println!();

    Ok(())
}

//! Shared CLI helpers — response printing, banners, session listings.

use colored::Colorize;

use llamawiz_chat::SessionListEntry;
use llamawiz_core::types::Exchange;

/// Print an assistant reply to stdout.
pub fn print_response(response: &str) {
    println!();
    println!("{}", "🦙 Llama-Wizard".cyan().bold());
    if response.is_empty() {
        println!("{}", "(no response)".dimmed());
    } else {
        println!("{response}");
    }
    println!();
}

/// Print the banner shown at startup.
pub fn print_banner(mode: &str) {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!(
        "{}  v{}",
        "🦙 Llama-Wizard".cyan().bold(),
        version.dimmed()
    );
    println!("  Mode: {mode}");
    println!();
}

/// Print the REPL usage hint.
pub fn print_repl_help() {
    println!(
        "{}",
        "Type a message. Commands: /new, /list, /load <id or title>, exit".dimmed()
    );
    println!();
}

/// Print a session listing, marking the current one.
pub fn print_sessions(sessions: &[SessionListEntry]) {
    println!();
    if sessions.is_empty() {
        println!("  {}", "No conversations yet".dimmed());
    }
    for entry in sessions {
        let marker = if entry.is_current { "▶".green().to_string() } else { " ".to_string() };
        println!(
            "  {} {:<36} {}  {}",
            marker,
            entry.title,
            entry.label.dimmed(),
            entry.id.as_str().dimmed()
        );
    }
    println!();
}

/// Replay a loaded history.
pub fn print_history(history: &[Exchange]) {
    for exchange in history {
        println!("{} {}", "You:".bold(), exchange.user);
        print_response(&exchange.assistant);
    }
}

/// Print a "thinking" placeholder (for non-log mode).
pub fn print_thinking() {
    eprint!("{}", "⠿ thinking...".dimmed());
}

/// Clear the "thinking" placeholder.
pub fn clear_thinking() {
    eprint!("\r{}\r", " ".repeat(40));
}

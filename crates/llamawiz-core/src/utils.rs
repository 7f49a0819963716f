//! Utility helpers — path resolution, title truncation, relative timestamps.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// Get the Llama-Wizard data directory (e.g. `~/.llamawiz/`).
pub fn get_data_path() -> PathBuf {
    let home = home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".llamawiz")
}

/// Get the REPL history directory (e.g. `~/.llamawiz/history/`).
pub fn get_history_path() -> PathBuf {
    get_data_path().join("history")
}

/// Keep the first `max_chars` characters of `s`, appending `"..."` if anything
/// was cut. Unicode-safe.
pub fn truncate_with_ellipsis(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((byte_idx, _)) => format!("{}...", &s[..byte_idx]),
    }
}

/// Human-friendly age of `timestamp` relative to `now`.
///
/// `Just now`, `12m ago`, `3h ago`, `Yesterday`, `4d ago`, then `MM/DD`.
pub fn format_relative(now: DateTime<Utc>, timestamp: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(timestamp);
    let days = diff.num_days();

    match days {
        // Future timestamps (clock skew) read as "Just now".
        d if d <= 0 => {
            let minutes = diff.num_minutes();
            if minutes < 1 {
                "Just now".to_string()
            } else if minutes < 60 {
                format!("{minutes}m ago")
            } else {
                format!("{}h ago", diff.num_hours())
            }
        }
        1 => "Yesterday".to_string(),
        d if d < 7 => format!("{d}d ago"),
        _ => timestamp.format("%m/%d").to_string(),
    }
}

/// Helper to get home directory.
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("USERPROFILE").ok().map(PathBuf::from))
}

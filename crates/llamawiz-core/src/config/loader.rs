//! Config loader — reads `~/.llamawiz/config.json`, merges env vars, and
//! applies legacy migrations.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.llamawiz/config.json`
//! 3. Environment variables `LLAMAWIZ_<SECTION>__<FIELD>` (override JSON)

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::schema::Config;

const COMPLETIONS_SUFFIX: &str = "/chat/completions";

/// Why a config file could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from `path` (or the default path) plus env vars.
///
/// Never fails: a missing or unusable file means defaults.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map_or_else(get_config_path, Path::to_path_buf);
    load_config_from_path(&config_path)
}

fn load_config_from_path(path: &Path) -> Config {
    let config = if path.exists() {
        read_config_file(path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "ignoring config file");
            Config::default()
        })
    } else {
        info!(path = %path.display(), "no config file, using defaults");
        Config::default()
    };

    apply_env_overrides(config)
}

/// Parse one config file, migrating legacy keys first. Env vars are not applied.
pub fn read_config_file(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut raw: serde_json::Value = serde_json::from_str(&content)?;
    migrate_config(&mut raw);

    debug!(path = %path.display(), "config file parsed");
    Ok(serde_json::from_value(raw)?)
}

/// Write `config` as pretty JSON, creating the parent directory if needed.
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map_or_else(get_config_path, Path::to_path_buf);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&config_path, serde_json::to_string_pretty(config)?)?;

    debug!(path = %config_path.display(), "config saved");
    Ok(())
}

/// Apply legacy config migrations.
///
/// Moves `inference.url` (a full `.../chat/completions` URL) → `inference.apiBase`.
fn migrate_config(raw: &mut serde_json::Value) {
    let Some(inference) = raw.get_mut("inference").and_then(|v| v.as_object_mut()) else {
        return;
    };

    if let Some(url) = inference.remove("url") {
        if inference.contains_key("apiBase") {
            return;
        }
        if let Some(url) = url.as_str() {
            let base = url
                .trim_end_matches('/')
                .trim_end_matches(COMPLETIONS_SUFFIX)
                .to_string();
            inference.insert("apiBase".to_string(), serde_json::Value::String(base));
            debug!("Migrated inference.url → inference.apiBase");
        }
    }
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `LLAMAWIZ_<SECTION>__<FIELD>` (double underscore as delimiter).
///
/// Supported overrides:
/// - `LLAMAWIZ_INFERENCE__API_BASE` → `inference.api_base`
/// - `LLAMAWIZ_INFERENCE__API_KEY` → `inference.api_key`
/// - `LLAMAWIZ_INFERENCE__MODEL` → `inference.model`
/// - `LLAMAWIZ_INFERENCE__MAX_TOKENS` → `inference.max_tokens`
/// - `LLAMAWIZ_INFERENCE__TEMPERATURE` → `inference.temperature`
/// - `LLAMAWIZ_INFERENCE__TIMEOUT_SECS` → `inference.timeout_secs`
/// - `LLAMAWIZ_SERVER__HOST` → `server.host`
/// - `LLAMAWIZ_SERVER__PORT` → `server.port`
/// - `LLAMAWIZ_CHAT__TITLE_MAX_CHARS` → `chat.title_max_chars`
fn apply_env_overrides(mut config: Config) -> Config {
    // Inference
    if let Ok(val) = std::env::var("LLAMAWIZ_INFERENCE__API_BASE") {
        config.inference.api_base = val;
    }
    if let Ok(val) = std::env::var("LLAMAWIZ_INFERENCE__API_KEY") {
        config.inference.api_key = val;
    }
    if let Ok(val) = std::env::var("LLAMAWIZ_INFERENCE__MODEL") {
        config.inference.model = val;
    }
    if let Ok(val) = std::env::var("LLAMAWIZ_INFERENCE__MAX_TOKENS") {
        if let Ok(n) = val.parse::<u32>() {
            config.inference.max_tokens = n;
        }
    }
    if let Ok(val) = std::env::var("LLAMAWIZ_INFERENCE__TEMPERATURE") {
        if let Ok(t) = val.parse::<f64>() {
            config.inference.temperature = t;
        }
    }
    if let Ok(val) = std::env::var("LLAMAWIZ_INFERENCE__TIMEOUT_SECS") {
        if let Ok(n) = val.parse::<u64>() {
            config.inference.timeout_secs = n;
        }
    }

    // Server
    if let Ok(val) = std::env::var("LLAMAWIZ_SERVER__HOST") {
        config.server.host = val;
    }
    if let Ok(val) = std::env::var("LLAMAWIZ_SERVER__PORT") {
        if let Ok(p) = val.parse::<u16>() {
            config.server.port = p;
        }
    }

    // Chat
    if let Ok(val) = std::env::var("LLAMAWIZ_CHAT__TITLE_MAX_CHARS") {
        if let Ok(n) = val.parse::<usize>() {
            config.chat.title_max_chars = n;
        }
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

//! Configuration system — schema, loading, and env var overrides.
//!
//! # Usage
//! ```no_run
//! use llamawiz_core::config;
//!
//! let cfg = config::load_config(None);
//! println!("Endpoint: {}", cfg.inference.completions_url());
//! ```

pub mod loader;
pub mod schema;

// Re-export key types
pub use loader::{get_config_path, load_config, read_config_file, save_config, ConfigError};
pub use schema::{ChatConfig, Config, InferenceConfig, ServerConfig};

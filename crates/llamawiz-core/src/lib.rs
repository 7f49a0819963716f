//! Llama-Wizard core — shared types, the in-memory session store, and config.
//!
//! - **types**: conversation exchanges and the OpenAI-compatible wire format
//! - **session**: session ids, records, and the process-wide store
//! - **config**: JSON config with env var overrides
//! - **utils**: paths, title truncation, relative timestamps

pub mod config;
pub mod session;
pub mod types;
pub mod utils;

pub use session::{SessionId, SessionRecord, SessionStore};
pub use types::Exchange;

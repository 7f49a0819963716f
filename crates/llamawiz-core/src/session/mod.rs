//! Session store — in-memory map from session id to conversation record.
//!
//! Records exist only for sessions that completed at least one turn. Nothing
//! is evicted and nothing is written to disk; the store lives as long as the
//! process.

pub mod id;
pub mod store;

pub use id::SessionId;
pub use store::{derive_title, SessionRecord, SessionStore, DEFAULT_TITLE_MAX_CHARS, NEW_CHAT_TITLE};

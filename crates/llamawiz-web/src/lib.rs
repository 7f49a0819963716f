//! Web host for Llama-Wizard.
//!
//! Serves a single HTML page and a small JSON API that maps the page's three
//! intents (send a message, start a chat, open a chat) onto
//! [`llamawiz_chat::ChatService`]. Each page load gets its own connection id,
//! and with it its own "current session".

pub mod connections;
pub mod error;
pub mod handlers;
pub mod server;

pub use connections::{ConnectionRegistry, DEFAULT_IDLE_TTL};
pub use error::ApiError;
pub use server::{router, run, AppState};

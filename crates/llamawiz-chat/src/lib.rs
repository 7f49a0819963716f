//! Llama-Wizard chat — the bookkeeping between the presentation layer, the
//! inference client, and the session store.
//!
//! This crate contains:
//! - **service**: [`ChatService`] and the per-connection [`ChatContext`]
//! - **lifecycle**: new / list / load session operations
//! - **turn**: the submit-a-message turn processor

pub mod lifecycle;
pub mod service;
pub mod turn;

#[cfg(test)]
pub(crate) mod testing;

pub use lifecycle::{LoadedSession, NewSession, SessionListEntry};
pub use service::{ChatContext, ChatService};
pub use turn::{TurnOutput, TurnStatus};

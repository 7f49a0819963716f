//! Inference layer for Llama-Wizard.
//!
//! # Architecture
//!
//! - [`traits::InferenceClient`] — trait the turn processor calls
//! - [`traits::Completion`] — tagged result: a reply or a structured failure
//! - [`http_provider::HttpInferenceClient`] — OpenAI-compatible HTTP client

pub mod http_provider;
pub mod traits;

// Re-export main types for convenience
pub use http_provider::HttpInferenceClient;
pub use traits::{Completion, InferenceClient, InferenceError, RequestParams};

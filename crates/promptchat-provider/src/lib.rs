//! Prompt endpoint client layer for Promptchat.
//!
//! # Architecture
//!
//! - [`traits::PromptProvider`] — the contract the session manager calls
//! - [`http_provider::HttpPromptProvider`] — reqwest client for the hosted
//!   prompt endpoint

pub mod http_provider;
pub mod traits;

// Re-export main types for convenience
pub use http_provider::HttpPromptProvider;
pub use traits::{PromptProvider, PromptTurn};

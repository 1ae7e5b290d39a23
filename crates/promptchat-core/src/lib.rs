//! Core building blocks for Promptchat — typed messages, the in-memory
//! session store, configuration, and shared error types.
//!
//! Everything here is provider-agnostic: the HTTP client lives in
//! `promptchat-provider`, the turn loop in `promptchat-engine`.

pub mod config;
pub mod error;
pub mod session;
pub mod types;
pub mod utils;

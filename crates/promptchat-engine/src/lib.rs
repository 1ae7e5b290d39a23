//! Conversation turn engine — one provider call per user turn, with the
//! transcript and conversation handle kept consistent on every outcome.

pub mod engine;

pub use engine::{ChatEngine, NO_REPLY_PLACEHOLDER};

//! Session store — keyed, in-memory conversation state.
//!
//! Sessions live for the lifetime of the process and die with it; there is
//! no disk persistence. Each session owns its transcript and conversation
//! handle exclusively.

pub mod store;

pub use store::SessionStore;

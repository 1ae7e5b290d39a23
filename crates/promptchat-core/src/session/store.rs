//! Keyed in-memory session store.
//!
//! The store hands out snapshots, never references into the map: callers get
//! a `Session` clone to render from, and mutate through the store's own
//! operations so `updated_at` stays accurate.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use tracing::debug;

use crate::types::{Message, Session};

/// Per-key conversation state for the whole process.
///
/// Thread-safe via `RwLock` — multiple readers, exclusive writer. Turn
/// submission is serialized per session by the caller, so the lock only
/// guards map access, not turn ordering.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        SessionStore {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Get a snapshot of a session, creating an empty one if absent.
    pub fn get_or_create(&self, key: &str) -> Session {
        {
            let sessions = self.sessions.read().unwrap();
            if let Some(session) = sessions.get(key) {
                return session.clone();
            }
        }

        let session = Session::new(key);
        let mut sessions = self.sessions.write().unwrap();
        // Another thread may have raced us here; keep whichever is present.
        sessions
            .entry(key.to_string())
            .or_insert(session)
            .clone()
    }

    /// Append a message to a session's transcript, creating the session if
    /// needed.
    pub fn append(&self, key: &str, message: Message) {
        let mut sessions = self.sessions.write().unwrap();
        let session = sessions
            .entry(key.to_string())
            .or_insert_with(|| Session::new(key));
        session.messages.push(message);
        session.updated_at = Utc::now();
    }

    /// Current transcript of a session, oldest first. Empty if the session
    /// does not exist.
    pub fn history(&self, key: &str) -> Vec<Message> {
        let sessions = self.sessions.read().unwrap();
        sessions
            .get(key)
            .map(|s| s.messages.clone())
            .unwrap_or_default()
    }

    /// The session's current conversation handle, if any.
    pub fn conversation_id(&self, key: &str) -> Option<String> {
        let sessions = self.sessions.read().unwrap();
        sessions.get(key).and_then(|s| s.conversation_id.clone())
    }

    /// Overwrite the session's conversation handle.
    pub fn set_conversation_id(&self, key: &str, conversation_id: Option<String>) {
        let mut sessions = self.sessions.write().unwrap();
        let session = sessions
            .entry(key.to_string())
            .or_insert_with(|| Session::new(key));
        session.conversation_id = conversation_id;
        session.updated_at = Utc::now();
    }

    /// Reset a session: drop the transcript and the conversation handle.
    ///
    /// The next turn starts a fresh conversation on the provider side.
    pub fn clear(&self, key: &str) {
        let mut sessions = self.sessions.write().unwrap();
        if let Some(session) = sessions.get_mut(key) {
            session.messages.clear();
            session.conversation_id = None;
            session.updated_at = Utc::now();
            debug!(session = key, "session cleared");
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

//! Core types for Promptchat — chat messages, sessions, and the wire
//! format of the hosted prompt endpoint.
//!
//! Transcript messages carry only a role and text content; the hosted
//! prompt owns the instruction set, so there is no system role here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─────────────────────────────────────────────
// Messages
// ─────────────────────────────────────────────

/// Who authored a transcript message.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry in a conversation transcript. Immutable once created.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Message {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Message {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

// ─────────────────────────────────────────────
// Sessions
// ─────────────────────────────────────────────

/// A conversation session: the transcript plus the provider's opaque
/// conversation handle.
///
/// `conversation_id` starts out absent and is overwritten with whatever the
/// provider returns each turn; it is never inspected, only round-tripped so
/// the provider can rebuild its own context.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// Session key (e.g. `"cli:default"`).
    pub key: String,
    /// Transcript in chronological order, append-only.
    pub messages: Vec<Message>,
    /// Opaque continuation handle from the provider, if any turn returned one.
    pub conversation_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a new empty session.
    pub fn new(key: impl Into<String>) -> Self {
        let now = Utc::now();
        Session {
            key: key.into(),
            messages: Vec::new(),
            conversation_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}

// ─────────────────────────────────────────────
// Prompt endpoint wire format
// ─────────────────────────────────────────────

/// Request body for the hosted prompt endpoint.
///
/// The prompt template itself lives server-side; we send its identity, the
/// per-call variable bindings, and the conversation handle from the previous
/// turn (omitted on the first turn).
#[derive(Debug, Serialize)]
pub struct PromptRequest {
    pub prompt: PromptRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation: Option<String>,
}

/// Identity of a hosted prompt template plus its variable bindings.
#[derive(Debug, Serialize)]
pub struct PromptRef {
    pub id: String,
    pub version: String,
    pub variables: HashMap<String, String>,
}

/// Raw response from the prompt endpoint. Used internally for deserialization.
///
/// Both fields are optional on the wire: a response may omit the text (the
/// model produced no output) or the conversation id (provider-dependent).
#[derive(Debug, Deserialize)]
pub struct PromptResponse {
    pub id: Option<String>,
    #[serde(default)]
    pub output_text: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

/// A successful completion, as seen by the session manager: the reply text
/// and the updated conversation handle, nothing else.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PromptReply {
    /// Reply text, if the model produced any.
    pub text: Option<String>,
    /// Updated conversation handle, if the provider returned one.
    pub conversation_id: Option<String>,
}

impl From<PromptResponse> for PromptReply {
    fn from(resp: PromptResponse) -> Self {
        PromptReply {
            text: resp.output_text,
            conversation_id: resp.conversation_id,
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

//! The conversation session manager.
//!
//! `submit_turn` drives exactly one provider call per user turn, in a fixed
//! order of externally observable effects:
//!
//! 1. append the user message (rendered regardless of what happens next)
//! 2. call the prompt endpoint with the session's conversation handle
//! 3. on success, append the assistant reply (placeholder if the endpoint
//!    produced no text) and store the updated handle
//!
//! On failure nothing after step 1 happens: the transcript ends on the
//! unanswered user turn, the handle keeps its prior value, and the session
//! stays usable. There are no retries and no partial results — the one
//! suspend point is the provider call, which either returns or errors.

use std::sync::Arc;

use tracing::{debug, warn};

use promptchat_core::config::{MissingConversationPolicy, PromptConfig};
use promptchat_core::error::TurnError;
use promptchat_core::session::SessionStore;
use promptchat_core::types::Message;
use promptchat_provider::{PromptProvider, PromptTurn};

/// Assistant bubble shown when a successful call produced no reply text.
pub const NO_REPLY_PLACEHOLDER: &str = "(no response)";

// ─────────────────────────────────────────────
// ChatEngine
// ─────────────────────────────────────────────

/// Owns the session store and drives turns against the prompt endpoint.
///
/// Callers serialize turns per session (the chat surface blocks input while
/// a turn is in flight), so the engine never has two calls racing on one
/// session's state.
pub struct ChatEngine {
    provider: Arc<dyn PromptProvider>,
    sessions: SessionStore,
    prompt: PromptConfig,
    on_missing_conversation: MissingConversationPolicy,
}

impl ChatEngine {
    /// Create an engine for a fixed prompt identity.
    pub fn new(
        provider: Arc<dyn PromptProvider>,
        prompt: PromptConfig,
        on_missing_conversation: MissingConversationPolicy,
    ) -> Self {
        ChatEngine {
            provider,
            sessions: SessionStore::new(),
            prompt,
            on_missing_conversation,
        }
    }

    /// Submit one user turn and return the assistant's reply text.
    ///
    /// On `Err` the user message is already in the transcript (unless the
    /// input was empty, which leaves the session untouched) and the caller
    /// is expected to surface the error as an alert; the user may simply
    /// resubmit.
    pub async fn submit_turn(&self, session_key: &str, user_text: &str) -> Result<String, TurnError> {
        if user_text.trim().is_empty() {
            return Err(TurnError::EmptyInput);
        }

        self.sessions.append(session_key, Message::user(user_text));

        let conversation_id = self.sessions.conversation_id(session_key);
        debug!(
            session = session_key,
            continuing = conversation_id.is_some(),
            "submitting turn"
        );

        let result = self
            .provider
            .complete(PromptTurn {
                prompt_id: &self.prompt.id,
                prompt_version: &self.prompt.version,
                user_message: user_text,
                conversation_id: conversation_id.as_deref(),
            })
            .await;

        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                warn!(session = session_key, error = %e, "turn failed");
                return Err(e.into());
            }
        };

        let reply_text = match reply.text {
            Some(text) if !text.trim().is_empty() => text,
            _ => NO_REPLY_PLACEHOLDER.to_string(),
        };
        self.sessions
            .append(session_key, Message::assistant(reply_text.clone()));

        match reply.conversation_id {
            Some(id) => self.sessions.set_conversation_id(session_key, Some(id)),
            None => match self.on_missing_conversation {
                // Keep the previous handle; a dropped handle must not
                // silently reset the provider-side memory.
                MissingConversationPolicy::Retain => {}
                MissingConversationPolicy::Reset => {
                    self.sessions.set_conversation_id(session_key, None);
                }
            },
        }

        Ok(reply_text)
    }

    /// The session's transcript so far, oldest first.
    pub fn transcript(&self, session_key: &str) -> Vec<Message> {
        self.sessions.history(session_key)
    }

    /// The session's current conversation handle, if any.
    pub fn conversation_id(&self, session_key: &str) -> Option<String> {
        self.sessions.conversation_id(session_key)
    }

    /// Drop a session's transcript and conversation handle; the next turn
    /// starts a fresh conversation.
    pub fn reset(&self, session_key: &str) {
        self.sessions.clear(session_key);
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

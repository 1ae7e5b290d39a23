//! Prompt provider trait — the external completion collaborator's contract.
//!
//! Failures are an `Err` branch: never a panic, never an error string
//! smuggled through the reply text.

use async_trait::async_trait;

use promptchat_core::error::ProviderError;
use promptchat_core::types::PromptReply;

/// Input for one completion call.
///
/// Prompt id and version are fixed configuration captured at startup; only
/// `user_message` and the conversation handle vary per turn.
#[derive(Clone, Copy, Debug)]
pub struct PromptTurn<'a> {
    /// Identity of the hosted prompt template.
    pub prompt_id: &'a str,
    /// Version of the hosted prompt template.
    pub prompt_version: &'a str,
    /// The user's text for this turn, bound to the `user_message` variable.
    pub user_message: &'a str,
    /// Continuation handle from the previous turn, absent on the first.
    pub conversation_id: Option<&'a str>,
}

/// Trait the session manager calls once per turn.
#[async_trait]
pub trait PromptProvider: Send + Sync {
    /// Send one completion request.
    ///
    /// # Returns
    /// A [`PromptReply`] on success — reply text and updated conversation
    /// handle, each of which the endpoint may omit. A [`ProviderError`] on
    /// any failure; no retries happen at this layer.
    async fn complete(&self, turn: PromptTurn<'_>) -> Result<PromptReply, ProviderError>;

    /// Display name for logging.
    fn display_name(&self) -> &str;
}

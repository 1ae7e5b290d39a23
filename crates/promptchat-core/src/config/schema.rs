//! Configuration schema.
//!
//! Hierarchy: `Config` → `ProviderConfig`, `PromptConfig`, `ChatConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default API base for the hosted prompt endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.promptchat/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub prompt: PromptConfig,
    pub chat: ChatConfig,
}

impl Config {
    /// Check the startup preconditions: a credential and a prompt identity.
    ///
    /// A config that fails here must stop the process before any session
    /// begins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let path = crate::config::loader::get_config_path()
            .display()
            .to_string();

        if !self.provider.is_configured() {
            return Err(ConfigError::MissingCredential { path });
        }
        if self.prompt.id.trim().is_empty() {
            return Err(ConfigError::MissingPromptId { path });
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────
// Provider
// ─────────────────────────────────────────────

/// Access to the hosted prompt endpoint (credential + base URL).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// API key for Bearer authentication.
    pub api_key: String,
    /// API base URL.
    pub api_base: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl ProviderConfig {
    /// Whether a credential is present.
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

// ─────────────────────────────────────────────
// Prompt
// ─────────────────────────────────────────────

/// Identity of the hosted prompt template every turn is sent to.
///
/// Fixed configuration, never user input.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PromptConfig {
    /// Prompt id (e.g. `"pmpt_690069ca73ac…"`).
    pub id: String,
    /// Prompt version.
    pub version: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            version: "1".to_string(),
        }
    }
}

// ─────────────────────────────────────────────
// Chat behavior
// ─────────────────────────────────────────────

/// Turn-handling knobs.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatConfig {
    /// What to do when a successful response carries no conversation id.
    pub on_missing_conversation: MissingConversationPolicy,
}

/// Recovery policy for a successful response that omits the conversation id.
///
/// Providers differ on what an omitted handle means, so this is an explicit
/// choice rather than a guess:
/// - `Retain` — keep the previous handle; the next turn continues the same
///   server-side conversation.
/// - `Reset` — treat the omission as a reset signal and clear the handle;
///   the next turn starts a fresh conversation.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MissingConversationPolicy {
    #[default]
    Retain,
    Reset,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

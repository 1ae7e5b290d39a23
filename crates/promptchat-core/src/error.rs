//! Shared error types.
//!
//! Two failure domains, kept deliberately separate:
//! - [`ConfigError`] — startup problems. Fatal: the process must stop before
//!   accepting any input.
//! - [`ProviderError`] / [`TurnError`] — per-turn problems. Recovered
//!   locally: the turn is reported to the user and the session stays usable.

use thiserror::Error;

/// A configuration problem detected at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no API key configured — set provider.apiKey in {path} or the OPENAI_API_KEY environment variable")]
    MissingCredential { path: String },

    #[error("no prompt id configured — set prompt.id in {path}")]
    MissingPromptId { path: String },

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {path} is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A failed call to the prompt endpoint.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never produced an HTTP response (DNS, connect, timeout).
    #[error("request to prompt endpoint failed: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status.
    #[error("prompt endpoint returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The endpoint answered 2xx but the body was not decodable.
    #[error("could not decode prompt endpoint response: {0}")]
    Decode(String),
}

/// Why a submitted turn did not produce an assistant message.
#[derive(Debug, Error)]
pub enum TurnError {
    /// Empty or whitespace-only input; the session was not touched.
    #[error("message is empty")]
    EmptyInput,

    /// The provider call failed; the user message stays in the transcript,
    /// the conversation handle is untouched.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_mentions_env_fallback() {
        let err = ConfigError::MissingCredential {
            path: "/home/u/.promptchat/config.json".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("OPENAI_API_KEY"));
        assert!(msg.contains("config.json"));
    }

    #[test]
    fn test_provider_error_api_display() {
        let err = ProviderError::Api {
            status: 429,
            body: "rate limited".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("429"));
        assert!(msg.contains("rate limited"));
    }

    #[test]
    fn test_turn_error_is_transparent_for_provider() {
        let turn: TurnError = ProviderError::Transport("connection refused".to_string()).into();
        assert!(turn.to_string().contains("connection refused"));
    }
}

//! Config loader — reads `~/.promptchat/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.promptchat/config.json`
//! 3. Environment variables `PROMPTCHAT_<SECTION>__<FIELD>` (override JSON),
//!    plus `OPENAI_API_KEY` as a credential fallback when no key is set
//!
//! A missing file is fine (defaults + env); an unreadable or malformed file
//! is a startup error.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::schema::{Config, MissingConversationPolicy};
use crate::error::ConfigError;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    load_config_from_path(&config_path)
}

/// Load config from a specific file path.
fn load_config_from_path(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Ok(apply_env_overrides(Config::default()));
    }

    debug!("Loading config from {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        source: e,
    })?;

    let config: Config = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(apply_env_overrides(config))
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    // Ensure parent directory exists
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `PROMPTCHAT_<SECTION>__<FIELD>` (double underscore as
/// delimiter).
///
/// Supported overrides:
/// - `PROMPTCHAT_PROVIDER__API_KEY` → `provider.api_key`
/// - `PROMPTCHAT_PROVIDER__API_BASE` → `provider.api_base`
/// - `PROMPTCHAT_PROMPT__ID` → `prompt.id`
/// - `PROMPTCHAT_PROMPT__VERSION` → `prompt.version`
/// - `PROMPTCHAT_CHAT__ON_MISSING_CONVERSATION` → `chat.on_missing_conversation`
/// - `OPENAI_API_KEY` → `provider.api_key`, only when no key is set elsewhere
fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(val) = std::env::var("PROMPTCHAT_PROVIDER__API_KEY") {
        config.provider.api_key = val;
    }
    if let Ok(val) = std::env::var("PROMPTCHAT_PROVIDER__API_BASE") {
        config.provider.api_base = val;
    }
    if let Ok(val) = std::env::var("PROMPTCHAT_PROMPT__ID") {
        config.prompt.id = val;
    }
    if let Ok(val) = std::env::var("PROMPTCHAT_PROMPT__VERSION") {
        config.prompt.version = val;
    }
    if let Ok(val) = std::env::var("PROMPTCHAT_CHAT__ON_MISSING_CONVERSATION") {
        match val.as_str() {
            "retain" => config.chat.on_missing_conversation = MissingConversationPolicy::Retain,
            "reset" => config.chat.on_missing_conversation = MissingConversationPolicy::Reset,
            other => debug!("ignoring unknown conversation policy {:?}", other),
        }
    }

    // Conventional credential fallback, lowest precedence.
    if !config.provider.is_configured() {
        if let Ok(val) = std::env::var("OPENAI_API_KEY") {
            config.provider.api_key = val;
        }
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    /// Tests that set env vars or assert on env-overridable fields take this
    /// lock so they don't race each other.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn write_temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_missing_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        let config = load_config_from_path(Path::new("/nonexistent/path/config.json")).unwrap();
        // Should return defaults
        assert_eq!(config.prompt.version, "1");
        assert_eq!(config.provider.api_base, super::super::schema::DEFAULT_API_BASE);
    }

    #[test]
    fn test_load_valid_json() {
        let _guard = ENV_LOCK.lock().unwrap();
        let file = write_temp_json(
            r#"{
            "prompt": {
                "id": "pmpt_file",
                "version": "3"
            }
        }"#,
        );

        let config = load_config_from_path(file.path()).unwrap();
        assert_eq!(config.prompt.id, "pmpt_file");
        assert_eq!(config.prompt.version, "3");
        // Default preserved
        assert_eq!(
            config.chat.on_missing_conversation,
            MissingConversationPolicy::Retain
        );
    }

    #[test]
    fn test_load_invalid_json_is_an_error() {
        let file = write_temp_json("not valid json {{{");
        let err = load_config_from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn test_load_empty_json() {
        let file = write_temp_json("{}");
        let config = load_config_from_path(file.path()).unwrap();
        assert_eq!(config.prompt.version, "1");
    }

    #[test]
    fn test_load_policy_from_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        let file = write_temp_json(
            r#"{
            "chat": { "onMissingConversation": "reset" }
        }"#,
        );

        let config = load_config_from_path(file.path()).unwrap();
        assert_eq!(
            config.chat.on_missing_conversation,
            MissingConversationPolicy::Reset
        );
    }

    #[test]
    fn test_save_and_reload() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.prompt.id = "pmpt_saved".to_string();
        config.provider.api_base = "https://proxy.example/v1".to_string();

        save_config(&config, Some(&path)).unwrap();

        let reloaded = load_config_from_path(&path).unwrap();
        assert_eq!(reloaded.prompt.id, "pmpt_saved");
        assert_eq!(reloaded.provider.api_base, "https://proxy.example/v1");
    }

    #[test]
    fn test_saved_json_uses_camel_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        save_config(&Config::default(), Some(&path)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert!(raw["provider"].get("apiKey").is_some());
        assert!(raw["provider"].get("api_key").is_none());
    }

    #[test]
    fn test_env_override_prompt_id() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("PROMPTCHAT_PROMPT__ID", "pmpt_env");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.prompt.id, "pmpt_env");
        std::env::remove_var("PROMPTCHAT_PROMPT__ID");
    }

    #[test]
    fn test_env_override_api_base() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("PROMPTCHAT_PROVIDER__API_BASE", "https://env.example/v1");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.provider.api_base, "https://env.example/v1");
        std::env::remove_var("PROMPTCHAT_PROVIDER__API_BASE");
    }

    #[test]
    fn test_env_override_policy() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("PROMPTCHAT_CHAT__ON_MISSING_CONVERSATION", "reset");
        let config = apply_env_overrides(Config::default());
        assert_eq!(
            config.chat.on_missing_conversation,
            MissingConversationPolicy::Reset
        );
        std::env::remove_var("PROMPTCHAT_CHAT__ON_MISSING_CONVERSATION");
    }

    #[test]
    fn test_configured_key_beats_openai_fallback() {
        let _guard = ENV_LOCK.lock().unwrap();
        let file = write_temp_json(r#"{ "provider": { "apiKey": "sk-from-file" } }"#);

        std::env::set_var("OPENAI_API_KEY", "sk-fallback");
        let config = load_config_from_path(file.path()).unwrap();
        assert_eq!(config.provider.api_key, "sk-from-file");
        std::env::remove_var("OPENAI_API_KEY");
    }
}

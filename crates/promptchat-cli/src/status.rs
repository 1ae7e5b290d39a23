//! `promptchat status` — show configuration and credential status.
//!
//! Never prints the key itself, only whether one is present.

use anyhow::Result;
use colored::Colorize;

use promptchat_core::config::{get_config_path, load_config, MissingConversationPolicy};

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None)?;
    let config_path = get_config_path();

    println!();
    println!("{}", "💬 Promptchat Status".cyan().bold());
    println!();

    // Config file
    let config_exists = config_path.exists();
    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_exists {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );

    // Prompt identity
    let prompt_display = if config.prompt.id.is_empty() {
        "(not set)".red().to_string()
    } else {
        format!("{} v{}", config.prompt.id, config.prompt.version)
    };
    println!("  {:<18} {}", "Prompt:".bold(), prompt_display);

    // Endpoint
    println!("  {:<18} {}", "Endpoint:".bold(), config.provider.api_base);

    // Credential
    let key_status = if config.provider.is_configured() {
        format!("{} (key set)", "✓".green())
    } else {
        "· not configured".dimmed().to_string()
    };
    println!("  {:<18} {}", "Credential:".bold(), key_status);

    // Conversation policy
    let policy = match config.chat.on_missing_conversation {
        MissingConversationPolicy::Retain => "retain previous handle",
        MissingConversationPolicy::Reset => "reset to a fresh conversation",
    };
    println!(
        "  {:<18} {}",
        "On lost handle:".bold(),
        policy.dimmed()
    );

    println!();

    Ok(())
}

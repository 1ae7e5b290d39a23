//! `promptchat onboard` — initialize configuration.
//!
//! Creates `~/.promptchat/config.json` with defaults and points out the two
//! fields that must be filled in before the first chat.

use anyhow::Result;
use colored::Colorize;

use promptchat_core::config::{get_config_path, save_config, Config};
use promptchat_core::utils::get_history_path;

/// Run the onboard command.
pub fn run() -> Result<()> {
    println!();
    println!("{}", "💬 Promptchat — Setup".cyan().bold());
    println!();

    let config_path = get_config_path();

    // 1. Create config if it doesn't exist
    if config_path.exists() {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            config_path.display()
        );
    } else {
        save_config(&Config::default(), Some(&config_path))?;
        println!(
            "  {} created config at {}",
            "✓".green(),
            config_path.display()
        );
    }

    // 2. Ensure the REPL history directory
    let history_dir = get_history_path();
    std::fs::create_dir_all(&history_dir)?;
    println!("  {} history dir at {}", "✓".green(), history_dir.display());

    println!();
    println!("  {}", "Before chatting, fill in:".bold());
    println!(
        "    {} — or export {}",
        "provider.apiKey".yellow(),
        "OPENAI_API_KEY".yellow()
    );
    println!("    {} — the hosted prompt to talk to", "prompt.id".yellow());
    println!();
    println!(
        "{}",
        "  Setup complete! Run `promptchat chat` to start chatting.".green()
    );
    println!();

    Ok(())
}

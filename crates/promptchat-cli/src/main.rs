//! Promptchat CLI — entry point.
//!
//! # Commands
//!
//! - `promptchat chat [-m MESSAGE] [-s SESSION]` — chat with the hosted
//!   prompt (single-shot or REPL)
//! - `promptchat onboard` — initialize config
//! - `promptchat status` — show configuration and credential status

mod helpers;
mod onboard;
mod repl;
mod status;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use promptchat_core::config::{load_config, Config};
use promptchat_engine::ChatEngine;
use promptchat_provider::HttpPromptProvider;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// 💬 Promptchat — terminal chat for a hosted prompt
#[derive(Parser)]
#[command(name = "promptchat", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the hosted prompt (single-shot or interactive REPL)
    Chat {
        /// Single message (non-interactive). Omit for REPL mode.
        #[arg(short, long)]
        message: Option<String>,

        /// Session identifier (format: "channel:id")
        #[arg(short, long, default_value = "cli:default")]
        session: String,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Initialize configuration
    Onboard,

    /// Show configuration and credential status
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Chat {
            message,
            session,
            logs,
        } => {
            init_logging(logs);
            run_chat(message, session).await
        }
        Commands::Onboard => onboard::run(),
        Commands::Status => status::run(),
    }
}

// ─────────────────────────────────────────────
// Chat command
// ─────────────────────────────────────────────

async fn run_chat(message: Option<String>, session_key: String) -> Result<()> {
    let config = load_config(None)?;
    // Missing credential or prompt id is fatal — stop before accepting input.
    config.validate()?;

    let prompt_id = config.prompt.id.clone();
    let engine = build_engine(&config);

    match message {
        Some(msg) => {
            // Single-shot mode
            info!(session = %session_key, "processing single message");
            let reply = engine
                .submit_turn(&session_key, &msg)
                .await
                .context("turn failed")?;
            helpers::print_reply(&reply);
        }
        None => {
            // Interactive REPL mode
            repl::run(engine, &session_key, &prompt_id).await?;
        }
    }

    Ok(())
}

/// Build a `ChatEngine` from the loaded configuration.
fn build_engine(config: &Config) -> ChatEngine {
    let provider = HttpPromptProvider::new(
        config.provider.api_base.clone(),
        config.provider.api_key.clone(),
    );

    ChatEngine::new(
        Arc::new(provider),
        config.prompt.clone(),
        config.chat.on_missing_conversation,
    )
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("promptchat=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

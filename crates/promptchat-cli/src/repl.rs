//! Interactive REPL — readline-style chat loop.
//!
//! Input is blocked while a turn is in flight (the loop awaits the engine),
//! so turns are inherently serialized. A failed turn prints an alert and the
//! loop continues with the session intact.

use anyhow::Result;
use colored::Colorize;
use rustyline::config::Configurer;
use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor};
use tracing::debug;

use promptchat_engine::ChatEngine;

use crate::helpers;

/// Exit commands (case-insensitive match).
const EXIT_COMMANDS: &[&str] = &["exit", "quit", "/exit", "/quit", ":q"];

/// Reset command: drop the transcript and start a fresh conversation.
const NEW_COMMAND: &str = "/new";

/// Run the interactive REPL loop.
pub async fn run(engine: ChatEngine, session_key: &str, prompt_id: &str) -> Result<()> {
    helpers::print_banner(prompt_id);

    let mut editor = create_editor()?;

    loop {
        // Read input
        let input = match editor.readline("You: ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted) => {
                // Ctrl-C — exit cleanly
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                // Ctrl-D — exit cleanly
                break;
            }
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        // Check exit commands
        if is_exit_command(trimmed) {
            println!("\nGoodbye! 👋");
            break;
        }

        if trimmed == NEW_COMMAND {
            engine.reset(session_key);
            println!("{}", "Started a fresh conversation.".dimmed());
            continue;
        }

        // Add to history
        let _ = editor.add_history_entry(&input);

        // Process message
        debug!(session = session_key, input = trimmed, "processing input");
        helpers::print_thinking();

        match engine.submit_turn(session_key, trimmed).await {
            Ok(reply) => {
                helpers::clear_thinking();
                helpers::print_reply(&reply);
            }
            Err(e) => {
                helpers::clear_thinking();
                helpers::print_error(&e.to_string());
            }
        }
    }

    // Save history
    save_history(&mut editor);

    Ok(())
}

/// Create a rustyline editor with history.
fn create_editor() -> Result<Editor<(), DefaultHistory>> {
    let mut editor = DefaultEditor::new()?;
    editor.set_max_history_size(1000)?;

    // Load history from ~/.promptchat/history/cli_history
    let history_path = history_path();
    if history_path.exists() {
        let _ = editor.load_history(&history_path);
        debug!("loaded REPL history from {}", history_path.display());
    }

    Ok(editor)
}

/// Save history to disk.
fn save_history(editor: &mut Editor<(), DefaultHistory>) {
    let path = history_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = editor.save_history(&path) {
        debug!("failed to save history: {e}");
    }
}

/// Path to the history file.
fn history_path() -> std::path::PathBuf {
    promptchat_core::utils::get_history_path().join("cli_history")
}

/// Check if input is an exit command.
fn is_exit_command(input: &str) -> bool {
    let lower = input.to_lowercase();
    EXIT_COMMANDS.contains(&lower.as_str())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

//! Shared CLI output helpers — chat bubbles, alerts, busy indicator.

use colored::Colorize;

/// Print an assistant reply as a chat bubble.
pub fn print_reply(reply: &str) {
    println!();
    println!("{}", "💬 Assistant".cyan().bold());
    println!("{reply}");
    println!();
}

/// Print a turn failure as a visible alert. The session stays usable; the
/// user may simply resubmit.
pub fn print_error(message: &str) {
    eprintln!();
    eprintln!("{} {}", "✖ Error:".red().bold(), message);
    eprintln!();
}

/// Print the banner shown at REPL start.
pub fn print_banner(prompt_id: &str) {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "💬 Promptchat".cyan().bold(), version.dimmed());
    println!("{}", format!("Using prompt: {prompt_id}").dimmed());
    println!(
        "{}",
        "Type a message, \"/new\" for a fresh conversation, or \"exit\" to quit.".dimmed()
    );
    println!();
}

/// Print a "thinking" indicator while a turn is in flight.
pub fn print_thinking() {
    eprint!("{}", "⠿ thinking...".dimmed());
}

/// Clear the "thinking" indicator.
pub fn clear_thinking() {
    eprint!("\r{}\r", " ".repeat(40));
}

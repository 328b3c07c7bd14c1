//! Shared CLI helpers — path expansion, result printing, banner.

use std::path::PathBuf;

use colored::Colorize;

use modelgate_core::models::ModelDescriptor;
use modelgate_core::types::{ChatResult, Usage};

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_next::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs_next::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

/// Print a dispatch outcome to stdout (errors to stderr).
pub fn print_result(result: &ChatResult) {
    match result {
        ChatResult::Success { reply, usage, .. } => {
            println!();
            println!("{}", "Modelgate".cyan().bold());
            if reply.is_empty() {
                println!("{}", "(empty reply)".dimmed());
            } else {
                println!("{reply}");
            }
            println!("{}", format_usage(usage).dimmed());
            println!();
        }
        ChatResult::Failure { error, .. } => {
            eprintln!("\n{} {error}\n", "Error:".red().bold());
        }
    }
}

/// One-line token summary.
pub fn format_usage(usage: &Usage) -> String {
    format!(
        "tokens: {} prompt + {} completion = {} total",
        usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
    )
}

/// Print the model registry as a table.
pub fn print_models(models: &[ModelDescriptor]) {
    println!();
    println!(
        "  {:<18} {:<16} {:<10} {}",
        "ID".bold(),
        "NAME".bold(),
        "PROVIDER".bold(),
        "DESCRIPTION".bold()
    );
    for model in models {
        println!(
            "  {:<18} {:<16} {:<10} {}",
            model.id,
            model.name,
            model.provider.as_str(),
            model.description.dimmed()
        );
    }
    println!();
}

/// Print the banner shown at REPL start.
pub fn print_banner(model: &str) {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "Modelgate".cyan().bold(), version.dimmed());
    println!("Model: {}", model.bold());
    println!("{}", "Type a message, or \"exit\" to quit.".dimmed());
    println!();
}

/// Print a "thinking" placeholder while waiting on the upstream.
pub fn print_thinking() {
    eprint!("{}", "⠿ waiting for reply...".dimmed());
}

/// Clear the "thinking" placeholder.
pub fn clear_thinking() {
    eprint!("\r{}\r", " ".repeat(40));
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

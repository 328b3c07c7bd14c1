//! Interactive REPL — each line is one independent `sendMessage` call.
//!
//! Uses `rustyline` for readline-style editing with persistent history.
//! No conversation state is carried between lines.

use anyhow::Result;
use rustyline::config::Configurer;
use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor};
use tracing::debug;

use modelgate_core::env::ProcessEnv;
use modelgate_core::types::ChatRequest;
use modelgate_providers::Dispatcher;

use crate::helpers;

/// Exit commands (case-insensitive match).
const EXIT_COMMANDS: &[&str] = &["exit", "quit", "/exit", "/quit", ":q"];

/// Run the interactive REPL loop.
pub async fn run(dispatcher: Dispatcher, model: &str) -> Result<()> {
    helpers::print_banner(model);

    let mut editor = create_editor()?;

    loop {
        let input = match editor.readline("You: ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted) => break,
            Err(rustyline::error::ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        if is_exit_command(trimmed) {
            println!("\nGoodbye!");
            break;
        }

        let _ = editor.add_history_entry(&input);

        debug!(model = model, input_len = trimmed.len(), "sending REPL input");
        helpers::print_thinking();

        let request = ChatRequest::new(trimmed, model);
        // Ctrl-C during the call drops the future, cancelling the upstream request.
        tokio::select! {
            result = dispatcher.dispatch(&request, &ProcessEnv) => {
                helpers::clear_thinking();
                helpers::print_result(&result);
            }
            _ = tokio::signal::ctrl_c() => {
                helpers::clear_thinking();
                eprintln!("\n(cancelled)\n");
            }
        }
    }

    save_history(&mut editor);

    Ok(())
}

/// Create a rustyline editor with history.
fn create_editor() -> Result<Editor<(), DefaultHistory>> {
    let mut editor = DefaultEditor::new()?;
    editor.set_max_history_size(1000)?;

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
    modelgate_core::utils::get_data_path()
        .join("history")
        .join("chat_history")
}

/// Check if input is an exit command.
fn is_exit_command(input: &str) -> bool {
    let lower = input.to_lowercase();
    EXIT_COMMANDS.contains(&lower.as_str())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

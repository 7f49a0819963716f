//! Interactive REPL — the terminal counterpart of the browser page.
//!
//! Uses `rustyline` for readline-style editing with persistent history.

use anyhow::Result;
use rustyline::config::Configurer;
use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor};
use tracing::debug;

use llamawiz_chat::{ChatContext, ChatService, TurnStatus};

use crate::helpers;

/// Exit commands (case-insensitive match).
const EXIT_COMMANDS: &[&str] = &["exit", "quit", "/exit", "/quit", ":q"];

/// One line of REPL input.
#[derive(Debug, PartialEq)]
enum ReplCommand {
    Exit,
    New,
    List,
    Load(String),
    Message(String),
}

fn parse_command(input: &str) -> ReplCommand {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if EXIT_COMMANDS.contains(&lower.as_str()) {
        return ReplCommand::Exit;
    }
    match lower.as_str() {
        "/new" => return ReplCommand::New,
        "/list" => return ReplCommand::List,
        _ => {}
    }
    if let Some(rest) = trimmed.strip_prefix("/load ") {
        return ReplCommand::Load(rest.trim().to_string());
    }
    ReplCommand::Message(input.to_string())
}

/// Run the interactive REPL loop.
pub async fn run(service: ChatService) -> Result<()> {
    helpers::print_banner("Chat");
    helpers::print_repl_help();

    let mut editor = create_editor()?;
    let mut ctx = ChatContext::new();
    let mut history = service.new_session(&mut ctx).history;

    loop {
        let input = match editor.readline("You: ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted) => {
                // Ctrl-C
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                // Ctrl-D
                break;
            }
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        };

        if input.trim().is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(&input);

        match parse_command(&input) {
            ReplCommand::Exit => {
                println!("\nGoodbye! 👋");
                break;
            }
            ReplCommand::New => {
                let created = service.new_session(&mut ctx);
                history = created.history;
                println!("\n  Started {}\n", created.id);
            }
            ReplCommand::List => {
                helpers::print_sessions(&service.list_sessions(&ctx));
            }
            ReplCommand::Load(identifier) => {
                let loaded = service.load_session(&mut ctx, &identifier);
                match loaded.id {
                    Some(id) => {
                        println!("\n  Loaded {id}\n");
                        history = loaded.history;
                        helpers::print_history(&history);
                    }
                    None => {
                        // A miss leaves no current session; start one so turns keep saving
                        let created = service.new_session(&mut ctx);
                        history = created.history;
                        println!(
                            "\n  No conversation matches \"{identifier}\", started {}\n",
                            created.id
                        );
                    }
                }
            }
            ReplCommand::Message(text) => {
                debug!(input = %text, "processing input");
                helpers::print_thinking();
                let output = service
                    .submit_turn(&ctx, &text, std::mem::take(&mut history))
                    .await;
                helpers::clear_thinking();

                if let TurnStatus::Failed(err) = &output.status {
                    debug!(error = %err, "reply is an error message");
                }
                if let Some(last) = output.history.last() {
                    helpers::print_response(&last.assistant);
                }
                history = output.history;
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
    llamawiz_core::utils::get_history_path().join("cli_history")
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_commands() {
        assert_eq!(parse_command("exit"), ReplCommand::Exit);
        assert_eq!(parse_command("EXIT"), ReplCommand::Exit);
        assert_eq!(parse_command("/quit"), ReplCommand::Exit);
        assert_eq!(parse_command(" :q "), ReplCommand::Exit);
    }

    #[test]
    fn session_commands() {
        assert_eq!(parse_command("/new"), ReplCommand::New);
        assert_eq!(parse_command("/LIST"), ReplCommand::List);
        assert_eq!(
            parse_command("/load chat_20260101_120000_abcd1234"),
            ReplCommand::Load("chat_20260101_120000_abcd1234".into())
        );
        assert_eq!(
            parse_command("/load   Plan a trip  "),
            ReplCommand::Load("Plan a trip".into())
        );
    }

    #[test]
    fn messages_pass_through_verbatim() {
        assert_eq!(parse_command("hello"), ReplCommand::Message("hello".into()));
        assert_eq!(
            parse_command("/loading is slow"),
            ReplCommand::Message("/loading is slow".into())
        );
    }

    #[test]
    fn history_path_under_data_dir() {
        let path = history_path();
        assert!(path.to_string_lossy().contains(".llamawiz"));
        assert!(path.to_string_lossy().contains("cli_history"));
    }
}

//! Llama-Wizard CLI — entry point.
//!
//! # Commands
//!
//! - `llamawiz serve [--host H] [--port P]` — run the browser chat host
//! - `llamawiz chat [-m MESSAGE]` — chat in the terminal (single-shot or REPL)
//! - `llamawiz onboard` — write the default config
//! - `llamawiz status` — show configuration

mod helpers;
mod onboard;
mod repl;
mod serve;
mod status;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use llamawiz_chat::{ChatContext, ChatService};
use llamawiz_core::config::{load_config, Config};
use llamawiz_core::session::SessionStore;
use llamawiz_providers::HttpInferenceClient;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// 🦙 Llama-Wizard — browser chat for a local language model
#[derive(Parser)]
#[command(name = "llamawiz", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the browser chat interface
    Serve {
        /// Listen address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Listen port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Chat in the terminal (single-shot or interactive REPL)
    Chat {
        /// Single message (non-interactive). Omit for REPL mode.
        #[arg(short, long)]
        message: Option<String>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Write the default configuration
    Onboard,

    /// Show configuration
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port, logs } => {
            init_logging(logs);
            serve::run(host, port).await
        }
        Commands::Chat { message, logs } => {
            init_logging(logs);
            run_chat(message).await
        }
        Commands::Onboard => onboard::run(),
        Commands::Status => status::run(),
    }
}

// ─────────────────────────────────────────────
// Chat command
// ─────────────────────────────────────────────

async fn run_chat(message: Option<String>) -> Result<()> {
    let config = load_config(None);
    let service = build_service(&config)?;

    match message {
        Some(msg) => {
            // Single-shot mode
            let mut ctx = ChatContext::new();
            let session = service.new_session(&mut ctx);
            info!(session = %session.id, "processing single message");
            let output = service.submit_turn(&ctx, &msg, session.history).await;
            let reply = output
                .history
                .last()
                .map(|exchange| exchange.assistant.as_str())
                .unwrap_or_default();
            helpers::print_response(reply);
        }
        None => {
            // Interactive REPL mode
            repl::run(service).await?;
        }
    }

    Ok(())
}

/// Build a `ChatService` from the loaded configuration.
pub fn build_service(config: &Config) -> Result<ChatService> {
    let client = HttpInferenceClient::new(&config.inference)?;
    let store = SessionStore::new(config.chat.title_max_chars);

    Ok(ChatService::new(Arc::new(store), Arc::new(client)))
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("llamawiz=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

//! Modelgate CLI — entry point.
//!
//! # Commands
//!
//! - `modelgate send --model M -m TEXT` — one message through the gateway
//! - `modelgate request` — `sendMessage` JSON in on stdin, JSON response out
//! - `modelgate models` — list supported models
//! - `modelgate chat --model M` — interactive REPL
//! - `modelgate status` — configuration and credential status
//! - `modelgate init` — write a default config file
//! - `modelgate hello` — liveness greeting

mod helpers;
mod init;
mod repl;
mod status;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use modelgate_core::config::{load_config, Config};
use modelgate_core::env::{EnvSource, ProcessEnv};
use modelgate_core::types::{ChatRequest, ChatResponse};
use modelgate_providers::Dispatcher;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Modelgate — one chat request, routed to the right LLM provider
#[derive(Parser)]
#[command(name = "modelgate", version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.modelgate/config.json)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, default_value_t = false)]
    logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a single message and print the reply
    Send {
        /// Model identifier (see `modelgate models`)
        #[arg(long)]
        model: String,

        /// Message text
        #[arg(short, long)]
        message: String,

        /// Sampling temperature override
        #[arg(short, long)]
        temperature: Option<f64>,

        /// Max-token override
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        max_tokens: Option<u32>,

        /// Print the JSON response instead of formatted text
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Read a sendMessage input as JSON from stdin, write the JSON response
    Request,

    /// List supported models
    Models {
        /// Print JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Interactive chat with one model
    Chat {
        /// Model identifier
        #[arg(long)]
        model: String,
    },

    /// Show configuration and credential status
    Status,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Print a greeting (liveness check)
    Hello,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.logs);

    let config_path = cli.config.as_deref().map(helpers::expand_tilde);

    match cli.command {
        Commands::Send {
            model,
            message,
            temperature,
            max_tokens,
            json,
        } => {
            let request = ChatRequest {
                message,
                model,
                temperature,
                max_tokens,
            };
            run_send(config_path, request, json).await
        }
        Commands::Request => run_request(config_path).await,
        Commands::Models { json } => run_models(config_path, json),
        Commands::Chat { model } => {
            let dispatcher = build_dispatcher(&load(config_path))?;
            repl::run(dispatcher, &model).await
        }
        Commands::Status => status::run(config_path.as_deref()),
        Commands::Init { force } => init::run(config_path.as_deref(), force),
        Commands::Hello => {
            println!("Hello from Modelgate!");
            Ok(())
        }
    }
}

fn load(path: Option<PathBuf>) -> Config {
    load_config(path.as_deref())
}

/// Build a `Dispatcher` from the loaded configuration.
pub fn build_dispatcher(config: &Config) -> Result<Dispatcher> {
    Dispatcher::from_config(config).context("failed to initialize provider adapters")
}

// ─────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────

async fn run_send(config_path: Option<PathBuf>, request: ChatRequest, json: bool) -> Result<()> {
    let dispatcher = build_dispatcher(&load(config_path))?;
    let result = dispatcher.dispatch(&request, &ProcessEnv).await;

    if json {
        let response = ChatResponse::from(result);
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        helpers::print_result(&result);
    }
    Ok(())
}

async fn run_request(config_path: Option<PathBuf>) -> Result<()> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read request from stdin")?;

    let dispatcher = build_dispatcher(&load(config_path))?;
    let output = handle_request(&dispatcher, &input, &ProcessEnv).await?;
    println!("{output}");
    Ok(())
}

/// Turn one `sendMessage` JSON input into its JSON response.
async fn handle_request(dispatcher: &Dispatcher, input: &str, env: &dyn EnvSource) -> Result<String> {
    // A malformed request shape is a caller error, not a dispatch failure.
    let request: ChatRequest = serde_json::from_str(input).context("invalid sendMessage input")?;
    debug!(model = %request.model, "request read from stdin");

    let response = ChatResponse::from(dispatcher.dispatch(&request, env).await);
    Ok(serde_json::to_string(&response)?)
}

fn run_models(config_path: Option<PathBuf>, json: bool) -> Result<()> {
    let registry = load(config_path).registry();
    if json {
        println!("{}", serde_json::to_string_pretty(registry.list())?);
    } else {
        helpers::print_models(registry.list());
    }
    Ok(())
}

/// Initialize tracing/logging. Logs go to stderr so stdout stays parseable.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("modelgate=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

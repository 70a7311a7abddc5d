//! # basket-cli
//!
//! Drives an in-memory [`CartRegistry`] from a JSON-lines command stream.
//!
//! ## Module Organization
//! ```text
//! basket_cli/
//! ├── lib.rs          ◄─── You are here (setup & run)
//! ├── config.rs       ◄─── Env + flag configuration
//! ├── session.rs      ◄─── Line loop
//! ├── commands/
//! │   ├── mod.rs      ◄─── Request/Response protocol, dispatch
//! │   └── cart.rs     ◄─── Cart command handlers
//! └── error.rs        ◄─── API error type for responses
//! ```
//!
//! ## Startup Sequence
//! 1. Parse flags
//! 2. Load configuration (env, then flag overrides)
//! 3. Initialize tracing (stderr)
//! 4. Build the registry
//! 5. Run the session over stdin or `--input`

pub mod commands;
pub mod config;
pub mod error;
pub mod session;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use basket_core::{CartRegistry, UserId};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::CliConfig;

/// Command-line flags.
#[derive(Debug, Parser)]
#[command(name = "basket", version, about = "Drive in-memory carts with JSON-lines commands")]
pub struct Cli {
    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// User id for commands that don't name one
    #[arg(short, long)]
    pub user: Option<UserId>,

    /// Pretty-print responses
    #[arg(long)]
    pub pretty: bool,

    /// Log filter directives (RUST_LOG still takes precedence)
    #[arg(long)]
    pub log: Option<String>,
}

/// Runs the CLI.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load()?.with_overrides(&cli);

    init_tracing(&config.log_filter);
    info!(
        default_user = config.default_user,
        pretty = config.pretty,
        input = ?cli.input,
        "basket starting"
    );

    let registry = CartRegistry::new();
    let reader = open_input(cli.input.as_ref())?;
    let stdout = io::stdout();

    session::run_session(&registry, &config, reader, stdout.lock())?;
    Ok(())
}

/// Initializes tracing to stderr so stdout carries only responses.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=basket_core=trace` - Show totals as they are computed
/// - Default: the configured filter
fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_input(path: Option<&PathBuf>) -> anyhow::Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

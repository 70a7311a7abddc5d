//! # CLI Configuration
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, then overridden by command-line flags.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--user`, `--pretty`, `--log`)
//! 2. Environment variables (`BASKET_*`)
//! 3. Defaults (this file)
//!
//! `RUST_LOG`, when set, still wins over the configured log filter.

use std::env;

use basket_core::UserId;

use crate::Cli;

/// Filter used when neither `BASKET_LOG` nor `--log` is given.
pub const DEFAULT_LOG_FILTER: &str = "info,basket_core=debug,basket_cli=debug";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// User id for commands that don't carry one
    pub default_user: UserId,

    /// `tracing` filter directives
    pub log_filter: String,

    /// Pretty-print responses (multi-line; not JSON-lines safe)
    pub pretty: bool,
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(CliConfig {
            default_user: lookup("BASKET_DEFAULT_USER")
                .unwrap_or_else(|| "1".to_string())
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BASKET_DEFAULT_USER".to_string()))?,

            log_filter: lookup("BASKET_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),

            pretty: lookup("BASKET_PRETTY")
                .unwrap_or_else(|| "false".to_string())
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BASKET_PRETTY".to_string()))?,
        })
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(user) = cli.user {
            self.default_user = user;
        }
        if let Some(filter) = &cli.log {
            self.log_filter = filter.clone();
        }
        if cli.pretty {
            self.pretty = true;
        }
        self
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            default_user: 1,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            pretty: false,
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

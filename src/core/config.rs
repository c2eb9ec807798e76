//! Environment-driven configuration
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Make the interactive wait deadlines tunable
//! - 1.0.0: Initial implementation

use anyhow::{Context, Result};
use std::time::Duration;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub command_prefix: String,
    pub settings_path: String,
    pub log_level: String,
    pub confirm_timeout_secs: u64,
    pub prompt_timeout_secs: u64,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// Only `DISCORD_TOKEN` is required; everything else has a default.
    pub fn from_env() -> Result<Self> {
        let discord_token = std::env::var("DISCORD_TOKEN")
            .context("DISCORD_TOKEN must be set (see .env.example)")?;

        Ok(Self {
            discord_token,
            command_prefix: env_or("COMMAND_PREFIX", "!"),
            settings_path: env_or("SETTINGS_PATH", "settings.json"),
            log_level: env_or("LOG_LEVEL", "info"),
            confirm_timeout_secs: parse_env_or("CONFIRM_TIMEOUT_SECS", 20)?,
            prompt_timeout_secs: parse_env_or("PROMPT_TIMEOUT_SECS", 60)?,
        })
    }

    /// Deadline for the delete confirmation reply.
    pub fn confirm_timeout(&self) -> Duration {
        Duration::from_secs(self.confirm_timeout_secs)
    }

    /// Deadline for the interactive content prompt reply.
    pub fn prompt_timeout(&self) -> Duration {
        Duration::from_secs(self.prompt_timeout_secs)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env_or(key: &str, default: u64) -> Result<u64> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{key} must be a number of seconds, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

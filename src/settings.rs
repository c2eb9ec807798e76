//! Per-server settings, consumed read-only
//!
//! The pipeline only needs one piece of persisted configuration: which role
//! is allowed to manage messages in a server. The store behind that lookup is
//! external; the shipped implementation reads a JSON file at startup.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation

use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;
use std::collections::HashMap;

use crate::core::CommandError;

/// Read-only view of per-server settings.
pub trait SettingsStore: Send + Sync {
    /// The manage role configured for a server, if any.
    fn manage_role(&self, guild_id: u64) -> Result<Option<u64>, CommandError>;
}

#[derive(Debug, Clone, Deserialize)]
struct GuildSettings {
    manage_role: Option<u64>,
}

/// Settings loaded from a JSON file mapping guild ids to their settings:
///
/// ```json
/// { "81384788765712384": { "manage_role": 175643578071121920 } }
/// ```
#[derive(Debug, Default)]
pub struct JsonSettingsStore {
    guilds: HashMap<String, GuildSettings>,
}

impl JsonSettingsStore {
    /// Load settings from `path`. A missing file is tolerated (every server
    /// is simply unconfigured); malformed JSON is a startup error.
    pub fn load(path: &str) -> Result<Self> {
        if !std::path::Path::new(path).exists() {
            info!("No settings file found at {path}, starting unconfigured");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {path}"))?;
        let store = Self::from_str(&raw)
            .with_context(|| format!("failed to parse settings file {path}"))?;
        info!("Loaded settings for {} guilds from {path}", store.guilds.len());
        Ok(store)
    }

    fn from_str(raw: &str) -> Result<Self> {
        let guilds = serde_json::from_str(raw)?;
        Ok(Self { guilds })
    }
}

impl SettingsStore for JsonSettingsStore {
    fn manage_role(&self, guild_id: u64) -> Result<Option<u64>, CommandError> {
        Ok(self
            .guilds
            .get(&guild_id.to_string())
            .and_then(|settings| settings.manage_role))
    }
}

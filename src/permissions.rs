//! Permission gate
//!
//! Whether an invocation may run at all, decided before any argument is
//! resolved. The predicate is a seam: commands never ask the platform about
//! roles themselves.

use std::sync::Arc;

use crate::commands::Invocation;
use crate::core::CommandError;
use crate::settings::SettingsStore;

/// Decides whether an invocation may proceed.
pub trait PermissionGate: Send + Sync {
    fn can_invoke(&self, invocation: &Invocation) -> Result<(), CommandError>;
}

/// Admits members holding the server's configured manage role.
pub struct ManageRoleGate {
    settings: Arc<dyn SettingsStore>,
}

impl ManageRoleGate {
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self { settings }
    }
}

impl PermissionGate for ManageRoleGate {
    fn can_invoke(&self, invocation: &Invocation) -> Result<(), CommandError> {
        let role = self
            .settings
            .manage_role(invocation.guild_id)?
            .ok_or_else(|| {
                CommandError::ConfigNotSet(
                    "No manage role has been configured for this server.".to_string(),
                )
            })?;

        if invocation.author_roles.contains(&role) {
            Ok(())
        } else {
            Err(CommandError::MissingPermission)
        }
    }
}

/// Admits everyone. For development setups without a settings file.
pub struct OpenGate;

impl PermissionGate for OpenGate {
    fn can_invoke(&self, _invocation: &Invocation) -> Result<(), CommandError> {
        Ok(())
    }
}

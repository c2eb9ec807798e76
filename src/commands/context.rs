//! Shared context for command handlers
//!
//! Every capability a command may use is carried here explicitly: the chat
//! gateway, the permission gate, and the deadlines for the two interactive
//! waits. There is no ambient bot state.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation

use std::sync::Arc;
use std::time::Duration;

use crate::gateway::ChatGateway;
use crate::permissions::PermissionGate;

/// Default deadline for the delete confirmation reply.
pub const DEFAULT_CONFIRM_TIMEOUT: Duration = Duration::from_secs(20);
/// Default deadline for the interactive content prompt.
pub const DEFAULT_PROMPT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct CommandContext {
    pub gateway: Arc<dyn ChatGateway>,
    pub gate: Arc<dyn PermissionGate>,
    pub confirm_timeout: Duration,
    pub prompt_timeout: Duration,
}

impl CommandContext {
    pub fn new(gateway: Arc<dyn ChatGateway>, gate: Arc<dyn PermissionGate>) -> Self {
        Self {
            gateway,
            gate,
            confirm_timeout: DEFAULT_CONFIRM_TIMEOUT,
            prompt_timeout: DEFAULT_PROMPT_TIMEOUT,
        }
    }

    pub fn with_timeouts(mut self, confirm: Duration, prompt: Duration) -> Self {
        self.confirm_timeout = confirm;
        self.prompt_timeout = prompt;
        self
    }
}

//! Command handler trait
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation

use async_trait::async_trait;
use std::sync::Arc;

use super::context::CommandContext;
use super::invocation::Invocation;
use crate::core::CommandError;

/// Trait for message command handlers
///
/// Each handler implements this trait to process one or more commands.
/// Handlers are registered with a [`CommandRegistry`][super::CommandRegistry]
/// and dispatched based on command name. Handlers return the classified
/// error; only the dispatcher turns errors into user-facing text.
///
/// # Example
///
/// ```ignore
/// pub struct PingCommand;
///
/// #[async_trait]
/// impl MessageCommand for PingCommand {
///     fn command_names(&self) -> &'static [&'static str] {
///         &["ping"]
///     }
///
///     async fn run(
///         &self,
///         ctx: Arc<CommandContext>,
///         invocation: &Invocation,
///     ) -> Result<(), CommandError> {
///         // Handle ping command
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait MessageCommand: Send + Sync {
    /// Command name(s) this handler processes
    ///
    /// A handler can process multiple commands if they share logic.
    fn command_names(&self) -> &'static [&'static str];

    /// Execute the command for one invocation.
    async fn run(
        &self,
        ctx: Arc<CommandContext>,
        invocation: &Invocation,
    ) -> Result<(), CommandError>;
}

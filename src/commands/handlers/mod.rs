//! Per-command handler implementations
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Share the invoking-message preamble and id splitting
//! - 1.0.0: Initial implementation with send, edit, delete, fetch

pub mod delete;
pub mod edit;
pub mod fetch;
pub mod send;

use log::debug;
use std::sync::Arc;

use super::context::CommandContext;
use super::handler::MessageCommand;
use super::invocation::Invocation;

/// Create all registered command handlers
///
/// Returns a vector of handlers ready to be registered with CommandRegistry.
pub fn create_all_handlers() -> Vec<Arc<dyn MessageCommand>> {
    vec![
        Arc::new(send::SendCommand),
        Arc::new(edit::EditCommand),
        Arc::new(delete::DeleteCommand),
        Arc::new(fetch::FetchCommand),
    ]
}

/// Best-effort removal of the invoking command message. A refusal (e.g. the
/// bot cannot manage messages) never aborts the command.
pub(crate) async fn discard_invocation(ctx: &CommandContext, invocation: &Invocation) {
    if let Err(err) = ctx
        .gateway
        .delete_message(invocation.channel_id, invocation.message_id)
        .await
    {
        debug!(
            "[{}] Could not remove the invoking message: {err}",
            invocation.request_id
        );
    }
}

/// Assign leading ids right-aligned onto the `[channel_id] <message_id>`
/// slots: a single id is the message id, two ids are channel then message.
pub(crate) fn split_channel_message(ids: &[u64]) -> (Option<u64>, Option<u64>) {
    match *ids {
        [channel_id, message_id, ..] => (Some(channel_id), Some(message_id)),
        [message_id] => (None, Some(message_id)),
        [] => (None, None),
    }
}

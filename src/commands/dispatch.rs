//! Dispatcher and central failure handling
//!
//! The single place where a raised [`CommandError`] becomes user
//! communication. Recognized kinds are shown verbatim and end the command
//! cleanly; anything unrecognized is shown a generic message and re-raised so
//! the hosting event loop can log it.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation

use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;

use super::context::CommandContext;
use super::invocation::Invocation;
use super::registry::CommandRegistry;
use crate::core::CommandError;

/// Run one invocation end to end: permission gate, handler, disposition.
///
/// Returns `Err` only for escalating failures; everything else has already
/// been reported to the invoking channel.
pub async fn dispatch(
    ctx: &Arc<CommandContext>,
    registry: &CommandRegistry,
    invocation: &Invocation,
) -> Result<()> {
    let Some(handler) = registry.get(&invocation.command) else {
        return Ok(());
    };

    info!(
        "[{}] '{}' invoked by {} in guild {} channel {}",
        invocation.request_id,
        invocation.command,
        invocation.author_id,
        invocation.guild_id,
        invocation.channel_id
    );

    let outcome = match ctx.gate.can_invoke(invocation) {
        Ok(()) => handler.run(Arc::clone(ctx), invocation).await,
        Err(err) => Err(err),
    };

    match outcome {
        Ok(()) => {
            info!("[{}] '{}' completed", invocation.request_id, invocation.command);
            Ok(())
        }
        Err(err) => report_failure(ctx, invocation, err).await,
    }
}

async fn report_failure(
    ctx: &CommandContext,
    invocation: &Invocation,
    err: CommandError,
) -> Result<()> {
    let disposition = err.disposition();
    warn!(
        "[{}] '{}' failed ({}): {err}",
        invocation.request_id,
        invocation.command,
        err.kind()
    );

    if let Err(send_err) = ctx
        .gateway
        .send_text(invocation.channel_id, &disposition.user_message)
        .await
    {
        warn!(
            "[{}] Could not deliver failure notice: {send_err}",
            invocation.request_id
        );
    }

    if disposition.escalate {
        Err(anyhow::Error::new(err))
    } else {
        Ok(())
    }
}

//! Send command handler
//!
//! Handles: send
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation

use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use super::discard_invocation;
use crate::commands::context::CommandContext;
use crate::commands::feedback::{self, FeedbackAction, FeedbackRecord};
use crate::commands::handler::MessageCommand;
use crate::commands::invocation::Invocation;
use crate::commands::resolver::{resolve_channel, resolve_content, validate_same_guild};
use crate::core::CommandError;

/// `send [channel_id] <content>` — post content as the bot.
pub struct SendCommand;

#[async_trait]
impl MessageCommand for SendCommand {
    fn command_names(&self) -> &'static [&'static str] {
        &["send"]
    }

    async fn run(
        &self,
        ctx: Arc<CommandContext>,
        invocation: &Invocation,
    ) -> Result<(), CommandError> {
        discard_invocation(&ctx, invocation).await;

        let (ids, rest) = invocation.leading_ids(1);
        let channel = resolve_channel(ids.first().copied(), &ctx, invocation).await?;
        validate_same_guild(&channel, invocation)?;

        let content = resolve_content(Invocation::content_arg(rest), &ctx, invocation).await?;

        let message = ctx.gateway.send_text(channel.id, &content).await?;
        info!(
            "[{}] Posted message {} in channel {}",
            invocation.request_id, message.id, channel.id
        );

        feedback::emit(
            &ctx,
            invocation,
            FeedbackRecord {
                action: FeedbackAction::Send,
                actor_id: invocation.author_id,
                content: &content,
                target: &message,
            },
        )
        .await;

        Ok(())
    }
}

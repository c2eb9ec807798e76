//! Delete command handler
//!
//! Handles: delete
//!
//! The only destructive command, gated behind an explicit confirmation. On a
//! confirmed delete the confirming reply, the target, and the prompt are
//! removed in that order; a refusal part-way through is surfaced without
//! undoing what already happened.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation

use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

use super::{discard_invocation, split_channel_message};
use crate::commands::confirm::{ConfirmationOutcome, ConfirmationRequest};
use crate::commands::context::CommandContext;
use crate::commands::feedback::{self, FeedbackAction, FeedbackRecord};
use crate::commands::handler::MessageCommand;
use crate::commands::invocation::Invocation;
use crate::commands::resolver::{resolve_channel, resolve_message, validate_same_guild};
use crate::core::{CommandError, Report, COLOR_DANGER};

/// `delete [channel_id] <message_id>` — remove a bot message, after asking.
pub struct DeleteCommand;

#[async_trait]
impl MessageCommand for DeleteCommand {
    fn command_names(&self) -> &'static [&'static str] {
        &["delete"]
    }

    async fn run(
        &self,
        ctx: Arc<CommandContext>,
        invocation: &Invocation,
    ) -> Result<(), CommandError> {
        discard_invocation(&ctx, invocation).await;

        let (ids, _rest) = invocation.leading_ids(2);
        let (channel_id, message_id) = split_channel_message(&ids);

        let channel = resolve_channel(channel_id, &ctx, invocation).await?;
        validate_same_guild(&channel, invocation)?;
        let target = resolve_message(message_id, &ctx, &channel).await?;

        let request = ConfirmationRequest::open(&ctx, invocation, &channel, &target).await?;
        let (prompt, outcome) = request.await_outcome(&ctx).await?;

        match outcome {
            ConfirmationOutcome::Confirmed { reply } => {
                ctx.gateway
                    .delete_message(reply.channel_id, reply.id)
                    .await?;
                ctx.gateway.delete_message(channel.id, target.id).await?;
                ctx.gateway
                    .delete_message(prompt.channel_id, prompt.id)
                    .await?;
                info!(
                    "[{}] Deleted message {} in channel {}",
                    invocation.request_id, target.id, channel.id
                );

                feedback::emit(
                    &ctx,
                    invocation,
                    FeedbackRecord {
                        action: FeedbackAction::Delete,
                        actor_id: invocation.author_id,
                        content: &target.content,
                        target: &target,
                    },
                )
                .await;
                Ok(())
            }
            ConfirmationOutcome::Declined { .. } => {
                let notice = Report::new("Message deletion cancelled.", COLOR_DANGER).field(
                    "Outcome",
                    format!(
                        "<@{}> chose not to delete the message.",
                        invocation.author_id
                    ),
                    false,
                );
                if let Err(err) = ctx
                    .gateway
                    .send_report(invocation.channel_id, &notice)
                    .await
                {
                    warn!(
                        "[{}] Could not deliver cancellation notice: {err}",
                        invocation.request_id
                    );
                }
                Ok(())
            }
            ConfirmationOutcome::TimedOut => Err(CommandError::Timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::gateway::MockGateway;
    use crate::permissions::OpenGate;

    fn invocation() -> Invocation {
        Invocation::new(
            42,
            vec![],
            100,
            10,
            1,
            "delete".to_string(),
            " 123 456".to_string(),
        )
    }

    fn gateway_with_target() -> Arc<MockGateway> {
        let gateway = Arc::new(MockGateway::new());
        gateway.add_channel(123, Some(100));
        gateway.add_message(123, 456, 0, "original words");
        gateway
    }

    fn context(gateway: &Arc<MockGateway>) -> Arc<CommandContext> {
        Arc::new(CommandContext::new(Arc::clone(gateway), Arc::new(OpenGate)))
    }

    #[tokio::test]
    async fn test_confirmed_delete_removes_reply_target_and_prompt() {
        let gateway = gateway_with_target();
        let reply_id = gateway.queue_reply(10, 42, "yes");
        let ctx = context(&gateway);

        DeleteCommand.run(ctx, &invocation()).await.unwrap();

        let deletions = gateway.deletions();
        // Invoking message, confirming reply, target, prompt — in order.
        assert_eq!(deletions[0], (10, 1));
        assert_eq!(deletions[1], (10, reply_id));
        assert_eq!(deletions[2], (123, 456));
        assert_eq!(deletions[3].0, 10);
        assert_eq!(deletions.len(), 4);

        // Feedback carries the content captured before removal.
        let reports = gateway.reports();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[1].1.title, "Message deleted");
        assert_eq!(reports[1].1.fields[2].value, "original words");
    }

    #[tokio::test]
    async fn test_declined_delete_removes_nothing_and_notifies() {
        let gateway = gateway_with_target();
        gateway.queue_reply(10, 42, "no");
        let ctx = context(&gateway);

        DeleteCommand.run(ctx, &invocation()).await.unwrap();

        // Only the invoking message was removed.
        assert_eq!(gateway.deletions(), vec![(10, 1)]);
        assert!(gateway.message(123, 456).await.is_ok());

        let reports = gateway.reports();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[1].1.title, "Message deletion cancelled.");
        assert!(reports[1].1.fields[0].value.contains("<@42>"));
    }

    #[tokio::test]
    async fn test_timed_out_delete_surfaces_timeout() {
        let gateway = gateway_with_target();
        let ctx = context(&gateway);

        let err = DeleteCommand.run(ctx, &invocation()).await.unwrap_err();
        assert!(matches!(err, CommandError::Timeout));

        assert_eq!(gateway.deletions(), vec![(10, 1)]);
        assert!(gateway.message(123, 456).await.is_ok());
    }

    #[tokio::test]
    async fn test_refused_deletion_surfaces_content_error_without_rollback() {
        let gateway = gateway_with_target();
        gateway.queue_reply(10, 42, "yes");
        gateway.refuse_deletions();
        let ctx = context(&gateway);

        let err = DeleteCommand.run(ctx, &invocation()).await.unwrap_err();
        assert!(matches!(err, CommandError::Content(_)));

        // Nothing was recorded as deleted, and no success feedback went out.
        assert!(gateway.deletions().is_empty());
        let reports = gateway.reports();
        assert_eq!(reports.len(), 1, "only the confirmation prompt");
    }

    #[tokio::test]
    async fn test_delete_rejects_foreign_channel_before_prompting() {
        let gateway = Arc::new(MockGateway::new());
        gateway.add_channel(123, Some(200));
        gateway.add_message(123, 456, 0, "original words");
        let ctx = context(&gateway);

        let err = DeleteCommand.run(ctx, &invocation()).await.unwrap_err();
        assert!(matches!(err, CommandError::DifferentServer));

        // No prompt, no removals beyond the invoking message.
        assert!(gateway.reports().is_empty());
        assert_eq!(gateway.deletions(), vec![(10, 1)]);
    }

    #[tokio::test]
    async fn test_delete_requires_message_id() {
        let gateway = Arc::new(MockGateway::new());
        let ctx = context(&gateway);
        let inv = Invocation::new(
            42,
            vec![],
            100,
            10,
            1,
            "delete".to_string(),
            String::new(),
        );

        let err = DeleteCommand.run(ctx, &inv).await.unwrap_err();
        assert!(matches!(err, CommandError::Content(_)));
    }
}

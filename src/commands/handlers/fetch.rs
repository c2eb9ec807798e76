//! Fetch command handler
//!
//! Handles: fetch
//!
//! Read-only: reports a message's content back to the invoking channel and
//! never touches the target.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation

use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use super::{discard_invocation, split_channel_message};
use crate::commands::context::CommandContext;
use crate::commands::feedback::{self, FeedbackAction, FeedbackRecord};
use crate::commands::handler::MessageCommand;
use crate::commands::invocation::Invocation;
use crate::commands::resolver::{resolve_channel, resolve_message, validate_same_guild};
use crate::core::CommandError;

/// `fetch [channel_id] <message_id>` — report a message's content.
pub struct FetchCommand;

#[async_trait]
impl MessageCommand for FetchCommand {
    fn command_names(&self) -> &'static [&'static str] {
        &["fetch"]
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

        info!(
            "[{}] Fetched message {} from channel {}",
            invocation.request_id, target.id, channel.id
        );

        feedback::emit(
            &ctx,
            invocation,
            FeedbackRecord {
                action: FeedbackAction::Fetch,
                actor_id: invocation.author_id,
                content: &target.content,
                target: &target,
            },
        )
        .await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::gateway::MockGateway;
    use crate::permissions::OpenGate;

    fn invocation(rest: &str) -> Invocation {
        Invocation::new(
            42,
            vec![],
            100,
            10,
            1,
            "fetch".to_string(),
            rest.to_string(),
        )
    }

    fn context(gateway: &Arc<MockGateway>) -> Arc<CommandContext> {
        Arc::new(CommandContext::new(Arc::clone(gateway), Arc::new(OpenGate)))
    }

    #[tokio::test]
    async fn test_fetch_reports_message_content() {
        let gateway = Arc::new(MockGateway::new());
        gateway.add_channel(123, Some(100));
        gateway.add_message(123, 456, 0, "stored words");
        let ctx = context(&gateway);

        FetchCommand
            .run(ctx, &invocation(" 123 456"))
            .await
            .unwrap();

        let reports = gateway.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].0, 10);
        assert_eq!(reports[0].1.title, "Message fetched");
        assert_eq!(reports[0].1.fields[2].value, "stored words");
    }

    #[tokio::test]
    async fn test_fetch_leaves_target_untouched() {
        let gateway = Arc::new(MockGateway::new());
        gateway.add_channel(123, Some(100));
        gateway.add_message(123, 456, 0, "stored words");
        let ctx = context(&gateway);

        FetchCommand
            .run(ctx, &invocation(" 123 456"))
            .await
            .unwrap();

        assert!(gateway.edits().is_empty());
        // Only the invoking message was removed.
        assert_eq!(gateway.deletions(), vec![(10, 1)]);
        let target = gateway.message(123, 456).await.unwrap();
        assert_eq!(target.content, "stored words");
    }

    #[tokio::test]
    async fn test_fetch_rejects_foreign_channel() {
        let gateway = Arc::new(MockGateway::new());
        gateway.add_channel(123, Some(200));
        gateway.add_message(123, 456, 0, "stored words");
        let ctx = context(&gateway);

        let err = FetchCommand
            .run(ctx, &invocation(" 123 456"))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::DifferentServer));
        assert!(gateway.reports().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_missing_message() {
        let gateway = Arc::new(MockGateway::new());
        let ctx = context(&gateway);

        let err = FetchCommand
            .run(ctx, &invocation(" 456"))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::NotFound(_)));
        assert!(gateway.reports().is_empty());
    }
}

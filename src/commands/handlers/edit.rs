//! Edit command handler
//!
//! Handles: edit
//!
//! The feedback report is emitted before the edit is applied, so it reflects
//! the new content.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation

use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use super::split_channel_message;
use crate::commands::context::CommandContext;
use crate::commands::feedback::{self, FeedbackAction, FeedbackRecord};
use crate::commands::handler::MessageCommand;
use crate::commands::invocation::Invocation;
use crate::commands::resolver::{
    resolve_channel, resolve_content, resolve_message, validate_same_guild,
};
use crate::core::CommandError;

/// `edit [channel_id] <message_id> <content>` — rewrite a bot message.
pub struct EditCommand;

#[async_trait]
impl MessageCommand for EditCommand {
    fn command_names(&self) -> &'static [&'static str] {
        &["edit"]
    }

    async fn run(
        &self,
        ctx: Arc<CommandContext>,
        invocation: &Invocation,
    ) -> Result<(), CommandError> {
        let (ids, rest) = invocation.leading_ids(2);
        let (channel_id, message_id) = split_channel_message(&ids);

        let channel = resolve_channel(channel_id, &ctx, invocation).await?;
        validate_same_guild(&channel, invocation)?;
        let target = resolve_message(message_id, &ctx, &channel).await?;

        let content = resolve_content(Invocation::content_arg(rest), &ctx, invocation).await?;

        feedback::emit(
            &ctx,
            invocation,
            FeedbackRecord {
                action: FeedbackAction::Edit,
                actor_id: invocation.author_id,
                content: &content,
                target: &target,
            },
        )
        .await;

        ctx.gateway.edit_text(channel.id, target.id, &content).await?;
        info!(
            "[{}] Edited message {} in channel {}",
            invocation.request_id, target.id, channel.id
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::gateway::{MockGateway, MockOp};
    use crate::permissions::OpenGate;

    fn invocation(rest: &str) -> Invocation {
        Invocation::new(
            42,
            vec![],
            100,
            10,
            1,
            "edit".to_string(),
            rest.to_string(),
        )
    }

    fn context(gateway: &Arc<MockGateway>) -> Arc<CommandContext> {
        Arc::new(CommandContext::new(Arc::clone(gateway), Arc::new(OpenGate)))
    }

    #[tokio::test]
    async fn test_edit_applies_stripped_content() {
        let gateway = Arc::new(MockGateway::new());
        gateway.add_channel(123, Some(100));
        gateway.add_message(123, 456, 0, "old");
        let ctx = context(&gateway);

        EditCommand
            .run(ctx, &invocation(" 123 456 ```new```"))
            .await
            .unwrap();

        assert_eq!(gateway.edits(), vec![(123, 456, "new".to_string())]);
        let target = gateway.message(123, 456).await.unwrap();
        assert_eq!(target.content, "new");
    }

    #[tokio::test]
    async fn test_edit_reports_before_applying() {
        let gateway = Arc::new(MockGateway::new());
        gateway.add_channel(123, Some(100));
        gateway.add_message(123, 456, 0, "old");
        let ctx = context(&gateway);

        EditCommand
            .run(ctx, &invocation(" 123 456 new text"))
            .await
            .unwrap();

        let journal = gateway.journal();
        let report_at = journal
            .iter()
            .position(|op| matches!(op, MockOp::SendReport { .. }))
            .unwrap();
        let edit_at = journal
            .iter()
            .position(|op| matches!(op, MockOp::EditText { .. }))
            .unwrap();
        assert!(report_at < edit_at);

        let reports = gateway.reports();
        assert_eq!(reports[0].1.title, "Message edited");
        // The report already shows the new content.
        assert_eq!(reports[0].1.fields[2].value, " new text");
    }

    #[tokio::test]
    async fn test_edit_missing_message_never_reports_or_edits() {
        let gateway = Arc::new(MockGateway::new());
        gateway.add_channel(123, Some(100));
        let ctx = context(&gateway);

        let err = EditCommand
            .run(ctx, &invocation(" 123 456 newtext"))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::NotFound(_)));

        assert!(gateway.reports().is_empty());
        assert!(gateway.edits().is_empty());
    }

    #[tokio::test]
    async fn test_edit_requires_message_id() {
        let gateway = Arc::new(MockGateway::new());
        let ctx = context(&gateway);

        let err = EditCommand.run(ctx, &invocation(" ")).await.unwrap_err();
        assert!(matches!(err, CommandError::Content(_)));
    }

    #[tokio::test]
    async fn test_edit_single_id_targets_invocation_channel() {
        let gateway = Arc::new(MockGateway::new());
        gateway.add_message(10, 456, 0, "old");
        let ctx = context(&gateway);

        EditCommand
            .run(ctx, &invocation(" 456 fresh"))
            .await
            .unwrap();

        assert_eq!(gateway.edits(), vec![(10, 456, " fresh".to_string())]);
    }

    #[tokio::test]
    async fn test_edit_rejects_foreign_channel_before_lookup() {
        let gateway = Arc::new(MockGateway::new());
        gateway.add_channel(123, Some(200));
        gateway.add_message(123, 456, 0, "old");
        let ctx = context(&gateway);

        let err = EditCommand
            .run(ctx, &invocation(" 123 456 new"))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::DifferentServer));
        assert!(gateway.journal().is_empty());
    }
}

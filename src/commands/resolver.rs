//! Argument resolver
//!
//! Turns raw, possibly-omitted arguments into concrete targets: a channel
//! (falling back to the invocation channel), a message (mandatory where
//! used), and content (prompted for interactively when omitted). Channel
//! ownership is validated here too, immediately after resolution.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation

use log::debug;

use super::context::CommandContext;
use super::invocation::Invocation;
use crate::core::CommandError;
use crate::gateway::{ChannelRef, GatewayError, MessageRef, Wait};

const CONTENT_PROMPT: &str = "What would you like the message content to be?";

/// Resolve an optional channel id, defaulting to the invocation channel.
pub async fn resolve_channel(
    raw: Option<u64>,
    ctx: &CommandContext,
    invocation: &Invocation,
) -> Result<ChannelRef, CommandError> {
    match raw {
        Some(id) => ctx.gateway.channel(id).await.map_err(|err| match err {
            GatewayError::NotFound => {
                CommandError::NotFound(format!("No channel with id {id} could be found."))
            }
            other => other.into(),
        }),
        None => Ok(ChannelRef {
            id: invocation.channel_id,
            guild_id: Some(invocation.guild_id),
        }),
    }
}

/// Reject channels owned by a different server than the invocation.
///
/// Runs right after channel resolution, before anything mutates.
pub fn validate_same_guild(
    channel: &ChannelRef,
    invocation: &Invocation,
) -> Result<(), CommandError> {
    if channel.guild_id == Some(invocation.guild_id) {
        Ok(())
    } else {
        Err(CommandError::DifferentServer)
    }
}

/// Resolve a mandatory message id within an already-resolved channel.
pub async fn resolve_message(
    raw: Option<u64>,
    ctx: &CommandContext,
    channel: &ChannelRef,
) -> Result<MessageRef, CommandError> {
    let id = raw.ok_or_else(|| {
        CommandError::Content("A message id is required for this command.".to_string())
    })?;
    ctx.gateway
        .message(channel.id, id)
        .await
        .map_err(|err| match err {
            GatewayError::NotFound => CommandError::NotFound(format!(
                "No message with id {id} could be found in {}.",
                channel.mention()
            )),
            other => other.into(),
        })
}

/// Resolve content, prompting the invoking author when it was omitted.
///
/// The prompt wait is bounded by the context's prompt deadline; silence is a
/// timeout. Both raw and prompted content pass through the fence rule.
pub async fn resolve_content(
    raw: Option<&str>,
    ctx: &CommandContext,
    invocation: &Invocation,
) -> Result<String, CommandError> {
    let text = match raw {
        Some(text) => text.to_string(),
        None => {
            debug!(
                "[{}] No content given, prompting {} in channel {}",
                invocation.request_id, invocation.author_id, invocation.channel_id
            );
            ctx.gateway
                .send_text(invocation.channel_id, CONTENT_PROMPT)
                .await?;
            let wait = ctx
                .gateway
                .next_reply(
                    invocation.channel_id,
                    invocation.author_id,
                    ctx.prompt_timeout,
                )
                .await?;
            match wait {
                Wait::Completed(reply) => reply.content,
                Wait::TimedOut => return Err(CommandError::Timeout),
            }
        }
    };
    Ok(strip_code_fence(&text).to_string())
}

/// Drop one enclosing code-block wrapper, at most once.
///
/// Fires when bytes 1..4 are a fence and the text ends with one; the first
/// byte is the separator the argument grammar preserves. The stripped region
/// is the first 4 and last 3 bytes, never applied recursively.
pub fn strip_code_fence(content: &str) -> &str {
    if content.len() >= 7 && content.get(1..4) == Some("```") && content.ends_with("```") {
        &content[4..content.len() - 3]
    } else {
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    use crate::commands::context::CommandContext;
    use crate::gateway::MockGateway;
    use crate::permissions::OpenGate;

    fn invocation() -> Invocation {
        Invocation::new(42, vec![], 100, 10, 1, "send".to_string(), String::new())
    }

    fn context(gateway: Arc<MockGateway>) -> CommandContext {
        CommandContext::new(gateway, Arc::new(OpenGate))
    }

    #[test]
    fn test_fence_stripped_from_padded_content() {
        assert_eq!(strip_code_fence(" ```hi```"), "hi");
    }

    #[test]
    fn test_fence_strip_applied_once() {
        assert_eq!(strip_code_fence(" ```a```b```"), "a```b");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(strip_code_fence(" hi"), " hi");
        assert_eq!(strip_code_fence("hi"), "hi");
    }

    #[test]
    fn test_unpadded_fence_kept_verbatim() {
        // The rule reads bytes 1..4, so a reply starting directly with a
        // fence does not match.
        assert_eq!(strip_code_fence("```hi```"), "```hi```");
    }

    #[test]
    fn test_fence_with_empty_body() {
        assert_eq!(strip_code_fence(" ``````"), "");
    }

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(strip_code_fence(" ```"), " ```");
        assert_eq!(strip_code_fence(""), "");
    }

    #[test]
    fn test_multibyte_first_char_unchanged() {
        // Byte 1 is mid-character here; the rule must not panic.
        assert_eq!(strip_code_fence("é```x```"), "é```x```");
    }

    #[tokio::test]
    async fn test_resolve_channel_falls_back_to_invocation_channel() {
        let gateway = Arc::new(MockGateway::new());
        let ctx = context(gateway);
        let inv = invocation();

        let channel = resolve_channel(None, &ctx, &inv).await.unwrap();
        assert_eq!(channel.id, 10);
        assert_eq!(channel.guild_id, Some(100));
    }

    #[tokio::test]
    async fn test_resolve_channel_unknown_id() {
        let gateway = Arc::new(MockGateway::new());
        let ctx = context(gateway);
        let inv = invocation();

        let err = resolve_channel(Some(999), &ctx, &inv).await.unwrap_err();
        assert!(matches!(err, CommandError::NotFound(_)));
        assert!(err.to_string().contains("999"));
    }

    #[tokio::test]
    async fn test_validate_same_guild() {
        let inv = invocation();
        let same = ChannelRef {
            id: 11,
            guild_id: Some(100),
        };
        let other = ChannelRef {
            id: 12,
            guild_id: Some(200),
        };
        let nowhere = ChannelRef {
            id: 13,
            guild_id: None,
        };

        assert!(validate_same_guild(&same, &inv).is_ok());
        assert!(matches!(
            validate_same_guild(&other, &inv),
            Err(CommandError::DifferentServer)
        ));
        assert!(matches!(
            validate_same_guild(&nowhere, &inv),
            Err(CommandError::DifferentServer)
        ));
    }

    #[tokio::test]
    async fn test_resolve_message_requires_id() {
        let gateway = Arc::new(MockGateway::new());
        let ctx = context(gateway);
        let channel = ChannelRef {
            id: 10,
            guild_id: Some(100),
        };

        let err = resolve_message(None, &ctx, &channel).await.unwrap_err();
        assert!(matches!(err, CommandError::Content(_)));
        assert!(err.to_string().contains("message id"));
    }

    #[tokio::test]
    async fn test_resolve_message_unknown_id() {
        let gateway = Arc::new(MockGateway::new());
        gateway.add_channel(10, Some(100));
        let ctx = context(gateway);
        let channel = ChannelRef {
            id: 10,
            guild_id: Some(100),
        };

        let err = resolve_message(Some(5), &ctx, &channel).await.unwrap_err();
        assert!(matches!(err, CommandError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_resolve_content_passes_raw_through_fence_rule() {
        let gateway = Arc::new(MockGateway::new());
        let ctx = context(Arc::clone(&gateway));
        let inv = invocation();

        let content = resolve_content(Some(" ```hi```"), &ctx, &inv).await.unwrap();
        assert_eq!(content, "hi");
        // No prompt was needed.
        assert!(gateway.sent_texts().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_content_prompts_when_omitted() {
        let gateway = Arc::new(MockGateway::new());
        gateway.queue_reply(10, 42, "the reply");
        let ctx = context(Arc::clone(&gateway));
        let inv = invocation();

        let content = resolve_content(None, &ctx, &inv).await.unwrap();
        assert_eq!(content, "the reply");

        let texts = gateway.sent_texts();
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].0, 10);
        assert!(texts[0].1.contains("content"));
    }

    #[tokio::test]
    async fn test_resolve_content_prompt_timeout() {
        let gateway = Arc::new(MockGateway::new());
        let ctx = context(gateway);
        let inv = invocation();

        let err = resolve_content(None, &ctx, &inv).await.unwrap_err();
        assert!(matches!(err, CommandError::Timeout));
    }
}

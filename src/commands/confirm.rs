//! Confirmation flow for destructive actions
//!
//! A single-use prompt-and-wait: the request is opened by sending a prompt
//! describing the target, then consumed by awaiting the invoking author's
//! reply. Exactly one outcome is ever produced; reuse is impossible because
//! awaiting takes the request by value.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation

use std::time::Duration;

use super::context::CommandContext;
use super::invocation::Invocation;
use crate::core::{CommandError, Report, COLOR_DANGER};
use crate::gateway::{ChannelRef, MessageRef, Wait};

const CONFIRM_TITLE: &str = "Are you sure you want to delete this message?";

/// Terminal outcomes of a confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    /// The author replied `yes` (case-insensitive, trimmed).
    Confirmed { reply: MessageRef },
    /// The author replied anything else.
    Declined { reply: MessageRef },
    /// No qualifying reply arrived before the deadline.
    TimedOut,
}

/// An open confirmation: prompt sent, reply pending.
pub struct ConfirmationRequest {
    prompt: MessageRef,
    responder_id: u64,
    channel_id: u64,
    deadline: Duration,
}

impl ConfirmationRequest {
    /// Send the confirmation prompt for `target` to the invocation channel.
    pub async fn open(
        ctx: &CommandContext,
        invocation: &Invocation,
        target_channel: &ChannelRef,
        target: &MessageRef,
    ) -> Result<Self, CommandError> {
        let report = Report::new(CONFIRM_TITLE, COLOR_DANGER)
            .field("Channel", target_channel.mention(), false)
            .field("Content", target.content.as_str(), false);
        let prompt = ctx
            .gateway
            .send_report(invocation.channel_id, &report)
            .await?;

        Ok(Self {
            prompt,
            responder_id: invocation.author_id,
            channel_id: invocation.channel_id,
            deadline: ctx.confirm_timeout,
        })
    }

    /// Wait for the author's decision. Consumes the request; the prompt
    /// message is handed back so the caller can remove it.
    pub async fn await_outcome(
        self,
        ctx: &CommandContext,
    ) -> Result<(MessageRef, ConfirmationOutcome), CommandError> {
        let wait = ctx
            .gateway
            .next_reply(self.channel_id, self.responder_id, self.deadline)
            .await?;

        let outcome = match wait {
            Wait::Completed(reply) => {
                if reply.content.trim().eq_ignore_ascii_case("yes") {
                    ConfirmationOutcome::Confirmed { reply }
                } else {
                    ConfirmationOutcome::Declined { reply }
                }
            }
            Wait::TimedOut => ConfirmationOutcome::TimedOut,
        };

        Ok((self.prompt, outcome))
    }
}

//! Feedback emitter
//!
//! After a command completes, a structured report of what happened is posted
//! to the invocation channel. Feedback is strictly best-effort: a report that
//! cannot be delivered is logged and dropped, never overturning the action it
//! describes.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation

use log::warn;
use std::fmt;

use super::context::CommandContext;
use super::invocation::Invocation;
use crate::core::{Report, COLOR_INFO};
use crate::gateway::MessageRef;

/// The action a feedback report describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackAction {
    Send,
    Edit,
    Delete,
    Fetch,
}

impl FeedbackAction {
    /// Report title for this action.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Send => "Message sent",
            Self::Edit => "Message edited",
            Self::Delete => "Message deleted",
            Self::Fetch => "Message fetched",
        }
    }
}

impl fmt::Display for FeedbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Send => "send",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Fetch => "fetch",
        };
        f.write_str(label)
    }
}

/// Write-once description of a completed action, rendered and discarded.
///
/// For deletions, `content` is the target's content captured before removal.
pub struct FeedbackRecord<'a> {
    pub action: FeedbackAction,
    pub actor_id: u64,
    pub content: &'a str,
    pub target: &'a MessageRef,
}

impl FeedbackRecord<'_> {
    fn to_report(&self) -> Report {
        Report::new(self.action.title(), COLOR_INFO)
            .field("Channel", format!("<#{}>", self.target.channel_id), false)
            .field("Actor", format!("<@{}>", self.actor_id), false)
            .field("Content", self.content, false)
    }
}

/// Deliver a feedback report to the invocation channel, best-effort.
pub async fn emit(ctx: &CommandContext, invocation: &Invocation, record: FeedbackRecord<'_>) {
    let report = record.to_report();
    if let Err(err) = ctx
        .gateway
        .send_report(invocation.channel_id, &report)
        .await
    {
        warn!(
            "[{}] Failed to deliver {} feedback: {err}",
            invocation.request_id, record.action
        );
    }
}

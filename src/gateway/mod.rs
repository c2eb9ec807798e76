//! # Chat Gateway
//!
//! The narrow seam between the command pipeline and the chat platform. The
//! pipeline only ever talks to [`ChatGateway`]; the serenity-backed
//! implementation lives in [`discord`], and a scripted in-memory double for
//! tests lives in [`mock`].
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation

pub mod discord;
pub mod mock;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::core::Report;

pub use discord::DiscordGateway;
pub use mock::{MockGateway, MockOp};

/// Failures at the platform boundary, before classification.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The channel or message does not exist (or is not visible to the bot).
    #[error("not found")]
    NotFound,

    /// The platform refused the action.
    #[error("forbidden")]
    Forbidden,

    /// Transport or protocol failure.
    #[error(transparent)]
    Platform(#[from] anyhow::Error),
}

/// A channel, reduced to what the pipeline needs: identity and ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRef {
    pub id: u64,
    /// `None` for channels outside any server (DMs).
    pub guild_id: Option<u64>,
}

impl ChannelRef {
    pub fn mention(&self) -> String {
        format!("<#{}>", self.id)
    }
}

/// A message, reduced to what the pipeline needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRef {
    pub id: u64,
    pub channel_id: u64,
    pub author_id: u64,
    pub content: String,
}

/// Outcome of a bounded wait: either the awaited value arrived in time, or
/// the deadline passed. Timeouts are values here, never raised failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Wait<T> {
    Completed(T),
    TimedOut,
}

/// Everything the command pipeline may ask of the chat platform.
///
/// Lookups fail with [`GatewayError::NotFound`]; mutations may fail with
/// [`GatewayError::Forbidden`]. `next_reply` is a single-shot wait for the
/// next message by `author_id` in `channel_id`, cancelled by its deadline.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    async fn channel(&self, channel_id: u64) -> Result<ChannelRef, GatewayError>;

    async fn message(&self, channel_id: u64, message_id: u64)
        -> Result<MessageRef, GatewayError>;

    async fn send_text(&self, channel_id: u64, content: &str)
        -> Result<MessageRef, GatewayError>;

    async fn send_report(&self, channel_id: u64, report: &Report)
        -> Result<MessageRef, GatewayError>;

    async fn edit_text(
        &self,
        channel_id: u64,
        message_id: u64,
        content: &str,
    ) -> Result<(), GatewayError>;

    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), GatewayError>;

    async fn next_reply(
        &self,
        channel_id: u64,
        author_id: u64,
        wait: Duration,
    ) -> Result<Wait<MessageRef>, GatewayError>;
}

//! Serenity-backed gateway implementation
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation

use async_trait::async_trait;
use serenity::collector::CollectReply;
use serenity::http::HttpError;
use serenity::model::channel::{Channel, Message};
use serenity::model::id::ChannelId;
use serenity::prelude::Context;
use std::time::Duration;

use super::{ChannelRef, ChatGateway, GatewayError, MessageRef, Wait};
use crate::core::Report;

/// [`ChatGateway`] over a live serenity connection.
///
/// One instance is built per gateway event; it is a thin wrapper around the
/// (cheaply cloneable) serenity context.
pub struct DiscordGateway {
    ctx: Context,
}

impl DiscordGateway {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl ChatGateway for DiscordGateway {
    async fn channel(&self, channel_id: u64) -> Result<ChannelRef, GatewayError> {
        match self.ctx.http.get_channel(channel_id).await {
            Ok(Channel::Guild(channel)) => Ok(ChannelRef {
                id: channel_id,
                guild_id: Some(channel.guild_id.0),
            }),
            Ok(_) => Ok(ChannelRef {
                id: channel_id,
                guild_id: None,
            }),
            Err(err) => Err(map_platform_error(err)),
        }
    }

    async fn message(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<MessageRef, GatewayError> {
        self.ctx
            .http
            .get_message(channel_id, message_id)
            .await
            .map(|msg| to_message_ref(&msg))
            .map_err(map_platform_error)
    }

    async fn send_text(&self, channel_id: u64, content: &str) -> Result<MessageRef, GatewayError> {
        ChannelId(channel_id)
            .say(&self.ctx.http, content)
            .await
            .map(|msg| to_message_ref(&msg))
            .map_err(map_platform_error)
    }

    async fn send_report(
        &self,
        channel_id: u64,
        report: &Report,
    ) -> Result<MessageRef, GatewayError> {
        ChannelId(channel_id)
            .send_message(&self.ctx.http, |m| {
                m.embed(|e| {
                    e.title(&report.title).color(report.color);
                    for field in &report.fields {
                        e.field(&field.name, &field.value, field.inline);
                    }
                    e
                })
            })
            .await
            .map(|msg| to_message_ref(&msg))
            .map_err(map_platform_error)
    }

    async fn edit_text(
        &self,
        channel_id: u64,
        message_id: u64,
        content: &str,
    ) -> Result<(), GatewayError> {
        ChannelId(channel_id)
            .edit_message(&self.ctx.http, message_id, |m| m.content(content))
            .await
            .map(|_| ())
            .map_err(map_platform_error)
    }

    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), GatewayError> {
        ChannelId(channel_id)
            .delete_message(&self.ctx.http, message_id)
            .await
            .map_err(map_platform_error)
    }

    async fn next_reply(
        &self,
        channel_id: u64,
        author_id: u64,
        wait: Duration,
    ) -> Result<Wait<MessageRef>, GatewayError> {
        let reply = CollectReply::new(&self.ctx)
            .channel_id(channel_id)
            .author_id(author_id)
            .timeout(wait)
            .await;

        Ok(match reply {
            Some(msg) => Wait::Completed(to_message_ref(&msg)),
            None => Wait::TimedOut,
        })
    }
}

fn to_message_ref(msg: &Message) -> MessageRef {
    MessageRef {
        id: msg.id.0,
        channel_id: msg.channel_id.0,
        author_id: msg.author.id.0,
        content: msg.content.clone(),
    }
}

/// Fold serenity failures into the gateway error surface; only HTTP status
/// codes carry the not-found/forbidden distinction the pipeline cares about.
fn map_platform_error(err: serenity::Error) -> GatewayError {
    let status = match &err {
        serenity::Error::Http(http) => match http.as_ref() {
            HttpError::UnsuccessfulRequest(response) => Some(response.status_code.as_u16()),
            _ => None,
        },
        _ => None,
    };

    match status {
        Some(404) => GatewayError::NotFound,
        Some(403) => GatewayError::Forbidden,
        _ => GatewayError::Platform(err.into()),
    }
}

//! Scripted in-memory gateway
//!
//! A test double for [`ChatGateway`][super::ChatGateway]: channels, messages,
//! and interactive replies are seeded up front, every platform call is
//! recorded in an ordered journal, and refusals can be toggled to simulate
//! the platform rejecting an action.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::{ChannelRef, ChatGateway, GatewayError, MessageRef, Wait};
use crate::core::Report;

/// One recorded platform call, in invocation order.
#[derive(Debug, Clone, PartialEq)]
pub enum MockOp {
    SendText {
        channel_id: u64,
        message_id: u64,
        content: String,
    },
    SendReport {
        channel_id: u64,
        message_id: u64,
        report: Report,
    },
    EditText {
        channel_id: u64,
        message_id: u64,
        content: String,
    },
    Delete {
        channel_id: u64,
        message_id: u64,
    },
}

#[derive(Default)]
pub struct MockGateway {
    channels: Mutex<HashMap<u64, ChannelRef>>,
    messages: Mutex<HashMap<(u64, u64), MessageRef>>,
    replies: Mutex<VecDeque<MessageRef>>,
    journal: Mutex<Vec<MockOp>>,
    refuse_deletions: AtomicBool,
    refuse_reports: AtomicBool,
    next_id: AtomicU64,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(9000),
            ..Self::default()
        }
    }

    pub fn add_channel(&self, id: u64, guild_id: Option<u64>) {
        self.channels
            .lock()
            .unwrap()
            .insert(id, ChannelRef { id, guild_id });
    }

    pub fn add_message(&self, channel_id: u64, id: u64, author_id: u64, content: &str) {
        self.messages.lock().unwrap().insert(
            (channel_id, id),
            MessageRef {
                id,
                channel_id,
                author_id,
                content: content.to_string(),
            },
        );
    }

    /// Script the next message `next_reply` will observe.
    pub fn queue_reply(&self, channel_id: u64, author_id: u64, content: &str) -> u64 {
        let id = self.allocate_id();
        self.replies.lock().unwrap().push_back(MessageRef {
            id,
            channel_id,
            author_id,
            content: content.to_string(),
        });
        id
    }

    /// Every subsequent `delete_message` is refused by the platform.
    pub fn refuse_deletions(&self) {
        self.refuse_deletions.store(true, Ordering::SeqCst);
    }

    /// Every subsequent `send_report` is refused by the platform.
    pub fn refuse_reports(&self) {
        self.refuse_reports.store(true, Ordering::SeqCst);
    }

    pub fn journal(&self) -> Vec<MockOp> {
        self.journal.lock().unwrap().clone()
    }

    pub fn sent_texts(&self) -> Vec<(u64, String)> {
        self.journal()
            .into_iter()
            .filter_map(|op| match op {
                MockOp::SendText {
                    channel_id, content, ..
                } => Some((channel_id, content)),
                _ => None,
            })
            .collect()
    }

    pub fn reports(&self) -> Vec<(u64, Report)> {
        self.journal()
            .into_iter()
            .filter_map(|op| match op {
                MockOp::SendReport {
                    channel_id, report, ..
                } => Some((channel_id, report)),
                _ => None,
            })
            .collect()
    }

    pub fn edits(&self) -> Vec<(u64, u64, String)> {
        self.journal()
            .into_iter()
            .filter_map(|op| match op {
                MockOp::EditText {
                    channel_id,
                    message_id,
                    content,
                } => Some((channel_id, message_id, content)),
                _ => None,
            })
            .collect()
    }

    pub fn deletions(&self) -> Vec<(u64, u64)> {
        self.journal()
            .into_iter()
            .filter_map(|op| match op {
                MockOp::Delete {
                    channel_id,
                    message_id,
                } => Some((channel_id, message_id)),
                _ => None,
            })
            .collect()
    }

    fn allocate_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn record(&self, op: MockOp) {
        self.journal.lock().unwrap().push(op);
    }
}

#[async_trait]
impl ChatGateway for MockGateway {
    async fn channel(&self, channel_id: u64) -> Result<ChannelRef, GatewayError> {
        self.channels
            .lock()
            .unwrap()
            .get(&channel_id)
            .cloned()
            .ok_or(GatewayError::NotFound)
    }

    async fn message(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<MessageRef, GatewayError> {
        self.messages
            .lock()
            .unwrap()
            .get(&(channel_id, message_id))
            .cloned()
            .ok_or(GatewayError::NotFound)
    }

    async fn send_text(&self, channel_id: u64, content: &str) -> Result<MessageRef, GatewayError> {
        let id = self.allocate_id();
        let msg = MessageRef {
            id,
            channel_id,
            author_id: 0,
            content: content.to_string(),
        };
        self.messages
            .lock()
            .unwrap()
            .insert((channel_id, id), msg.clone());
        self.record(MockOp::SendText {
            channel_id,
            message_id: id,
            content: content.to_string(),
        });
        Ok(msg)
    }

    async fn send_report(
        &self,
        channel_id: u64,
        report: &Report,
    ) -> Result<MessageRef, GatewayError> {
        if self.refuse_reports.load(Ordering::SeqCst) {
            return Err(GatewayError::Forbidden);
        }
        let id = self.allocate_id();
        self.record(MockOp::SendReport {
            channel_id,
            message_id: id,
            report: report.clone(),
        });
        Ok(MessageRef {
            id,
            channel_id,
            author_id: 0,
            content: String::new(),
        })
    }

    async fn edit_text(
        &self,
        channel_id: u64,
        message_id: u64,
        content: &str,
    ) -> Result<(), GatewayError> {
        if let Some(msg) = self
            .messages
            .lock()
            .unwrap()
            .get_mut(&(channel_id, message_id))
        {
            msg.content = content.to_string();
        }
        self.record(MockOp::EditText {
            channel_id,
            message_id,
            content: content.to_string(),
        });
        Ok(())
    }

    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), GatewayError> {
        if self.refuse_deletions.load(Ordering::SeqCst) {
            return Err(GatewayError::Forbidden);
        }
        self.messages
            .lock()
            .unwrap()
            .remove(&(channel_id, message_id));
        self.record(MockOp::Delete {
            channel_id,
            message_id,
        });
        Ok(())
    }

    async fn next_reply(
        &self,
        channel_id: u64,
        author_id: u64,
        _wait: Duration,
    ) -> Result<Wait<MessageRef>, GatewayError> {
        let mut replies = self.replies.lock().unwrap();
        let position = replies
            .iter()
            .position(|msg| msg.channel_id == channel_id && msg.author_id == author_id);
        Ok(match position {
            Some(index) => Wait::Completed(replies.remove(index).expect("position is in range")),
            None => Wait::TimedOut,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::COLOR_INFO;

    #[tokio::test]
    async fn test_lookups_miss_with_not_found() {
        let gateway = MockGateway::new();
        assert!(matches!(
            gateway.channel(1).await,
            Err(GatewayError::NotFound)
        ));
        assert!(matches!(
            gateway.message(1, 2).await,
            Err(GatewayError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_journal_preserves_order() {
        let gateway = MockGateway::new();
        gateway.send_text(10, "first").await.unwrap();
        gateway
            .send_report(10, &Report::new("Second", COLOR_INFO))
            .await
            .unwrap();
        gateway.delete_message(10, 1).await.unwrap();

        let journal = gateway.journal();
        assert!(matches!(journal[0], MockOp::SendText { .. }));
        assert!(matches!(journal[1], MockOp::SendReport { .. }));
        assert!(matches!(journal[2], MockOp::Delete { .. }));
    }

    #[tokio::test]
    async fn test_scripted_reply_is_single_shot() {
        let gateway = MockGateway::new();
        gateway.queue_reply(10, 42, "yes");

        let first = gateway
            .next_reply(10, 42, Duration::from_secs(1))
            .await
            .unwrap();
        assert!(matches!(first, Wait::Completed(msg) if msg.content == "yes"));

        let second = gateway
            .next_reply(10, 42, Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(second, Wait::TimedOut);
    }

    #[tokio::test]
    async fn test_reply_filter_matches_channel_and_author() {
        let gateway = MockGateway::new();
        gateway.queue_reply(10, 1, "other user");
        let wait = gateway
            .next_reply(10, 42, Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(wait, Wait::TimedOut);
    }

    #[tokio::test]
    async fn test_refused_deletion() {
        let gateway = MockGateway::new();
        gateway.add_message(10, 5, 42, "target");
        gateway.refuse_deletions();
        assert!(matches!(
            gateway.delete_message(10, 5).await,
            Err(GatewayError::Forbidden)
        ));
        assert!(gateway.deletions().is_empty());
    }
}

use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

use crate::channels::base::InteractionResponder;

/// One gateway callback, decoded into what the relay cares about.
pub enum InboundEvent {
    /// A message received in a direct-message channel.
    DirectMessage {
        author_id: String,
        channel_id: String,
        content: String,
    },
    /// A click on a message component (button).
    ComponentInteraction {
        user_id: String,
        custom_id: String,
        responder: Box<dyn InteractionResponder>,
    },
    /// The gateway session is established.
    Ready { bot_id: String, bot_name: String },
}

impl InboundEvent {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DirectMessage { .. } => "direct_message",
            Self::ComponentInteraction { .. } => "component_interaction",
            Self::Ready { .. } => "ready",
        }
    }
}

impl fmt::Debug for InboundEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectMessage {
                author_id,
                channel_id,
                content,
            } => f
                .debug_struct("DirectMessage")
                .field("author_id", author_id)
                .field("channel_id", channel_id)
                .field("content_len", &content.len())
                .finish(),
            Self::ComponentInteraction {
                user_id, custom_id, ..
            } => f
                .debug_struct("ComponentInteraction")
                .field("user_id", user_id)
                .field("custom_id", custom_id)
                .finish_non_exhaustive(),
            Self::Ready { bot_id, bot_name } => f
                .debug_struct("Ready")
                .field("bot_id", bot_id)
                .field("bot_name", bot_name)
                .finish(),
        }
    }
}

/// A direct message the Brain asked us to push, waiting for the delivery worker.
#[derive(Debug, Clone)]
pub struct DeliveryTask {
    pub id: Uuid,
    pub user_id: String,
    pub message: String,
    pub enqueued_at: DateTime<Utc>,
}

impl DeliveryTask {
    pub fn new(user_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            message: message.into(),
            enqueued_at: Utc::now(),
        }
    }

    /// Milliseconds spent waiting in the queue so far.
    pub fn queued_for_ms(&self) -> i64 {
        (Utc::now() - self.enqueued_at).num_milliseconds()
    }
}

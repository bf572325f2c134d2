//! Event routing between the chat gateway and the Brain.
//!
//! Every gateway event is handled in isolation: failures are logged and, where
//! a user is waiting, answered with a generic failure text. Nothing here can
//! take down the event loop.

pub mod custom_id;

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::brain::{BrainAction, BrainClient};
use crate::bus::{DeliveryTask, InboundEvent};
use crate::channels::base::{ChatGateway, InteractionResponder};
use crate::config::RepliesConfig;
use crate::errors::{RelayError, RelayResult};
pub use custom_id::CustomId;

/// Discord drops the typing indicator after ~10s.
const TYPING_INDICATOR_INTERVAL_SECS: u64 = 8;

pub struct RelayCore {
    brain: BrainClient,
    gateway: Arc<dyn ChatGateway>,
    replies: RepliesConfig,
    bot_id: OnceLock<String>,
}

impl RelayCore {
    pub fn new(brain: BrainClient, gateway: Arc<dyn ChatGateway>, replies: RepliesConfig) -> Self {
        Self {
            brain,
            gateway,
            replies,
            bot_id: OnceLock::new(),
        }
    }

    /// The bot's own user id, known once the gateway reported ready.
    pub fn bot_id(&self) -> Option<&str> {
        self.bot_id.get().map(String::as_str)
    }

    pub async fn handle_event(&self, event: InboundEvent) {
        debug!("handling {} event", event.kind());
        match event {
            InboundEvent::DirectMessage {
                author_id,
                channel_id,
                content,
            } => {
                self.handle_direct_message(&author_id, &channel_id, &content).await;
            }
            InboundEvent::ComponentInteraction {
                user_id,
                custom_id,
                responder,
            } => {
                self.handle_interaction(&user_id, &custom_id, responder.as_ref()).await;
            }
            InboundEvent::Ready { bot_id, bot_name } => self.handle_ready(bot_id, &bot_name),
        }
    }

    fn handle_ready(&self, bot_id: String, bot_name: &str) {
        info!("{} connected as {} (id: {})", self.gateway.name(), bot_name, bot_id);
        if let Err(bot_id) = self.bot_id.set(bot_id) {
            debug!("gateway resumed, identity already known ({})", bot_id);
        }
    }

    async fn handle_direct_message(&self, author_id: &str, channel_id: &str, content: &str) {
        if self.bot_id() == Some(author_id) {
            return;
        }

        info!(
            "direct message from {} (channel {}, {} chars)",
            author_id,
            channel_id,
            content.len()
        );

        let typing = self.start_typing(channel_id);
        let result = self.brain.send_message(author_id, content).await;
        typing.abort();

        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                error!("Brain call for message from {} failed: {}", author_id, e);
                self.send_text(channel_id, &self.replies.message_failure).await;
                return;
            }
        };

        if let Some(text) = reply.text() {
            self.send_text(channel_id, text).await;
        }

        for action in reply.pending_actions() {
            match action {
                BrainAction::SendDm {
                    target_user_id,
                    message_content,
                } => {
                    self.deliver_direct_message(target_user_id, message_content).await;
                }
                BrainAction::Unknown => {
                    warn!("skipping Brain action of unknown type");
                }
            }
        }
    }

    async fn handle_interaction(
        &self,
        user_id: &str,
        custom_id: &str,
        responder: &dyn InteractionResponder,
    ) {
        // Acknowledge before anything slow; Discord gives us three seconds.
        if let Err(e) = responder.acknowledge().await {
            error!("failed to acknowledge interaction from {}: {}", user_id, e);
            return;
        }

        if let Err(e) = self.process_interaction(user_id, custom_id, responder).await {
            warn!("interaction '{}' from {} failed: {}", custom_id, user_id, e);
            if let Err(e) = responder
                .follow_up_ephemeral(&self.replies.interaction_failure)
                .await
            {
                error!("failed to send failure reply to {}: {}", user_id, e);
            }
        }
    }

    async fn process_interaction(
        &self,
        user_id: &str,
        custom_id: &str,
        responder: &dyn InteractionResponder,
    ) -> RelayResult<()> {
        let parsed = CustomId::parse(custom_id)?;
        let fight_id = parsed.fight_id_number()?;
        info!(
            "interaction from {}: action='{}', fight={}",
            user_id, parsed.action, fight_id
        );

        let reply = self
            .brain
            .send_interaction(user_id, fight_id, parsed.action)
            .await?;

        if let Some(text) = reply.confirmation() {
            responder.follow_up_ephemeral(text).await?;
        }

        if let Some((notify_user_id, text)) = reply.notification() {
            self.deliver_direct_message(notify_user_id, text).await;
        }

        responder.remove_components().await?;
        Ok(())
    }

    /// Send `message` to `user_id` in a direct message. Failures are logged
    /// and swallowed: callers have either already answered their own caller
    /// or must keep handling the current event.
    pub async fn deliver_direct_message(&self, user_id: &str, message: &str) {
        match self.try_deliver(user_id, message).await {
            Ok(()) => info!("direct message delivered to {}", user_id),
            Err(e) => error!("failed to deliver direct message to {}: {}", user_id, e),
        }
    }

    async fn try_deliver(&self, user_id: &str, message: &str) -> RelayResult<()> {
        let id = user_id
            .parse::<u64>()
            .map_err(|_| RelayError::UserResolution {
                user_id: user_id.to_string(),
                message: "not a numeric user id".to_string(),
            })?;

        let channel_id = self
            .gateway
            .open_direct_channel(id)
            .await
            .map_err(|e| RelayError::UserResolution {
                user_id: user_id.to_string(),
                message: e.to_string(),
            })?;

        self.gateway.send_channel_message(&channel_id, message).await?;
        Ok(())
    }

    /// Drain queued push deliveries one at a time, in arrival order, until
    /// every producer is gone.
    pub async fn run_deliveries(&self, mut delivery_rx: mpsc::Receiver<DeliveryTask>) {
        info!("delivery worker running");
        while let Some(task) = delivery_rx.recv().await {
            debug!(
                "delivery {} to {} dequeued after {}ms",
                task.id,
                task.user_id,
                task.queued_for_ms()
            );
            self.deliver_direct_message(&task.user_id, &task.message).await;
        }
        warn!("delivery queue closed, worker exiting");
    }

    async fn send_text(&self, channel_id: &str, text: &str) {
        if let Err(e) = self.gateway.send_channel_message(channel_id, text).await {
            error!("failed to send message to channel {}: {}", channel_id, e);
        }
    }

    /// Periodic typing indicator: refreshed until the returned handle is aborted.
    fn start_typing(&self, channel_id: &str) -> tokio::task::JoinHandle<()> {
        let gateway = self.gateway.clone();
        let channel_id = channel_id.to_string();
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(TYPING_INDICATOR_INTERVAL_SECS));
            loop {
                interval.tick().await;
                if let Err(e) = gateway.broadcast_typing(&channel_id).await {
                    debug!("typing indicator failed for {}: {}", channel_id, e);
                    break;
                }
            }
        })
    }
}

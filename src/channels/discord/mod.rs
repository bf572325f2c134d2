use crate::bus::InboundEvent;
use crate::channels::base::{
    ChatGateway, InteractionResponder, MAX_MESSAGE_CHARS, split_message,
};
use crate::relay::RelayCore;
use anyhow::{Context as _, Result};
use async_trait::async_trait;
use serenity::all::{
    ChannelId, ComponentInteraction, CreateInteractionResponseFollowup, EditInteractionResponse,
    GuildId, Interaction, ShardManager, UserId,
};
use serenity::async_trait as serenity_async_trait;
use serenity::http::Http;
use serenity::model::channel::Message as DiscordMessage;
use serenity::model::gateway::{GatewayIntents, Ready};
use serenity::prelude::*;
use std::sync::{Arc, OnceLock};

/// Intents the relay needs: DM delivery plus the message text itself.
/// Component interactions arrive regardless of intents.
pub fn gateway_intents() -> GatewayIntents {
    GatewayIntents::DIRECT_MESSAGES | GatewayIntents::MESSAGE_CONTENT
}

fn parse_channel_id(raw: &str) -> Result<ChannelId> {
    raw.parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .map(ChannelId::new)
        .with_context(|| format!("Invalid Discord channel id: {:?}", raw))
}

fn user_id_from(id: u64) -> Result<UserId> {
    if id == 0 {
        anyhow::bail!("Invalid Discord user id: 0");
    }
    Ok(UserId::new(id))
}

/// Only messages outside any guild are relayed.
fn is_direct_message(guild_id: Option<GuildId>) -> bool {
    guild_id.is_none()
}

/// Outbound Discord calls. The REST handle is the client's own, so pushes,
/// replies and interaction responses share one rate limiter.
pub struct DiscordGateway {
    http: Arc<Http>,
}

impl DiscordGateway {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ChatGateway for DiscordGateway {
    fn name(&self) -> &str {
        "discord"
    }

    async fn open_direct_channel(&self, user_id: u64) -> Result<String> {
        let user = user_id_from(user_id)?;
        let channel = user.create_dm_channel(self.http.as_ref()).await?;
        Ok(channel.id.to_string())
    }

    async fn send_channel_message(&self, channel_id: &str, content: &str) -> Result<()> {
        let channel = parse_channel_id(channel_id)?;
        for chunk in split_message(content, MAX_MESSAGE_CHARS) {
            channel.say(&self.http, &chunk).await.map_err(|e| {
                tracing::error!("Discord send to {} failed: {}", channel_id, e);
                anyhow::anyhow!("Discord send failed: {}", e)
            })?;
        }
        Ok(())
    }

    async fn broadcast_typing(&self, channel_id: &str) -> Result<()> {
        parse_channel_id(channel_id)?
            .broadcast_typing(&self.http)
            .await?;
        Ok(())
    }
}

/// Responder for one button click.
pub struct DiscordInteraction {
    http: Arc<Http>,
    interaction: ComponentInteraction,
}

#[async_trait]
impl InteractionResponder for DiscordInteraction {
    async fn acknowledge(&self) -> Result<()> {
        self.interaction.defer(self.http.as_ref()).await?;
        Ok(())
    }

    async fn follow_up_ephemeral(&self, content: &str) -> Result<()> {
        let followup = CreateInteractionResponseFollowup::new()
            .content(content)
            .ephemeral(true);
        self.interaction
            .create_followup(self.http.as_ref(), followup)
            .await?;
        Ok(())
    }

    async fn remove_components(&self) -> Result<()> {
        self.interaction
            .edit_response(
                self.http.as_ref(),
                EditInteractionResponse::new().components(vec![]),
            )
            .await?;
        Ok(())
    }
}

/// Set once by [`DiscordClient::start`]. Events arriving before that are dropped.
type RelaySlot = Arc<OnceLock<Arc<RelayCore>>>;

struct Handler {
    relay: RelaySlot,
}

impl Handler {
    async fn dispatch(&self, event: InboundEvent) {
        let Some(relay) = self.relay.get() else {
            tracing::debug!("relay not attached yet, dropping {} event", event.kind());
            return;
        };
        relay.handle_event(event).await;
    }
}

#[serenity_async_trait]
impl EventHandler for Handler {
    async fn message(&self, _ctx: Context, msg: DiscordMessage) {
        if !is_direct_message(msg.guild_id) {
            return;
        }

        let event = InboundEvent::DirectMessage {
            author_id: msg.author.id.to_string(),
            channel_id: msg.channel_id.to_string(),
            content: msg.content,
        };
        self.dispatch(event).await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Component(component) = interaction else {
            return;
        };

        let event = InboundEvent::ComponentInteraction {
            user_id: component.user.id.to_string(),
            custom_id: component.data.custom_id.clone(),
            responder: Box::new(DiscordInteraction {
                http: ctx.http.clone(),
                interaction: component,
            }),
        };
        self.dispatch(event).await;
    }

    async fn ready(&self, _: Context, ready: Ready) {
        let event = InboundEvent::Ready {
            bot_id: ready.user.id.to_string(),
            bot_name: ready.user.name.clone(),
        };
        self.dispatch(event).await;
    }
}

/// A running gateway connection.
pub struct DiscordConnection {
    shard_manager: Arc<ShardManager>,
    task: tokio::task::JoinHandle<()>,
}

impl DiscordConnection {
    /// Resolves once the client stops on its own (auth failure, fatal gateway error).
    pub async fn stopped(&mut self) {
        if let Err(e) = (&mut self.task).await {
            tracing::error!("Discord client task failed: {}", e);
        }
    }

    pub async fn shutdown(self) {
        tracing::info!("Shutting down Discord connection...");
        self.shard_manager.shutdown_all().await;
        if !self.task.is_finished() {
            let _ = self.task.await;
        }
    }
}

/// The serenity client, built but not yet connected.
pub struct DiscordClient {
    client: Client,
    relay: RelaySlot,
}

impl DiscordClient {
    pub async fn new(token: &str) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(anyhow::anyhow!("Discord token is empty"));
        }

        let relay = RelaySlot::default();
        let client = Client::builder(token, gateway_intents())
            .event_handler(Handler {
                relay: relay.clone(),
            })
            .await
            .map_err(|e| {
                tracing::error!("Failed to create Discord client: {}", e);
                anyhow::anyhow!("Failed to create Discord client: {}", e)
            })?;

        Ok(Self { client, relay })
    }

    /// Outbound gateway over the client's REST handle.
    pub fn gateway(&self) -> DiscordGateway {
        DiscordGateway::new(self.client.http.clone())
    }

    /// Connect to the Discord gateway and feed every event to `relay`.
    pub fn start(self, relay: Arc<RelayCore>) -> DiscordConnection {
        let Self { mut client, relay: slot } = self;
        if slot.set(relay).is_err() {
            tracing::warn!("relay already attached to Discord client");
        }

        tracing::info!("Connecting to Discord gateway...");
        let shard_manager = client.shard_manager.clone();
        let shard_manager_for_error = client.shard_manager.clone();
        let task = tokio::spawn(async move {
            if let Err(why) = client.start().await {
                tracing::error!("Discord client connection error: {:?}", why);
                shard_manager_for_error.shutdown_all().await;
            }
        });

        DiscordConnection {
            shard_manager,
            task,
        }
    }
}

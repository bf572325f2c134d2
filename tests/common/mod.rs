// Shared test helpers — not all items used by every test binary.
#![allow(unused)]

use async_trait::async_trait;
use brainrelay::brain::BrainClient;
use brainrelay::channels::base::{ChatGateway, InteractionResponder};
use brainrelay::config::{BrainConfig, RepliesConfig};
use brainrelay::relay::RelayCore;
use std::sync::{Arc, Mutex};
use wiremock::MockServer;

pub const SECRET: &str = "integration-secret";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    Sent { channel: String, content: String },
    Acknowledged,
    Ephemeral(String),
    ComponentsRemoved,
}

/// Gateway that records every outbound call. DM channels are named `dm-<user>`.
#[derive(Default, Clone)]
pub struct RecordingGateway {
    pub calls: Arc<Mutex<Vec<Recorded>>>,
}

impl RecordingGateway {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                Recorded::Sent { channel, content } => Some((channel.clone(), content.clone())),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl ChatGateway for RecordingGateway {
    fn name(&self) -> &str {
        "recording"
    }

    async fn open_direct_channel(&self, user_id: u64) -> anyhow::Result<String> {
        Ok(format!("dm-{}", user_id))
    }

    async fn send_channel_message(&self, channel_id: &str, content: &str) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(Recorded::Sent {
            channel: channel_id.to_string(),
            content: content.to_string(),
        });
        Ok(())
    }
}

/// Responder sharing its call log with a [`RecordingGateway`].
pub struct RecordingResponder {
    pub calls: Arc<Mutex<Vec<Recorded>>>,
}

#[async_trait]
impl InteractionResponder for RecordingResponder {
    async fn acknowledge(&self) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(Recorded::Acknowledged);
        Ok(())
    }

    async fn follow_up_ephemeral(&self, content: &str) -> anyhow::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(Recorded::Ephemeral(content.to_string()));
        Ok(())
    }

    async fn remove_components(&self) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(Recorded::ComponentsRemoved);
        Ok(())
    }
}

pub fn brain_config(server: &MockServer) -> BrainConfig {
    BrainConfig {
        url: server.uri(),
        secret_key: SECRET.to_string(),
        timeout_secs: 5,
        ..BrainConfig::default()
    }
}

pub fn create_relay(server: &MockServer) -> (Arc<RelayCore>, RecordingGateway) {
    let gateway = RecordingGateway::default();
    let brain = BrainClient::new(&brain_config(server)).expect("build brain client");
    let relay = RelayCore::new(
        brain,
        Arc::new(gateway.clone()),
        RepliesConfig::default(),
    );
    (Arc::new(relay), gateway)
}

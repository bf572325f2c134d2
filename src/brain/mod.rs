//! HTTP client for the Brain, the remote service that decides what the bot says.
//!
//! One POST per event, authenticated with the shared secret, bounded by a
//! single timeout. No retries: every failure surfaces as
//! [`RelayError::BrainUnavailable`].

pub mod types;

use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::BrainConfig;
use crate::errors::{RelayError, RelayResult};
pub use types::{BrainAction, BrainReply, InteractionRequest, MessageRequest};

/// Header carrying the shared secret in both directions.
pub const SECRET_HEADER: &str = "X-Secret-Key";

const CONNECT_TIMEOUT_SECS: u64 = 10;
/// How much of an error body to keep in logs.
const ERROR_BODY_PREVIEW_CHARS: usize = 200;

pub struct BrainClient {
    base_url: String,
    secret: String,
    message_path: String,
    interaction_path: String,
    client: Client,
}

impl BrainClient {
    pub fn new(config: &BrainConfig) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout))
            .timeout(timeout)
            .build()
            .context("Failed to build Brain HTTP client")?;

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            secret: config.secret_key.clone(),
            message_path: config.message_path.clone(),
            interaction_path: config.interaction_path.clone(),
            client,
        })
    }

    /// Forward a direct message.
    pub async fn send_message(&self, user_id: &str, message: &str) -> RelayResult<BrainReply> {
        self.call(&self.message_path, &MessageRequest { user_id, message })
            .await
    }

    /// Forward a button click.
    pub async fn send_interaction(
        &self,
        user_id: &str,
        fight_id: u64,
        action: &str,
    ) -> RelayResult<BrainReply> {
        self.call(
            &self.interaction_path,
            &InteractionRequest {
                user_id,
                fight_id,
                action,
            },
        )
        .await
    }

    /// POST `body` as JSON to `endpoint` and decode the reply.
    pub async fn call<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> RelayResult<BrainReply> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("calling Brain at {}", endpoint);

        let resp = self
            .client
            .post(&url)
            .header(SECRET_HEADER, &self.secret)
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(endpoint, &e))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let preview: String = text.chars().take(ERROR_BODY_PREVIEW_CHARS).collect();
            warn!("Brain {} returned {}: {}", endpoint, status, preview);
            return Err(RelayError::BrainUnavailable(format!(
                "{} returned {}",
                endpoint, status
            )));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| transport_error(endpoint, &e))?;

        serde_json::from_slice::<BrainReply>(&bytes).map_err(|e| {
            warn!("Brain {} returned undecodable body: {}", endpoint, e);
            RelayError::BrainUnavailable(format!("{} returned invalid JSON: {}", endpoint, e))
        })
    }
}

fn transport_error(endpoint: &str, e: &reqwest::Error) -> RelayError {
    if e.is_timeout() {
        RelayError::BrainUnavailable(format!("{} timed out", endpoint))
    } else {
        RelayError::BrainUnavailable(format!("{} request failed: {}", endpoint, e))
    }
}

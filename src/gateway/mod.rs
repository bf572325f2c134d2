/// Inbound HTTP server for the Brain.
///
/// Serves a liveness page for uptime monitors and the push endpoint the Brain
/// uses to have the bot DM arbitrary users. Pushes are authenticated with the
/// shared secret, validated, queued for the delivery worker and answered
/// immediately; the response never waits on Discord.
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use subtle::ConstantTimeEq;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::brain::SECRET_HEADER;
use crate::brain::types::optional_id;
use crate::bus::{DeliveryQueue, DeliveryTask};
use crate::errors::{RelayError, RelayResult};

/// Max push payload size: 1 MB.
const MAX_PUSH_BODY: usize = 1_048_576;

/// Shared state for the HTTP handlers.
#[derive(Clone)]
pub struct NotificationState {
    secret: Arc<str>,
    status_text: Arc<str>,
    deliveries: DeliveryQueue,
}

impl NotificationState {
    pub fn new(secret: &str, status_text: &str, deliveries: DeliveryQueue) -> Self {
        Self {
            secret: Arc::from(secret),
            status_text: Arc::from(status_text),
            deliveries,
        }
    }
}

/// Request body for POST /send_notification.
#[derive(Debug, Deserialize)]
pub struct PushNotificationRequest {
    /// Discord user id, as a string or an integer.
    #[serde(default, deserialize_with = "optional_id")]
    pub target_user_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl PushNotificationRequest {
    /// Validate the push and turn it into a delivery task.
    pub fn into_task(self) -> RelayResult<DeliveryTask> {
        let user_id = self
            .target_user_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| RelayError::Validation("target_user_id is required".into()))?;
        let message = self
            .message
            .filter(|m| !m.is_empty())
            .ok_or_else(|| RelayError::Validation("message is required".into()))?;

        if user_id.parse::<u64>().is_err() {
            return Err(RelayError::Validation(
                "target_user_id must be a numeric user id".into(),
            ));
        }

        Ok(DeliveryTask::new(user_id, message))
    }
}

/// Build the HTTP router.
pub fn build_router(state: NotificationState) -> Router {
    Router::new()
        .route("/", get(status_handler))
        .route("/api/health", get(health_handler))
        .route("/send_notification", post(send_notification_handler))
        .with_state(state)
}

/// GET / — static liveness text for uptime monitors.
async fn status_handler(State(state): State<NotificationState>) -> String {
    state.status_text.to_string()
}

/// GET /api/health — health check endpoint.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}

/// POST /send_notification — queue a DM on behalf of the Brain.
async fn send_notification_handler(
    State(state): State<NotificationState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match accept_push(&state, &headers, &body) {
        Ok(id) => (
            StatusCode::OK,
            Json(serde_json::json!({"status": "queued", "id": id})),
        )
            .into_response(),
        Err(e) => {
            let status = e.http_status();
            if status.is_server_error() {
                error!("push notification failed: {}", e);
            } else {
                warn!("push notification rejected ({}): {}", status.as_u16(), e);
            }
            let message = match e {
                RelayError::Unauthorized(_) => "unauthorized".to_string(),
                other => other.to_string(),
            };
            (status, Json(serde_json::json!({"error": message}))).into_response()
        }
    }
}

fn accept_push(state: &NotificationState, headers: &HeaderMap, body: &[u8]) -> RelayResult<Uuid> {
    let provided = headers.get(SECRET_HEADER).and_then(|v| v.to_str().ok());
    if !secret_matches(&state.secret, provided) {
        return Err(RelayError::Unauthorized("invalid or missing secret key".into()));
    }

    if body.len() > MAX_PUSH_BODY {
        return Err(RelayError::PayloadTooLarge(body.len()));
    }

    let request: PushNotificationRequest = serde_json::from_slice(body)
        .map_err(|e| RelayError::Validation(format!("invalid JSON body: {}", e)))?;
    let task = request.into_task()?;

    debug!(
        "push accepted: target={}, message_len={}",
        task.user_id,
        task.message.len()
    );
    state.deliveries.enqueue(task)
}

pub(crate) fn secret_matches(expected: &str, provided: Option<&str>) -> bool {
    let Some(provided) = provided else {
        return false;
    };
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}

/// Bind the listener and serve in a background task.
pub async fn start(
    host: &str,
    port: u16,
    state: NotificationState,
) -> Result<tokio::task::JoinHandle<()>> {
    let app = build_router(state);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind notification server on {}", addr))?;
    info!("notification server listening on {}", addr);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("notification server error: {}", e);
        }
    });

    Ok(handle)
}

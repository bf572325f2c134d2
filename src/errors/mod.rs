use axum::http::StatusCode;
use thiserror::Error;

/// Typed error hierarchy for brainrelay.
///
/// Use at module boundaries (Brain calls, interaction parsing, push validation,
/// delivery). Internal/leaf functions can continue using `anyhow::Result`; the
/// `Internal` variant allows seamless conversion via the `?` operator.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network failure, timeout, non-2xx status or undecodable reply from the Brain.
    #[error("Brain unavailable: {0}")]
    BrainUnavailable(String),

    /// Malformed interaction identifier.
    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0} bytes")]
    PayloadTooLarge(usize),

    /// The push delivery queue is full or its worker has stopped.
    #[error("Delivery queue unavailable: {0}")]
    QueueUnavailable(String),

    #[error("Could not resolve user {user_id}: {message}")]
    UserResolution { user_id: String, message: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience alias for results using `RelayError`.
pub type RelayResult<T> = std::result::Result<T, RelayError>;

impl RelayError {
    /// Status code reported to an inbound HTTP caller for this error.
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::FORBIDDEN,
            Self::Validation(_) | Self::ProtocolViolation(_) => StatusCode::BAD_REQUEST,
            Self::BrainUnavailable(_) => StatusCode::BAD_GATEWAY,
            Self::UserResolution { .. } => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::QueueUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Config(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

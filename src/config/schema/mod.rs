use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::RelayError;

/// Generates a `Debug` impl that redacts secret fields.
///
/// Field specifiers:
/// - `field_name`            — printed normally via `&self.field_name`
/// - `redact(field_name)`    — `String` field: shows `[empty]` or `[REDACTED]`
macro_rules! redact_debug {
    (@field $builder:ident, $self:ident, redact($field:ident)) => {
        $builder.field(
            stringify!($field),
            &if $self.$field.is_empty() {
                "[empty]"
            } else {
                "[REDACTED]"
            },
        );
    };
    (@field $builder:ident, $self:ident, $field:ident) => {
        $builder.field(stringify!($field), &$self.$field);
    };

    (@fields $builder:ident, $self:ident,) => {};
    (@fields $builder:ident, $self:ident, redact($field:ident), $($rest:tt)*) => {
        redact_debug!(@field $builder, $self, redact($field));
        redact_debug!(@fields $builder, $self, $($rest)*);
    };
    (@fields $builder:ident, $self:ident, $field:ident, $($rest:tt)*) => {
        redact_debug!(@field $builder, $self, $field);
        redact_debug!(@fields $builder, $self, $($rest)*);
    };

    ($struct_name:ident, $($fields:tt)*) => {
        impl std::fmt::Debug for $struct_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let mut builder = f.debug_struct(stringify!($struct_name));
                redact_debug!(@fields builder, self, $($fields)*);
                builder.finish()
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Discord
// ---------------------------------------------------------------------------

#[derive(Clone, Serialize, Deserialize, Default)]
pub struct DiscordConfig {
    #[serde(default)]
    pub token: String,
}

redact_debug!(DiscordConfig, redact(token),);

// ---------------------------------------------------------------------------
// Brain
// ---------------------------------------------------------------------------

fn default_timeout_secs() -> u64 {
    30
}

fn default_message_path() -> String {
    "/bot_handler".to_string()
}

fn default_interaction_path() -> String {
    "/fight_action_discord".to_string()
}

/// Where the decision service lives and how to talk to it.
///
/// `secret_key` authenticates both directions: it is sent on every outbound
/// call and required on every inbound push.
#[derive(Clone, Serialize, Deserialize)]
pub struct BrainConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default, rename = "secretKey")]
    pub secret_key: String,
    #[serde(default = "default_timeout_secs", rename = "timeoutSecs")]
    pub timeout_secs: u64,
    #[serde(default = "default_message_path", rename = "messagePath")]
    pub message_path: String,
    #[serde(default = "default_interaction_path", rename = "interactionPath")]
    pub interaction_path: String,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            secret_key: String::new(),
            timeout_secs: default_timeout_secs(),
            message_path: default_message_path(),
            interaction_path: default_interaction_path(),
        }
    }
}

redact_debug!(
    BrainConfig,
    url,
    redact(secret_key),
    timeout_secs,
    message_path,
    interaction_path,
);

// ---------------------------------------------------------------------------
// Notification server
// ---------------------------------------------------------------------------

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_status_text() -> String {
    "Relay is up and listening.".to_string()
}

fn default_queue_capacity() -> usize {
    1000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Body returned by `GET /` for uptime monitors.
    #[serde(default = "default_status_text", rename = "statusText")]
    pub status_text: String,
    #[serde(default = "default_queue_capacity", rename = "queueCapacity")]
    pub queue_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            status_text: default_status_text(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

// ---------------------------------------------------------------------------
// User-facing replies
// ---------------------------------------------------------------------------

fn default_message_failure() -> String {
    "Sorry, something went wrong while processing your request.".to_string()
}

fn default_interaction_failure() -> String {
    "There was an error processing your action.".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepliesConfig {
    #[serde(default = "default_message_failure", rename = "messageFailure")]
    pub message_failure: String,
    #[serde(default = "default_interaction_failure", rename = "interactionFailure")]
    pub interaction_failure: String,
}

impl Default for RepliesConfig {
    fn default() -> Self {
        Self {
            message_failure: default_message_failure(),
            interaction_failure: default_interaction_failure(),
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub discord: DiscordConfig,
    #[serde(default)]
    pub brain: BrainConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub replies: RepliesConfig,
}

impl Config {
    /// Reject configurations the relay cannot run with.
    ///
    /// A missing token or secret is fatal: running half-configured would
    /// either never connect or accept unauthenticated pushes.
    pub fn validate(&self) -> Result<(), RelayError> {
        self.validate_discord()?;
        self.validate_brain()?;
        self.validate_server()?;
        Ok(())
    }

    fn validate_discord(&self) -> Result<(), RelayError> {
        if self.discord.token.trim().is_empty() {
            return Err(RelayError::Config(
                "discord.token is required (set BRAINRELAY_DISCORD_TOKEN)".into(),
            ));
        }
        Ok(())
    }

    fn validate_brain(&self) -> Result<(), RelayError> {
        let b = &self.brain;

        if b.secret_key.trim().is_empty() {
            return Err(RelayError::Config(
                "brain.secretKey is required (set BRAINRELAY_SECRET_KEY)".into(),
            ));
        }
        if b.url.trim().is_empty() {
            return Err(RelayError::Config(
                "brain.url is required (set BRAINRELAY_BRAIN_URL)".into(),
            ));
        }
        let parsed = url::Url::parse(&b.url)
            .map_err(|e| RelayError::Config(format!("brain.url is not a valid URL: {e}")))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(RelayError::Config(format!(
                "brain.url must use http or https, got '{}'",
                parsed.scheme()
            )));
        }
        if parsed.scheme() == "http" {
            warn!("brain.url uses plain http; the shared secret is sent unencrypted");
        }
        if b.timeout_secs == 0 {
            return Err(RelayError::Config("brain.timeoutSecs must be > 0".into()));
        }
        if b.timeout_secs > 600 {
            return Err(RelayError::Config(
                "brain.timeoutSecs is unreasonably large (> 600)".into(),
            ));
        }
        for (name, path) in [
            ("messagePath", &b.message_path),
            ("interactionPath", &b.interaction_path),
        ] {
            if !path.starts_with('/') {
                return Err(RelayError::Config(format!(
                    "brain.{name} must start with '/'"
                )));
            }
        }
        Ok(())
    }

    fn validate_server(&self) -> Result<(), RelayError> {
        let s = &self.server;
        if s.port == 0 {
            return Err(RelayError::Config("server.port must be > 0".into()));
        }
        if s.queue_capacity == 0 {
            return Err(RelayError::Config(
                "server.queueCapacity must be > 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;

use async_trait::async_trait;

/// Discord rejects messages longer than this many characters.
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Outbound calls the relay makes on the chat platform. Implementations own
/// the platform connection handle; the relay never touches it directly.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    fn name(&self) -> &str;

    /// Resolve a user by id and return the id of their direct-message channel.
    async fn open_direct_channel(&self, user_id: u64) -> anyhow::Result<String>;

    async fn send_channel_message(&self, channel_id: &str, content: &str) -> anyhow::Result<()>;

    /// Show the "typing..." indicator once. Discord clears it after roughly
    /// ten seconds, so callers refresh it while work is in flight.
    /// Default is a no-op for platforms without typing indicators.
    async fn broadcast_typing(&self, _channel_id: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Per-interaction calls. One responder is created for every component
/// interaction and dropped once handling finishes.
#[async_trait]
pub trait InteractionResponder: Send + Sync {
    /// Acknowledge the interaction without changing the message. Must run
    /// within the platform's three-second window.
    async fn acknowledge(&self) -> anyhow::Result<()>;

    /// Follow-up visible only to the user who clicked.
    async fn follow_up_ephemeral(&self, content: &str) -> anyhow::Result<()>;

    /// Strip all components from the message the interaction came from.
    /// Safe to call when there are none left.
    async fn remove_components(&self) -> anyhow::Result<()>;
}

/// Split text into chunks of at most `max_chars` characters, preferring to
/// break at a newline. Counts characters, not bytes.
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut rest = text;

    while rest.chars().count() > max_chars {
        let cut = rest
            .char_indices()
            .nth(max_chars)
            .map_or(rest.len(), |(i, _)| i);
        let window = &rest[..cut];

        let (head, tail) = match window.rfind('\n') {
            Some(idx) if idx > 0 => (rest[..idx].trim_end(), &rest[idx + 1..]),
            _ => (window, &rest[cut..]),
        };

        if !head.trim().is_empty() {
            chunks.push(head.to_string());
        }
        rest = tail;
    }

    if !rest.trim().is_empty() {
        chunks.push(rest.to_string());
    }

    chunks
}

#[cfg(test)]
mod tests;

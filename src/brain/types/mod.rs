use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// Body for the direct-message endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct MessageRequest<'a> {
    pub user_id: &'a str,
    pub message: &'a str,
}

/// Body for the button-interaction endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct InteractionRequest<'a> {
    pub user_id: &'a str,
    pub fight_id: u64,
    pub action: &'a str,
}

/// Reply from the Brain. Every field is optional; a missing field means
/// "nothing of that kind to do" and unknown fields are ignored so the Brain
/// can grow its schema without breaking the relay.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BrainReply {
    pub text: Option<String>,
    pub action_required: Option<bool>,
    #[serde(deserialize_with = "lenient_actions")]
    pub actions: Option<Vec<BrainAction>>,
    pub confirmation_text: Option<String>,
    pub notification_text: Option<String>,
    #[serde(deserialize_with = "optional_id")]
    pub notify_user_id: Option<String>,
}

impl BrainReply {
    /// Text to send back on the originating channel.
    pub fn text(&self) -> Option<&str> {
        non_empty(self.text.as_ref())
    }

    /// Private confirmation for the user who clicked.
    pub fn confirmation(&self) -> Option<&str> {
        non_empty(self.confirmation_text.as_ref())
    }

    /// `(user_id, text)` when the Brain wants a third party told about the
    /// interaction. Both halves must be present.
    pub fn notification(&self) -> Option<(&str, &str)> {
        let user = non_empty(self.notify_user_id.as_ref())?;
        let text = non_empty(self.notification_text.as_ref())?;
        Some((user, text))
    }

    /// Actions to execute. Empty unless `action_required` is set.
    pub fn pending_actions(&self) -> &[BrainAction] {
        match (self.action_required, &self.actions) {
            (Some(true), Some(actions)) => actions,
            _ => &[],
        }
    }
}

/// Side effect requested by the Brain.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum BrainAction {
    #[serde(rename = "SEND_DM")]
    SendDm {
        #[serde(deserialize_with = "id_string")]
        target_user_id: String,
        message_content: String,
    },
    /// Any action type this relay does not know yet.
    #[serde(other)]
    Unknown,
}

/// Decode `actions` entry by entry. An entry that does not decode becomes
/// [`BrainAction::Unknown`]; a non-list value is treated as absent. Neither
/// fails the reply as a whole.
fn lenient_actions<'de, D>(deserializer: D) -> Result<Option<Vec<BrainAction>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<serde_json::Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let serde_json::Value::Array(entries) = raw else {
        debug!("Brain reply 'actions' is not a list, ignoring it");
        return Ok(None);
    };

    let actions = entries
        .into_iter()
        .map(|entry| {
            BrainAction::deserialize(entry).unwrap_or_else(|e| {
                debug!("undecodable Brain action: {}", e);
                BrainAction::Unknown
            })
        })
        .collect();
    Ok(Some(actions))
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

/// Discord snowflakes show up both as JSON strings and as integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

pub(crate) fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(Into::into)
}

pub(crate) fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer).map(|id| id.map(Into::into))
}

#[cfg(test)]
mod tests;

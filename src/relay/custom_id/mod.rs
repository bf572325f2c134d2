use crate::errors::{RelayError, RelayResult};

/// A component's `custom_id`, shaped `<action>_..._<fightId>`.
///
/// The first underscore-delimited token is the action and the last is the
/// fight id; anything between is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomId<'a> {
    pub action: &'a str,
    pub fight_id: &'a str,
}

impl<'a> CustomId<'a> {
    pub fn parse(raw: &'a str) -> RelayResult<Self> {
        let (Some((action, _)), Some((_, fight_id))) = (raw.split_once('_'), raw.rsplit_once('_'))
        else {
            return Err(RelayError::ProtocolViolation(format!(
                "custom_id '{}' has no '_' delimiter",
                raw
            )));
        };

        if action.is_empty() || fight_id.is_empty() {
            return Err(RelayError::ProtocolViolation(format!(
                "custom_id '{}' is missing its action or fight id",
                raw
            )));
        }

        Ok(Self { action, fight_id })
    }

    /// The fight id as the integer the Brain expects.
    pub fn fight_id_number(&self) -> RelayResult<u64> {
        self.fight_id.parse::<u64>().map_err(|_| {
            RelayError::ProtocolViolation(format!(
                "fight id '{}' is not a non-negative integer",
                self.fight_id
            ))
        })
    }
}

#![warn(clippy::pedantic)]
// Noisy doc/signature lints — would require annotating every pub function
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
// Style preference — keeping format!("{}", x) over format!("{x}") for readability with complex exprs
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::module_name_repetitions)]

pub mod brain;
pub mod bus;
pub mod channels;
pub mod cli;
pub mod config;
pub mod errors;
pub mod gateway;
pub mod relay;

/// Re-exports for fuzz targets. Not part of the public API.
#[doc(hidden)]
pub mod fuzz_api {
    use crate::gateway::PushNotificationRequest;

    /// Parse a button identifier the way a click is parsed.
    pub fn parse_custom_id(raw: &str) -> bool {
        crate::relay::CustomId::parse(raw)
            .and_then(|id| id.fight_id_number())
            .is_ok()
    }

    /// Decode and validate a push body the way the HTTP handler does.
    pub fn decode_push_body(body: &[u8]) -> bool {
        serde_json::from_slice::<PushNotificationRequest>(body)
            .ok()
            .is_some_and(|req| req.into_task().is_ok())
    }

    /// Decode a Brain reply body.
    pub fn decode_brain_reply(body: &[u8]) -> bool {
        serde_json::from_slice::<crate::brain::BrainReply>(body).is_ok()
    }
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

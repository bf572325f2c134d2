pub mod base;
#[cfg(feature = "channel-discord")]
pub mod discord;

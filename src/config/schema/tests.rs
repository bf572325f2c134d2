use super::*;

fn valid_config() -> Config {
    let mut config = Config::default();
    config.discord.token = "discord-token".to_string();
    config.brain.secret_key = "s3cret".to_string();
    config.brain.url = "https://brain.example.com".to_string();
    config
}

#[test]
fn test_empty_json_uses_defaults() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config.brain.timeout_secs, 30);
    assert_eq!(config.brain.message_path, "/bot_handler");
    assert_eq!(config.brain.interaction_path, "/fight_action_discord");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.queue_capacity, 1000);
}

#[test]
fn test_camel_case_keys() {
    let config: Config = serde_json::from_value(serde_json::json!({
        "brain": {
            "url": "https://brain.example.com",
            "secretKey": "abc",
            "timeoutSecs": 5,
            "messagePath": "/msg"
        },
        "server": {"statusText": "alive", "queueCapacity": 10}
    }))
    .unwrap();
    assert_eq!(config.brain.secret_key, "abc");
    assert_eq!(config.brain.timeout_secs, 5);
    assert_eq!(config.brain.message_path, "/msg");
    assert_eq!(config.brain.interaction_path, "/fight_action_discord");
    assert_eq!(config.server.status_text, "alive");
    assert_eq!(config.server.queue_capacity, 10);
}

#[test]
fn test_valid_config_passes() {
    assert!(valid_config().validate().is_ok());
}

#[test]
fn test_missing_token_rejected() {
    let mut config = valid_config();
    config.discord.token = "  ".to_string();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("discord.token"));
}

#[test]
fn test_missing_secret_rejected() {
    let mut config = valid_config();
    config.brain.secret_key.clear();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("brain.secretKey"));
}

#[test]
fn test_whitespace_secret_rejected() {
    let mut config = valid_config();
    config.brain.secret_key = " \t ".to_string();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("brain.secretKey"));
}

#[test]
fn test_missing_brain_url_rejected() {
    let mut config = valid_config();
    config.brain.url.clear();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("brain.url"));
}

#[test]
fn test_non_http_brain_url_rejected() {
    let mut config = valid_config();
    config.brain.url = "ftp://brain.example.com".to_string();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("http or https"));
}

#[test]
fn test_zero_timeout_rejected() {
    let mut config = valid_config();
    config.brain.timeout_secs = 0;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("timeoutSecs"));
}

#[test]
fn test_relative_path_rejected() {
    let mut config = valid_config();
    config.brain.interaction_path = "fight_action_discord".to_string();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("interactionPath"));
}

#[test]
fn test_zero_queue_capacity_rejected() {
    let mut config = valid_config();
    config.server.queue_capacity = 0;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("queueCapacity"));
}

#[test]
fn test_debug_redacts_secrets() {
    let config = valid_config();
    let debug = format!("{:?}", config);
    assert!(!debug.contains("discord-token"));
    assert!(!debug.contains("s3cret"));
    assert!(debug.contains("[REDACTED]"));
    assert!(debug.contains("brain.example.com"));
}

#[test]
fn test_debug_marks_empty_secrets() {
    let debug = format!("{:?}", DiscordConfig::default());
    assert!(debug.contains("[empty]"));
}

use super::*;
use serde_json::json;

fn reply(value: serde_json::Value) -> BrainReply {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_empty_reply_has_nothing_to_do() {
    let r = reply(json!({}));
    assert_eq!(r, BrainReply::default());
    assert!(r.text().is_none());
    assert!(r.confirmation().is_none());
    assert!(r.notification().is_none());
    assert!(r.pending_actions().is_empty());
}

#[test]
fn test_unknown_fields_ignored() {
    let r = reply(json!({"text": "Hello", "mood": "grumpy", "version": 3}));
    assert_eq!(r.text(), Some("Hello"));
}

#[test]
fn test_nulls_are_absent() {
    let r = reply(json!({
        "text": null,
        "action_required": null,
        "actions": null,
        "notify_user_id": null
    }));
    assert!(r.text().is_none());
    assert!(r.pending_actions().is_empty());
    assert!(r.notification().is_none());
}

#[test]
fn test_empty_strings_are_absent() {
    let r = reply(json!({"text": "", "confirmation_text": ""}));
    assert!(r.text().is_none());
    assert!(r.confirmation().is_none());
}

#[test]
fn test_actions_ignored_without_action_required() {
    let r = reply(json!({
        "action_required": false,
        "actions": [{"type": "SEND_DM", "target_user_id": "1", "message_content": "hi"}]
    }));
    assert!(r.pending_actions().is_empty());
}

#[test]
fn test_send_dm_action_decodes() {
    let r = reply(json!({
        "action_required": true,
        "actions": [{"type": "SEND_DM", "target_user_id": "123", "message_content": "hi"}]
    }));
    assert_eq!(
        r.pending_actions(),
        &[BrainAction::SendDm {
            target_user_id: "123".to_string(),
            message_content: "hi".to_string(),
        }]
    );
}

#[test]
fn test_numeric_ids_become_strings() {
    let r = reply(json!({
        "action_required": true,
        "actions": [{"type": "SEND_DM", "target_user_id": 987_654_321_012_345_678_u64, "message_content": "x"}],
        "notify_user_id": 42,
        "notification_text": "ping"
    }));
    assert_eq!(r.notification(), Some(("42", "ping")));
    match &r.pending_actions()[0] {
        BrainAction::SendDm { target_user_id, .. } => {
            assert_eq!(target_user_id, "987654321012345678");
        }
        BrainAction::Unknown => panic!("expected SendDm"),
    }
}

#[test]
fn test_unknown_action_type_is_tolerated() {
    let r = reply(json!({
        "action_required": true,
        "actions": [
            {"type": "PLAY_SOUND", "sound": "gong"},
            {"type": "SEND_DM", "target_user_id": "5", "message_content": "hi"}
        ]
    }));
    assert_eq!(r.pending_actions().len(), 2);
    assert_eq!(r.pending_actions()[0], BrainAction::Unknown);
}

#[test]
fn test_notification_needs_both_halves() {
    let r = reply(json!({"notification_text": "You were challenged"}));
    assert!(r.notification().is_none());
    let r = reply(json!({"notify_user_id": "123"}));
    assert!(r.notification().is_none());
}

#[test]
fn test_request_bodies_use_snake_case() {
    let body = serde_json::to_value(InteractionRequest {
        user_id: "7",
        fight_id: 42,
        action: "accept",
    })
    .unwrap();
    assert_eq!(body, json!({"user_id": "7", "fight_id": 42, "action": "accept"}));

    let body = serde_json::to_value(MessageRequest {
        user_id: "7",
        message: "hello",
    })
    .unwrap();
    assert_eq!(body, json!({"user_id": "7", "message": "hello"}));
}

#[test]
fn test_malformed_action_keeps_reply_text() {
    let r: BrainReply = serde_json::from_str(
        r#"{"text":"Hello","action_required":false,"actions":[{"type":"SEND_DM"}]}"#,
    )
    .unwrap();
    assert_eq!(r.text(), Some("Hello"));
    assert!(r.pending_actions().is_empty());
}

#[test]
fn test_untyped_action_becomes_unknown() {
    let r: BrainReply = serde_json::from_str(
        r#"{"text":"Hello","action_required":true,"actions":[
            {"message_content":"x"},
            {"type":"SEND_DM","target_user_id":"5","message_content":"hi"}
        ]}"#,
    )
    .unwrap();
    assert_eq!(r.text(), Some("Hello"));
    assert_eq!(
        r.pending_actions(),
        &[
            BrainAction::Unknown,
            BrainAction::SendDm {
                target_user_id: "5".to_string(),
                message_content: "hi".to_string(),
            },
        ]
    );
}

#[test]
fn test_non_list_actions_treated_as_absent() {
    let r = reply(json!({"text": "Hello", "action_required": true, "actions": "SEND_DM"}));
    assert_eq!(r.text(), Some("Hello"));
    assert!(r.actions.is_none());
    assert!(r.pending_actions().is_empty());
}

use super::*;

#[test]
fn test_short_message_no_split() {
    let result = split_message("hello world", 100);
    assert_eq!(result, vec!["hello world"]);
}

#[test]
fn test_exact_limit_no_split() {
    let msg = "a".repeat(MAX_MESSAGE_CHARS);
    let result = split_message(&msg, MAX_MESSAGE_CHARS);
    assert_eq!(result.len(), 1);
}

#[test]
fn test_split_prefers_newline() {
    let msg = "first line\nsecond line\nthird line";
    let result = split_message(msg, 20);
    assert_eq!(result[0], "first line");
    assert_eq!(result[1], "second line");
    assert_eq!(result[2], "third line");
}

#[test]
fn test_hard_cut_without_newline() {
    let msg = "a".repeat(250);
    let result = split_message(&msg, 100);
    assert_eq!(result.len(), 3);
    assert_eq!(result[0].len(), 100);
    assert_eq!(result[1].len(), 100);
    assert_eq!(result[2].len(), 50);
}

#[test]
fn test_limit_counts_characters_not_bytes() {
    // 4-byte chars: 30 of them fit in a 30-char limit even though that's 120 bytes
    let msg = "\u{1F600}".repeat(30);
    assert_eq!(split_message(&msg, 30).len(), 1);

    let result = split_message(&msg, 10);
    assert_eq!(result.len(), 3);
    for chunk in &result {
        assert_eq!(chunk.chars().count(), 10);
        assert!(chunk.chars().all(|c| c == '\u{1F600}'));
    }
}

#[test]
fn test_no_empty_chunks() {
    let msg = format!("{}\n\n\n{}", "a".repeat(8), "b".repeat(8));
    let result = split_message(&msg, 9);
    assert!(result.iter().all(|c| !c.trim().is_empty()));
    assert_eq!(result.first().unwrap(), &"a".repeat(8));
    assert_eq!(result.last().unwrap(), &"b".repeat(8));
}

#[test]
fn test_content_preserved_across_chunks() {
    let msg = "word ".repeat(900);
    let result = split_message(msg.trim_end(), MAX_MESSAGE_CHARS);
    assert!(result.iter().all(|c| c.chars().count() <= MAX_MESSAGE_CHARS));
    assert_eq!(result.concat(), msg.trim_end());
}

#[test]
fn test_zero_limit_does_not_loop() {
    let result = split_message("abc", 0);
    assert_eq!(result, vec!["a", "b", "c"]);
}

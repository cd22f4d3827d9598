//! Edge case tests for chatweave
//!
//! Transcript shapes that regular exports rarely contain but the pipeline
//! must still handle.

use std::path::Path;

use chatweave::config::PipelineConfig;
use chatweave::core::{Pipeline, Transcript};
use chatweave::parsing::tokenize;

fn process(text: &str) -> Transcript {
    Pipeline::new(PipelineConfig::new())
        .unwrap()
        .process_str(text, Path::new("edge"))
}

// =========================================================================
// Encoding and line endings
// =========================================================================

#[test]
fn test_byte_order_mark_and_crlf() {
    let text = "\u{feff}[1.1.2022, 10:00] Alice: one\r\nmore\r\n[1.1.2022, 10:01] Bob: two\r\n";
    let transcript = process(text);

    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript.messages[0].author, "Alice");
    assert_eq!(transcript.messages[0].display_text, "one<br>more");
    assert_eq!(transcript.messages[1].display_text, "two");
}

#[test]
fn test_unicode_authors_and_bodies() {
    let text = "\
[1.1.2022, 10:00] Иван: Привет мир!
[1.1.2022, 10:01] 田中太郎: こんにちは世界！
[1.1.2022, 10:02] 🔥User🔥: Hello 👋
";
    let transcript = process(text);
    let authors: Vec<&str> = transcript.messages.iter().map(|m| m.author.as_str()).collect();
    assert_eq!(authors, vec!["Иван", "田中太郎", "🔥User🔥"]);
    assert_eq!(transcript.messages[1].display_text, "こんにちは世界！");
}

// =========================================================================
// Header shapes
// =========================================================================

#[test]
fn test_author_followed_by_empty_body() {
    let raw = tokenize("[1.1.2022, 10:00] Alice:\nfirst line\nsecond line");
    assert_eq!(raw.len(), 1);
    assert_eq!(raw[0].body, "first line\nsecond line");
}

#[test]
fn test_colon_in_body_splits_at_first_colon() {
    let raw = tokenize("[1.1.2022, 10:00] Alice: note: remember this");
    assert_eq!(raw[0].author, "Alice");
    assert_eq!(raw[0].body, "note: remember this");
}

#[test]
fn test_out_of_range_time_folds() {
    let text = "[1.1.2022, 10:00] Alice: ok\n[1.1.2022, 24:00] Bob: bad hour\n[29.2.2021, 10:00] Bob: no leap day";
    let raw = tokenize(text);
    assert_eq!(raw.len(), 1);
    assert_eq!(raw[0].body.lines().count(), 3);
}

#[test]
fn test_leap_day_is_valid() {
    let raw = tokenize("[29.2.2020, 23:59] Alice: leap");
    assert_eq!(raw.len(), 1);
    assert_eq!(raw[0].timestamp.to_string(), "2020-02-29 23:59:00");
}

#[test]
fn test_only_preamble_yields_nothing() {
    let transcript = process("Messages are end-to-end encrypted.\nNothing else here.\n");
    assert!(transcript.is_empty());
    assert!(transcript.contexts.is_empty());
}

#[test]
fn test_empty_transcript() {
    let transcript = process("");
    assert!(transcript.is_empty());
    assert_eq!(transcript.stats().messages, 0);
}

// =========================================================================
// Markers
// =========================================================================

#[test]
fn test_link_inside_caption_still_counts() {
    let text = "[1.1.2022, 10:00] Alice: Bild: see www.example.de <a1b2c3d4-0000-4000-8000-000000000001.jpg>";
    let msg = &process(text).messages[0];

    assert!(msg.has_link);
    assert_eq!(msg.attachments.len(), 1);
    assert_eq!(
        msg.display_text,
        r#"see <a href="//www.example.de" target="_blank">www.example.de</a>"#
    );
}

#[test]
fn test_geo_without_label() {
    let msg = &process("[1.1.2022, 10:00] Bob: <geo:-33.9249,18.4241>").messages[0];
    assert_eq!(msg.display_text, "");
    assert_eq!(msg.location.unwrap().to_string(), "-33.9249,18.4241");
    assert!(msg.has_media());
}

#[test]
fn test_malformed_geo_is_plain_text() {
    let msg = &process("[1.1.2022, 10:00] Bob: Home <geo:north,east>").messages[0];
    assert!(msg.location.is_none());
    assert_eq!(msg.display_text, "Home &lt;geo:north,east&gt;");
    assert!(msg.is_media_free());
}

#[test]
fn test_angle_brackets_without_identifier() {
    let msg = &process("[1.1.2022, 10:00] Bob: Bild <not a file>").messages[0];
    assert!(msg.attachments.is_empty());
    assert_eq!(msg.display_text, "Bild &lt;not a file&gt;");
}

#[test]
fn test_long_body() {
    let body = "x".repeat(100_000);
    let transcript = process(&format!("[1.1.2022, 10:00] Alice: {body}"));
    assert_eq!(transcript.messages[0].display_text.len(), 100_000);
}

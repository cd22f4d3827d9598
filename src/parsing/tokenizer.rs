//! Header tokenizer for exported chat transcripts.
//!
//! A transcript is a sequence of messages, each starting with a header line:
//!
//! ```text
//! [4.3.2021, 9:05] Alice: Morning!
//! [4.3.2021, 9:06] ~Bob: Hi
//! second line of Bob's message
//! ```
//!
//! A body runs until the next line that is a complete, valid header. Lines that
//! merely resemble a header (wrong date arity, impossible date, missing author)
//! are continuation lines of the previous message.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use tracing::debug;

/// `[D.M.YYYY, H:MM] Author: Body`
static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(\d{1,2})\.(\d{1,2})\.(\d{4}),\s(\d{1,2}):(\d{2})\]\s(.+?):(?:\s(.*))?$")
        .expect("header pattern is valid")
});

/// Marker prepended to names that come from a nickname override.
const NICKNAME_MARKER: char = '~';

/// One message as it appears in the transcript, before enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    /// Sender name, nickname marker removed.
    pub author: String,
    /// Local timestamp from the header, minute precision.
    pub timestamp: NaiveDateTime,
    /// Body text; continuation lines are joined with `\n`.
    pub body: String,
}

impl RawMessage {
    pub fn new(author: impl Into<String>, timestamp: NaiveDateTime, body: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            timestamp,
            body: body.into(),
        }
    }
}

/// Parses a single header line.
///
/// Returns the message with its first body line, or `None` if the line is not
/// a valid header.
pub fn parse_header(line: &str) -> Option<RawMessage> {
    parse_header_line(line).map(|(msg, _)| msg)
}

/// Like [`parse_header`], also reporting whether the header carried any body
/// text after `Author:`.
fn parse_header_line(line: &str) -> Option<(RawMessage, bool)> {
    let caps = HEADER.captures(line)?;

    let number = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
    let day = number(1)?;
    let month = number(2)?;
    let year = caps.get(3)?.as_str().parse::<i32>().ok()?;
    let hour = number(4)?;
    let minute = number(5)?;

    let timestamp = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)?;

    let author = caps.get(6)?.as_str();
    let author = author.strip_prefix(NICKNAME_MARKER).unwrap_or(author);
    let body = caps.get(7);
    let has_body = body.is_some();
    let body = body.map_or("", |m| m.as_str());

    Some((RawMessage::new(author, timestamp, body), has_body))
}

/// Splits a transcript into messages in transcript order.
///
/// Text before the first header is dropped. An empty or header-less
/// transcript yields an empty vector.
pub fn tokenize(text: &str) -> Vec<RawMessage> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut messages: Vec<RawMessage> = Vec::new();
    // Set when a header ended right after `Author:`; the next line is then the
    // first body line rather than a continuation.
    let mut awaiting_body = false;
    let mut folded = 0usize;

    for line in text.lines() {
        if let Some((msg, has_body)) = parse_header_line(line) {
            awaiting_body = !has_body;
            messages.push(msg);
            continue;
        }

        // Continuation of previous message (multiline)
        if let Some(last) = messages.last_mut() {
            if awaiting_body {
                last.body.push_str(line);
                awaiting_body = false;
            } else {
                last.body.push('\n');
                last.body.push_str(line);
            }
            folded += 1;
        }
        // If no previous message, skip orphan line
    }

    debug!(
        messages = messages.len(),
        continuation_lines = folded,
        "tokenized transcript"
    );

    messages
}

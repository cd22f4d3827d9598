//! Flat per-message records shared by all writers.

use serde::{Deserialize, Serialize};

use crate::core::context::ContextSet;
use crate::core::processor::Transcript;
use crate::message::{AttachmentKind, EnrichedMessage};

/// Separator between storage paths when one slot holds several attachments.
pub const SLOT_SEPARATOR: &str = "|";

/// One output record per message.
///
/// Columns follow the message table layout: identity, timestamp parts,
/// display HTML, one slot per attachment kind, link and location facts, and
/// the context ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRow {
    pub message_id: u64,
    pub chat: String,
    /// 1-based position of the transcript in the run.
    pub chat_id: usize,
    pub author: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub message: String,
    pub has_no_media: bool,
    pub image: Option<String>,
    pub video: Option<String>,
    pub audio: Option<String>,
    pub file: Option<String>,
    /// `lat,lon`
    pub location: Option<String>,
    pub has_link: bool,
    pub is_media_missing: bool,
    /// Comma-joined context ids, target included.
    pub context: String,
}

impl MessageRow {
    /// Column names in record order.
    pub const HEADER: [&'static str; 16] = [
        "message_id",
        "chat",
        "chat_id",
        "author",
        "date",
        "time",
        "message",
        "has_no_media",
        "image",
        "video",
        "audio",
        "file",
        "location",
        "has_link",
        "is_media_missing",
        "context",
    ];

    pub fn new(chat: &str, chat_id: usize, msg: &EnrichedMessage, context: &ContextSet) -> Self {
        Self {
            message_id: msg.id,
            chat: chat.to_string(),
            chat_id,
            author: msg.author.clone(),
            date: msg.date_string(),
            time: msg.time_string(),
            message: msg.display_text.clone(),
            has_no_media: msg.is_media_free(),
            image: slot(msg, AttachmentKind::Image),
            video: slot(msg, AttachmentKind::Video),
            audio: slot(msg, AttachmentKind::Audio),
            file: slot(msg, AttachmentKind::File),
            location: msg.location.map(|point| point.to_string()),
            has_link: msg.has_link,
            is_media_missing: msg.is_media_missing,
            context: context.to_string(),
        }
    }
}

fn slot(msg: &EnrichedMessage, kind: AttachmentKind) -> Option<String> {
    let paths: Vec<&str> = msg
        .attachments
        .iter()
        .filter(|a| a.kind == kind)
        .map(|a| a.storage_path.as_str())
        .collect();

    if paths.is_empty() {
        None
    } else {
        Some(paths.join(SLOT_SEPARATOR))
    }
}

/// Rows for every message of every transcript, numbering transcripts from 1.
pub fn rows(transcripts: &[Transcript]) -> impl Iterator<Item = MessageRow> + '_ {
    transcripts.iter().enumerate().flat_map(|(i, transcript)| {
        transcript
            .iter()
            .map(move |(msg, ctx)| MessageRow::new(&transcript.chat, i + 1, msg, ctx))
    })
}

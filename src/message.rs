//! Enriched message records handed to sinks.
//!
//! [`EnrichedMessage`] is what every sink consumes: the author, the local
//! timestamp, HTML-safe display text and the classification facts extracted
//! from the body (attachments, links, location).
//!
//! # Example
//!
//! ```
//! use chatweave::message::{Attachment, AttachmentKind, EnrichedMessage};
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2021, 3, 4).unwrap().and_hms_opt(9, 5, 0).unwrap();
//! let msg = EnrichedMessage::new(0, "Alice", ts, "Hello!");
//!
//! assert_eq!(msg.date_string(), "2021-03-04");
//! assert_eq!(msg.time_string(), "09:05");
//! assert!(msg.is_media_free());
//! ```

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Classification of an embedded attachment marker.
///
/// Derived from the marker keyword, never from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Video,
    Audio,
    File,
}

impl AttachmentKind {
    /// Returns all kinds in slot order.
    pub fn all() -> &'static [AttachmentKind] {
        &[
            AttachmentKind::Image,
            AttachmentKind::Video,
            AttachmentKind::Audio,
            AttachmentKind::File,
        ]
    }
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachmentKind::Image => write!(f, "image"),
            AttachmentKind::Video => write!(f, "video"),
            AttachmentKind::Audio => write!(f, "audio"),
            AttachmentKind::File => write!(f, "file"),
        }
    }
}

/// One media or file reference found in a message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Image, video, audio or generic file.
    pub kind: AttachmentKind,

    /// Caption written next to the marker. Empty when the sender added none.
    pub display_name: String,

    /// Transcript directory name joined with the opaque file identifier,
    /// e.g. `Alice/3fa2c1d0-....jpg`.
    pub storage_path: String,

    /// Whether the referenced file exists next to the transcript.
    pub present: bool,
}

/// A location shared in a message.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Formats as `lat,lon`, the form sinks store.
impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// A transcript message after media, link and location extraction.
///
/// # Invariants
///
/// - `id` is unique within one transcript and increases in transcript order.
/// - `display_text` is HTML-safe: plain text is escaped exactly once, line
///   breaks are `<br>`, and links are `<a>` elements.
/// - [`has_media`](Self::has_media) is derived, never stored, so it always
///   equals "has attachment OR has link OR has location".
///
/// # Serialization
///
/// Optional fields are omitted when `None` and empty attachment lists are
/// skipped, following the same conventions as the output rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedMessage {
    /// Sequential id, assigned once in transcript order.
    pub id: u64,

    /// Sender name with any nickname marker (`~`) removed.
    pub author: String,

    /// Local, unlabeled timestamp taken verbatim from the header.
    pub timestamp: NaiveDateTime,

    /// HTML display text.
    pub display_text: String,

    /// Attachments in marker order.
    ///
    /// In the default compatibility mode this holds at most one entry per
    /// [`AttachmentKind`]; a later marker of the same kind replaces the earlier
    /// one. See [`AttachmentMode`](crate::config::AttachmentMode).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,

    /// Whether the (post-attachment) body contained at least one URL.
    pub has_link: bool,

    /// Shared location, if the body carried a geo marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,

    /// Whether any referenced attachment file is missing on disk.
    pub is_media_missing: bool,
}

impl EnrichedMessage {
    /// Creates a media-free message.
    pub fn new(
        id: u64,
        author: impl Into<String>,
        timestamp: NaiveDateTime,
        display_text: impl Into<String>,
    ) -> Self {
        Self {
            id,
            author: author.into(),
            timestamp,
            display_text: display_text.into(),
            attachments: Vec::new(),
            has_link: false,
            location: None,
            is_media_missing: false,
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        if !attachment.present {
            self.is_media_missing = true;
        }
        self.attachments.push(attachment);
        self
    }

    #[must_use]
    pub fn with_link(mut self) -> Self {
        self.has_link = true;
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: GeoPoint) -> Self {
        self.location = Some(location);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Calendar date of the message.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Wall-clock time of the message.
    pub fn time(&self) -> NaiveTime {
        self.timestamp.time()
    }

    /// Sortable `YYYY-MM-DD` date.
    pub fn date_string(&self) -> String {
        self.timestamp.format("%Y-%m-%d").to_string()
    }

    /// Zero-padded `HH:MM` time.
    pub fn time_string(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }

    /// True iff an attachment, a link or a location was found.
    pub fn has_media(&self) -> bool {
        !self.attachments.is_empty() || self.has_link || self.location.is_some()
    }

    /// Inverse of [`has_media`](Self::has_media).
    pub fn is_media_free(&self) -> bool {
        !self.has_media()
    }

    /// The last attachment in marker order.
    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachments.last()
    }

    /// The last attachment of the given kind.
    pub fn attachment_of(&self, kind: AttachmentKind) -> Option<&Attachment> {
        self.attachments.iter().rev().find(|a| a.kind == kind)
    }
}

//! Attachment marker extraction.
//!
//! Exports reference media files inline:
//!
//! ```text
//! Bild: Sunset at the lake <3fa2c1d0-7c1e-4b8e-9d7a-0c5b2e6f1a9b.jpg>
//! Audio (00:42) <0f1e2d3c4b5a6978-20210304.m4a>
//! ```
//!
//! A marker is a keyword, an optional `(MM:SS)` duration, a caption and an
//! opaque identifier in angle brackets. The identifier names a file stored in
//! the same directory as the transcript. Once a body holds a marker, only the
//! captions are kept: text around the markers is dropped, so a URL next to an
//! attachment does not make the message a link.

use std::path::Path;

use regex::Regex;
use tracing::debug;

use crate::config::MarkerKeywords;
use crate::error::{ChatweaveError, Result};
use crate::message::{Attachment, AttachmentKind};
use crate::parsing::markup::{Span, apply_spans};

/// Identifier: 8 or 16 hex digits, a dash, a UUID or date coded suffix and a
/// short lowercase extension.
const IDENTIFIER_PATTERN: &str = r"(?:[a-f0-9]{8}|[a-f0-9]{16})-[^<>\s]*?\.[a-z0-9]{3,4}";

/// One attachment marker found in a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaMarker {
    pub start: usize,
    pub end: usize,
    pub kind: AttachmentKind,
    pub caption: String,
    pub identifier: String,
}

/// Result of scanning a body for attachment markers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaScan {
    /// The body when it has no markers, otherwise every caption on its own
    /// line.
    pub residual: String,
    /// Every attachment, in marker order.
    pub attachments: Vec<Attachment>,
}

impl MediaScan {
    /// Whether any referenced file is missing on disk.
    pub fn any_missing(&self) -> bool {
        self.attachments.iter().any(|a| !a.present)
    }

    /// Caption of the last marker, or the whole body when there is none.
    pub fn last_caption(&self) -> &str {
        self.attachments
            .last()
            .map_or(self.residual.as_str(), |a| a.display_name.as_str())
    }
}

/// Finds and resolves attachment markers.
#[derive(Debug, Clone)]
pub struct MediaExtractor {
    pattern: Regex,
    keywords: MarkerKeywords,
}

impl MediaExtractor {
    /// Builds an extractor for the given marker vocabulary.
    pub fn new(keywords: &MarkerKeywords) -> Result<Self> {
        keywords.validate()?;

        let alternation = keywords
            .attachment_keywords()
            .into_iter()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");

        let pattern = format!(
            r"(?s)\b({alternation})(?::\s*|\s+)(?:\(\d{{1,2}}:\d{{2}}\)\s*)?(.*?)\s*<({IDENTIFIER_PATTERN})>"
        );
        let pattern = Regex::new(&pattern)
            .map_err(|e| ChatweaveError::invalid_config(format!("attachment keywords: {e}")))?;

        Ok(Self {
            pattern,
            keywords: keywords.clone(),
        })
    }

    /// Finds all markers in `body`, in order.
    pub fn find_markers(&self, body: &str) -> Vec<MediaMarker> {
        self.pattern
            .captures_iter(body)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                Some(MediaMarker {
                    start: whole.start(),
                    end: whole.end(),
                    kind: self.keywords.classify(caps.get(1)?.as_str()),
                    caption: caps.get(2).map_or("", |m| m.as_str()).trim().to_string(),
                    identifier: caps.get(3)?.as_str().to_string(),
                })
            })
            .collect()
    }

    /// Reduces `body` to its marker captions and resolves the markers against
    /// `dir`.
    ///
    /// Missing files are reported through [`Attachment::present`], never as
    /// an error.
    pub fn extract(&self, body: &str, dir: &Path) -> MediaScan {
        let markers = self.find_markers(body);
        if markers.is_empty() {
            return MediaScan {
                residual: body.to_string(),
                attachments: Vec::new(),
            };
        }

        let dir_name = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        // Markers become captions, text between them a line break, and text
        // before the first or after the last marker disappears.
        let mut spans: Vec<Span<String>> = Vec::with_capacity(markers.len() * 2 + 1);
        let mut cursor = 0;
        for (i, marker) in markers.iter().enumerate() {
            let gap = if i == 0 { "" } else { "\n" };
            spans.push(Span::new(cursor, marker.start, gap.to_string()));
            spans.push(Span::new(marker.start, marker.end, marker.caption.clone()));
            cursor = marker.end;
        }
        spans.push(Span::new(cursor, body.len(), String::new()));

        let attachments = markers
            .into_iter()
            .map(|marker| {
                let present = dir.join(&marker.identifier).is_file();
                if !present {
                    debug!(
                        file = %marker.identifier,
                        dir = %dir.display(),
                        "attachment file missing"
                    );
                }
                let storage_path = if dir_name.is_empty() {
                    marker.identifier
                } else {
                    format!("{dir_name}/{}", marker.identifier)
                };
                Attachment {
                    kind: marker.kind,
                    display_name: marker.caption,
                    storage_path,
                    present,
                }
            })
            .collect();

        MediaScan {
            residual: apply_spans(body, &spans),
            attachments,
        }
    }
}

/// Keeps only the last attachment of each kind, preserving marker order.
pub fn retain_last_per_kind(attachments: &mut Vec<Attachment>) {
    let mut seen: Vec<AttachmentKind> = Vec::with_capacity(AttachmentKind::all().len());
    let mut kept: Vec<Attachment> = attachments
        .drain(..)
        .rev()
        .filter(|a| {
            if seen.contains(&a.kind) {
                false
            } else {
                seen.push(a.kind);
                true
            }
        })
        .collect();
    kept.reverse();
    *attachments = kept;
}

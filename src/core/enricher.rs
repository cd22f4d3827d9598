//! Message enrichment: tokenized messages in, [`EnrichedMessage`]s out.
//!
//! For every body the enricher runs, in this order:
//!
//! 1. attachment extraction, which reduces a body with markers to its captions
//! 2. link and location detection on what remains
//! 3. HTML rendering of the visible part (the place label for locations)
//!
//! It also owns the id sequence. Each transcript gets a fresh [`Enricher`]
//! (or a [`reset`](Enricher::reset)), so ids are ordinals within one
//! conversation.

use std::path::Path;

use tracing::debug;

use crate::config::{AttachmentMode, EnrichConfig};
use crate::error::Result;
use crate::message::{Attachment, EnrichedMessage, GeoPoint};
use crate::parsing::links::LinkExtractor;
use crate::parsing::markup::render_html;
use crate::parsing::media::{MediaExtractor, retain_last_per_kind};
use crate::parsing::tokenizer::RawMessage;

/// Everything extracted from one body, before an id is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedBody {
    pub display_text: String,
    pub attachments: Vec<Attachment>,
    pub has_link: bool,
    pub location: Option<GeoPoint>,
    pub is_media_missing: bool,
}

/// Turns [`RawMessage`]s into [`EnrichedMessage`]s with sequential ids.
///
/// # Example
///
/// ```rust
/// use chatweave::config::EnrichConfig;
/// use chatweave::core::Enricher;
/// use chatweave::parsing::tokenize;
/// use std::path::Path;
///
/// # fn main() -> chatweave::Result<()> {
/// let raw = tokenize("[4.3.2021, 9:05] Alice: see www.example.com\n[4.3.2021, 9:06] Bob: ok");
/// let mut enricher = Enricher::new(EnrichConfig::new())?;
/// let messages = enricher.enrich_all(raw, Path::new("Alice"));
///
/// assert_eq!(messages[0].id, 0);
/// assert!(messages[0].has_link);
/// assert_eq!(messages[1].id, 1);
/// assert!(messages[1].is_media_free());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Enricher {
    config: EnrichConfig,
    media: MediaExtractor,
    links: LinkExtractor,
    next_id: u64,
}

impl Enricher {
    /// Creates an enricher whose first id is `config.first_id`.
    pub fn new(config: EnrichConfig) -> Result<Self> {
        let media = MediaExtractor::new(&config.keywords)?;
        let links = LinkExtractor::new(&config.keywords)?;
        let next_id = config.first_id;

        Ok(Self {
            config,
            media,
            links,
            next_id,
        })
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &EnrichConfig {
        &self.config
    }

    /// The id the next enriched message will get.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Restarts the id sequence for a new transcript.
    pub fn reset(&mut self) {
        self.next_id = self.config.first_id;
    }

    /// Extracts attachments, links and location from `body` and renders the
    /// display text. Attachment files are looked up in `dir`.
    pub fn render_body(&self, body: &str, dir: &Path) -> RenderedBody {
        let scan = self.media.extract(body, dir);
        let is_media_missing = scan.any_missing();

        // With markers present only captions remain; last-wins keeps the
        // caption of the final marker.
        let residual = match self.config.attachment_mode {
            AttachmentMode::LastWinsPerKind => scan.last_caption().to_string(),
            AttachmentMode::KeepAll => scan.residual.clone(),
        };

        let mut attachments = scan.attachments;
        if self.config.attachment_mode == AttachmentMode::LastWinsPerKind {
            retain_last_per_kind(&mut attachments);
        }

        let found = self.links.scan(&residual);
        let display_text = render_html(&residual, found.visible_range(&residual), &found.links);

        RenderedBody {
            display_text,
            attachments,
            has_link: found.has_link(),
            location: found.geo.map(|geo| geo.point),
            is_media_missing,
        }
    }

    /// Enriches one message and assigns it the next id.
    pub fn enrich(&mut self, raw: RawMessage, dir: &Path) -> EnrichedMessage {
        let body = self.render_body(&raw.body, dir);

        let id = self.next_id;
        self.next_id += 1;

        EnrichedMessage {
            id,
            author: raw.author,
            timestamp: raw.timestamp,
            display_text: body.display_text,
            attachments: body.attachments,
            has_link: body.has_link,
            location: body.location,
            is_media_missing: body.is_media_missing,
        }
    }

    /// Enriches a whole transcript in order.
    pub fn enrich_all(&mut self, raw: Vec<RawMessage>, dir: &Path) -> Vec<EnrichedMessage> {
        let first = self.next_id;
        let messages: Vec<EnrichedMessage> = raw.into_iter().map(|m| self.enrich(m, dir)).collect();

        debug!(
            dir = %dir.display(),
            count = messages.len(),
            first_id = first,
            "enriched transcript"
        );

        messages
    }
}

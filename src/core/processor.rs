//! End-to-end processing of one conversation directory.
//!
//! A [`Pipeline`] reads the transcript file, tokenizes it, enriches every
//! message and computes the context windows. The result is a [`Transcript`]
//! ready for any sink.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::context::{ContextBuilder, ContextSet};
use super::enricher::Enricher;
use crate::config::PipelineConfig;
use crate::error::{ChatweaveError, Result};
use crate::message::EnrichedMessage;
use crate::parsing::tokenizer::tokenize;

/// One processed conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    /// Conversation name: the directory's base name.
    pub chat: String,
    /// Directory the transcript was read from.
    pub dir: PathBuf,
    pub messages: Vec<EnrichedMessage>,
    /// `contexts[i]` belongs to `messages[i]`.
    pub contexts: Vec<ContextSet>,
}

impl Transcript {
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Messages paired with their context windows.
    pub fn iter(&self) -> impl Iterator<Item = (&EnrichedMessage, &ContextSet)> {
        self.messages.iter().zip(&self.contexts)
    }

    pub fn stats(&self) -> TranscriptStats {
        TranscriptStats::from_messages(&self.messages)
    }
}

/// Counts of message facts for one transcript or a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptStats {
    pub messages: usize,
    pub media_free: usize,
    pub with_attachment: usize,
    pub with_link: usize,
    pub with_location: usize,
    pub media_missing: usize,
}

impl TranscriptStats {
    pub fn from_messages(messages: &[EnrichedMessage]) -> Self {
        let mut stats = Self::default();
        for msg in messages {
            stats.messages += 1;
            stats.media_free += usize::from(msg.is_media_free());
            stats.with_attachment += usize::from(!msg.attachments.is_empty());
            stats.with_link += usize::from(msg.has_link);
            stats.with_location += usize::from(msg.location.is_some());
            stats.media_missing += usize::from(msg.is_media_missing);
        }
        stats
    }

    /// Adds `other` into `self`, for run totals.
    pub fn merge(&mut self, other: &TranscriptStats) {
        self.messages += other.messages;
        self.media_free += other.media_free;
        self.with_attachment += other.with_attachment;
        self.with_link += other.with_link;
        self.with_location += other.with_location;
        self.media_missing += other.media_missing;
    }

    /// Share of messages without attachment, link or location, in percent.
    #[allow(clippy::cast_precision_loss)]
    pub fn media_free_ratio(&self) -> f64 {
        if self.messages == 0 {
            return 0.0;
        }
        self.media_free as f64 / self.messages as f64 * 100.0
    }
}

/// Tokenize, enrich and build contexts for transcript directories.
///
/// # Example
///
/// ```rust
/// use chatweave::config::PipelineConfig;
/// use chatweave::core::Pipeline;
/// use std::path::Path;
///
/// # fn main() -> chatweave::Result<()> {
/// let mut pipeline = Pipeline::new(PipelineConfig::new())?;
/// let transcript = pipeline.process_str(
///     "[1.2.2021, 10:00] Alice: hi\n[1.2.2021, 10:01] Bob: hello",
///     Path::new("Alice"),
/// );
///
/// assert_eq!(transcript.chat, "Alice");
/// assert_eq!(transcript.contexts[0].to_string(), "0,1");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    enricher: Enricher,
    context: ContextBuilder,
}

impl Pipeline {
    /// Validates `config` and compiles the marker patterns.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let enricher = Enricher::new(config.enrich.clone())?;
        let context = ContextBuilder::new(&config.context)?;

        Ok(Self {
            config,
            enricher,
            context,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Path of the transcript file inside `dir`.
    pub fn transcript_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.config.transcript_file_name)
    }

    /// Reads and processes the transcript file in `dir`.
    ///
    /// # Errors
    ///
    /// [`ChatweaveError::TranscriptNotFound`] if the directory has no
    /// transcript file, [`ChatweaveError::Io`] if it cannot be read.
    /// Invalid UTF-8 is replaced, not rejected.
    pub fn process_dir(&mut self, dir: &Path) -> Result<Transcript> {
        let path = self.transcript_path(dir);
        if !path.is_file() {
            return Err(ChatweaveError::transcript_not_found(
                dir,
                &self.config.transcript_file_name,
            ));
        }

        let bytes = fs::read(&path)?;
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), "transcript is not valid UTF-8, replacing invalid bytes");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };

        Ok(self.process_str(&text, dir))
    }

    /// Processes transcript text as if it had been read from `dir`.
    ///
    /// Attachment files are still looked up in `dir`.
    pub fn process_str(&mut self, text: &str, dir: &Path) -> Transcript {
        if !self.config.run_wide_ids {
            self.enricher.reset();
        }

        let raw = tokenize(text);
        let messages = self.enricher.enrich_all(raw, dir);
        let contexts = self.context.build_all(&messages);

        let chat = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        debug!(chat = %chat, messages = messages.len(), "processed transcript");

        Transcript {
            chat,
            dir: dir.to_path_buf(),
            messages,
            contexts,
        }
    }
}

/// Processes a single directory with the given configuration.
pub fn process_transcript(dir: &Path, config: PipelineConfig) -> Result<Transcript> {
    Pipeline::new(config)?.process_dir(dir)
}

//! Configuration types for the enrichment pipeline.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`MarkerKeywords`] - localized keywords that introduce attachment and
//!   location markers
//! - [`EnrichConfig`] - message enrichment settings
//! - [`ContextConfig`] - context window sizing
//! - [`PipelineConfig`] - everything needed to process a transcript directory
//!
//! # Example
//!
//! ```rust
//! use chatweave::config::{AttachmentMode, ContextConfig, EnrichConfig, PipelineConfig};
//!
//! let config = PipelineConfig::new()
//!     .with_enrich(EnrichConfig::new().with_attachment_mode(AttachmentMode::KeepAll))
//!     .with_context(ContextConfig::new().with_min_neighbors(3));
//!
//! assert!(config.validate().is_ok());
//! ```

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::{ChatweaveError, Result};
use crate::message::AttachmentKind;

/// Default transcript file name inside a conversation directory.
pub const DEFAULT_TRANSCRIPT_FILE: &str = "messages.txt";

/// How several attachment markers in one message are recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentMode {
    /// One slot per attachment kind; a later marker of the same kind replaces
    /// the earlier one. Two images in one message keep only the second.
    #[default]
    LastWinsPerKind,

    /// Every marker is kept, in order.
    KeepAll,
}

/// Keywords that introduce markers in the transcript text.
///
/// Exports are localized, so the same marker may start with `Bild` or
/// `Picture`. Each list is matched literally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerKeywords {
    pub image: Vec<String>,
    pub video: Vec<String>,
    pub audio: Vec<String>,
    pub file: Vec<String>,
    /// Optional prefix before a location label, e.g. `Ort: Office <geo:...>`.
    pub location: Vec<String>,
}

impl Default for MarkerKeywords {
    fn default() -> Self {
        fn words(list: &[&str]) -> Vec<String> {
            list.iter().map(|w| (*w).to_string()).collect()
        }

        Self {
            image: words(&["Bild", "Picture", "Image"]),
            video: words(&["Video"]),
            audio: words(&["Audio"]),
            file: words(&["Datei", "File"]),
            location: words(&["Ort", "Location"]),
        }
    }
}

impl MarkerKeywords {
    /// Creates the default German + English vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keywords for a single attachment kind.
    pub fn for_kind(&self, kind: AttachmentKind) -> &[String] {
        match kind {
            AttachmentKind::Image => &self.image,
            AttachmentKind::Video => &self.video,
            AttachmentKind::Audio => &self.audio,
            AttachmentKind::File => &self.file,
        }
    }

    /// Maps a matched keyword back to its kind.
    ///
    /// Unknown keywords classify as [`AttachmentKind::File`].
    pub fn classify(&self, keyword: &str) -> AttachmentKind {
        AttachmentKind::all()
            .iter()
            .copied()
            .find(|kind| self.for_kind(*kind).iter().any(|w| w == keyword))
            .unwrap_or(AttachmentKind::File)
    }

    /// Adds a keyword for the given kind.
    #[must_use]
    pub fn with_keyword(mut self, kind: AttachmentKind, keyword: impl Into<String>) -> Self {
        let list = match kind {
            AttachmentKind::Image => &mut self.image,
            AttachmentKind::Video => &mut self.video,
            AttachmentKind::Audio => &mut self.audio,
            AttachmentKind::File => &mut self.file,
        };
        list.push(keyword.into());
        self
    }

    /// Adds a location keyword.
    #[must_use]
    pub fn with_location_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.location.push(keyword.into());
        self
    }

    /// All attachment keywords, longest first so that alternations prefer the
    /// most specific word.
    pub(crate) fn attachment_keywords(&self) -> Vec<&str> {
        let mut all: Vec<&str> = AttachmentKind::all()
            .iter()
            .flat_map(|kind| self.for_kind(*kind).iter().map(String::as_str))
            .filter(|w| !w.is_empty())
            .collect();
        all.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        all.dedup();
        all
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.attachment_keywords().is_empty() {
            return Err(ChatweaveError::invalid_config(
                "at least one attachment keyword is required",
            ));
        }
        Ok(())
    }
}

/// Message enrichment settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnrichConfig {
    /// Marker vocabulary (default: German + English).
    pub keywords: MarkerKeywords,

    /// How multiple attachments per message are recorded (default: last wins per kind).
    pub attachment_mode: AttachmentMode,

    /// First id handed out for a transcript (default: 0).
    pub first_id: u64,
}

impl EnrichConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_keywords(mut self, keywords: MarkerKeywords) -> Self {
        self.keywords = keywords;
        self
    }

    #[must_use]
    pub fn with_attachment_mode(mut self, mode: AttachmentMode) -> Self {
        self.attachment_mode = mode;
        self
    }

    #[must_use]
    pub fn with_first_id(mut self, first_id: u64) -> Self {
        self.first_id = first_id;
        self
    }
}

/// Context window sizing.
///
/// A window always takes up to `min_neighbors` messages on each side, then
/// keeps extending while consecutive messages are at most `max_gap_secs`
/// apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Guaranteed neighbors on each side (default: 5)
    pub min_neighbors: usize,

    /// Largest gap between consecutive messages that still extends the window (default: 1800s)
    pub max_gap_secs: u64,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            min_neighbors: 5,
            max_gap_secs: 30 * 60,
        }
    }
}

impl ContextConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_min_neighbors(mut self, n: usize) -> Self {
        self.min_neighbors = n;
        self
    }

    #[must_use]
    pub fn with_max_gap_secs(mut self, secs: u64) -> Self {
        self.max_gap_secs = secs;
        self
    }

    /// The gap threshold as a duration, if representable.
    pub fn max_gap(&self) -> Option<TimeDelta> {
        i64::try_from(self.max_gap_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_neighbors == 0 {
            return Err(ChatweaveError::invalid_config(
                "context window needs at least one neighbor per side",
            ));
        }
        if self.max_gap().is_none() {
            return Err(ChatweaveError::invalid_config(format!(
                "max gap of {} seconds is out of range",
                self.max_gap_secs
            )));
        }
        Ok(())
    }
}

/// Settings for processing one transcript directory end to end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Name of the transcript file inside a conversation directory (default: `messages.txt`)
    pub transcript_file_name: String,

    pub enrich: EnrichConfig,

    pub context: ContextConfig,

    /// Continue the id sequence across transcripts instead of restarting it
    /// for each one (default: false)
    pub run_wide_ids: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            transcript_file_name: DEFAULT_TRANSCRIPT_FILE.to_string(),
            enrich: EnrichConfig::default(),
            context: ContextConfig::default(),
            run_wide_ids: false,
        }
    }
}

impl PipelineConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_transcript_file_name(mut self, name: impl Into<String>) -> Self {
        self.transcript_file_name = name.into();
        self
    }

    #[must_use]
    pub fn with_enrich(mut self, enrich: EnrichConfig) -> Self {
        self.enrich = enrich;
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: ContextConfig) -> Self {
        self.context = context;
        self
    }

    #[must_use]
    pub fn with_run_wide_ids(mut self, enabled: bool) -> Self {
        self.run_wide_ids = enabled;
        self
    }

    /// Rejects configurations that cannot produce meaningful output.
    pub fn validate(&self) -> Result<()> {
        if self.transcript_file_name.trim().is_empty() {
            return Err(ChatweaveError::invalid_config(
                "transcript file name must not be empty",
            ));
        }
        self.enrich.keywords.validate()?;
        self.context.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_defaults() {
        let config = ContextConfig::default();
        assert_eq!(config.min_neighbors, 5);
        assert_eq!(config.max_gap_secs, 1800);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_context_rejects_zero_neighbors() {
        let err = ContextConfig::new().with_min_neighbors(0).validate().unwrap_err();
        assert!(err.is_invalid_config());
    }

    #[test]
    fn test_context_rejects_huge_gap() {
        let err = ContextConfig::new().with_max_gap_secs(u64::MAX).validate().unwrap_err();
        assert!(err.is_invalid_config());
    }

    #[test]
    fn test_max_gap_duration() {
        let config = ContextConfig::new().with_max_gap_secs(90);
        assert_eq!(config.max_gap(), Some(TimeDelta::seconds(90)));
    }

    #[test]
    fn test_classify_keywords() {
        let keywords = MarkerKeywords::default();
        assert_eq!(keywords.classify("Bild"), AttachmentKind::Image);
        assert_eq!(keywords.classify("Picture"), AttachmentKind::Image);
        assert_eq!(keywords.classify("Video"), AttachmentKind::Video);
        assert_eq!(keywords.classify("Audio"), AttachmentKind::Audio);
        assert_eq!(keywords.classify("Datei"), AttachmentKind::File);
        assert_eq!(keywords.classify("unknown"), AttachmentKind::File);
    }

    #[test]
    fn test_custom_keyword() {
        let keywords = MarkerKeywords::default().with_keyword(AttachmentKind::Image, "Foto");
        assert_eq!(keywords.classify("Foto"), AttachmentKind::Image);
    }

    #[test]
    fn test_attachment_keywords_longest_first() {
        let keywords = MarkerKeywords::default();
        let all = keywords.attachment_keywords();
        assert_eq!(all[0], "Picture");
        assert!(all.windows(2).all(|w| w[0].len() >= w[1].len()));
    }

    #[test]
    fn test_empty_vocabulary_rejected() {
        let keywords = MarkerKeywords {
            image: vec![],
            video: vec![],
            audio: vec![],
            file: vec![String::new()],
            location: vec![],
        };
        let config = PipelineConfig::new().with_enrich(EnrichConfig::new().with_keywords(keywords));
        assert!(config.validate().unwrap_err().is_invalid_config());
    }

    #[test]
    fn test_empty_transcript_name_rejected() {
        let config = PipelineConfig::new().with_transcript_file_name("  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pipeline_serde_roundtrip() {
        let config = PipelineConfig::new()
            .with_enrich(EnrichConfig::new().with_attachment_mode(AttachmentMode::KeepAll));
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("keep_all"));
        let back: PipelineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}

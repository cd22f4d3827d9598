//! # Chatweave
//!
//! A Rust library for turning exported chat transcripts into enriched,
//! context-linked message records.
//!
//! ## Overview
//!
//! A transcript is a plain text file (`messages.txt`) inside a conversation
//! directory, with one header line per message:
//!
//! ```text
//! [4.3.2021, 9:05] Alice: Hi Bob!
//! [4.3.2021, 9:07] ~Bob: Bild: Sunset <3fa2c1d0-7c1e-4b8e-9d7a-0c5b2e6f1a9b.jpg>
//! ```
//!
//! Chatweave tokenizes it, extracts attachments, links and locations from
//! every body, renders HTML-safe display text, assigns ids and computes a
//! context window for each message: a fixed number of neighbors plus any
//! messages close enough in time to continue the conversation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatweave::prelude::*;
//! use std::path::Path;
//!
//! fn main() -> Result<()> {
//!     let config = PipelineConfig::new();
//!     let mut pipeline = Pipeline::new(config.clone())?;
//!
//!     let mut transcripts = Vec::new();
//!     for dir in discover_transcripts(Path::new("exports"), &config.transcript_file_name)? {
//!         transcripts.push(pipeline.process_dir(&dir)?);
//!     }
//!
//!     write_to_format(&transcripts, "messages.csv", OutputFormat::Csv)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`] - transcript text parsing
//!   - [`tokenize`](parsing::tokenize) - header tokenizer
//!   - [`MediaExtractor`](parsing::MediaExtractor), [`LinkExtractor`](parsing::LinkExtractor)
//! - [`core`] - enrichment, context windows, pipeline and writers
//!   - [`Enricher`](core::Enricher), [`ContextBuilder`](core::ContextBuilder)
//!   - [`Pipeline`](core::Pipeline), [`Transcript`](core::Transcript)
//!   - [`core::output`] - CSV, JSON and JSONL writers
//! - [`discovery`] - finding conversation directories
//! - [`config`] - configuration types
//! - [`format`] - [`OutputFormat`](format::OutputFormat) selection
//! - [`message`] - [`EnrichedMessage`] and its parts
//! - [`error`] - [`ChatweaveError`], [`Result`]
//! - [`prelude`] - convenient re-exports
//!
//! ## Logging
//!
//! The library emits [`tracing`] events and installs no subscriber. The
//! `chatweave` binary prints them to stderr, filtered by `RUST_LOG` or
//! `--log-level`.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod discovery;
pub mod error;
pub mod format;
pub mod message;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use error::{ChatweaveError, Result};
pub use message::EnrichedMessage;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatweave::prelude::*;
/// ```
pub mod prelude {
    pub use crate::EnrichedMessage;
    pub use crate::error::{ChatweaveError, Result};
    pub use crate::message::{Attachment, AttachmentKind, GeoPoint};

    pub use crate::config::{
        AttachmentMode, ContextConfig, EnrichConfig, MarkerKeywords, PipelineConfig,
    };

    pub use crate::core::{
        ContextBuilder, ContextSet, Enricher, Pipeline, Transcript, TranscriptStats,
    };
    pub use crate::discovery::discover_transcripts;
    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
    pub use crate::parsing::{RawMessage, tokenize};

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};
}

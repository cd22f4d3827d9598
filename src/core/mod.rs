//! Core processing logic for chatweave.
//!
//! This module contains:
//! - [`enricher`] - attachment, link and location extraction plus id assignment
//! - [`context`] - context windows around each message
//! - [`processor`] - the per-directory pipeline and statistics
//! - [`output`] - format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! use chatweave::config::PipelineConfig;
//! use chatweave::core::{Pipeline, TranscriptStats};
//! use std::path::Path;
//!
//! # fn main() -> chatweave::Result<()> {
//! let mut pipeline = Pipeline::new(PipelineConfig::new())?;
//! let transcript = pipeline.process_str("[2.5.2021, 18:30] Bob: hi", Path::new("Bob"));
//!
//! let mut total = TranscriptStats::default();
//! total.merge(&transcript.stats());
//! assert_eq!(total.messages, 1);
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod enricher;
pub mod output;
pub mod processor;

pub use context::{ContextBuilder, ContextSet};
pub use enricher::{Enricher, RenderedBody};
pub use processor::{Pipeline, Transcript, TranscriptStats, process_transcript};

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};

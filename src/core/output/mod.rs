//! Output format writers.
//!
//! Every writer emits one [`MessageRow`] per message, in run order:
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of rows - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one row per line - requires `json-output` feature
//!
//! `chat_id` is the 1-based position of a transcript in the slice handed to
//! the writer, so the same run always numbers its conversations the same way.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatweave::Result<()> {
//! use chatweave::config::PipelineConfig;
//! use chatweave::core::Pipeline;
//! use chatweave::core::output::{to_csv, write_jsonl};
//! use std::path::Path;
//!
//! let mut pipeline = Pipeline::new(PipelineConfig::new())?;
//! let transcripts = vec![pipeline.process_dir(Path::new("exports/Alice"))?];
//!
//! write_jsonl(&transcripts, "messages.jsonl")?;
//! let csv = to_csv(&transcripts)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;
mod row;

pub use row::{MessageRow, SLOT_SEPARATOR, rows};

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};

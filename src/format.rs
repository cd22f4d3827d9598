//! Output format selection.
//!
//! Library-level format types with no CLI framework dependency. The binary
//! parses `--format` into [`OutputFormat`] and hands the processed run to
//! [`write_to_format`].
//!
//! # Example
//!
//! ```rust
//! use chatweave::format::OutputFormat;
//!
//! let format = OutputFormat::from_path("run.ndjson").unwrap();
//! assert_eq!(format, OutputFormat::Jsonl);
//! assert_eq!(format.extension(), "jsonl");
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::processor::Transcript;
use crate::error::{ChatweaveError, Result};

/// Sink format for enriched messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Semicolon-separated values with a header row (default)
    #[default]
    Csv,

    /// One pretty-printed JSON array
    Json,

    /// One JSON object per line, also known as NDJSON
    Jsonl,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Returns all accepted format names, aliases included.
    pub fn all_names() -> &'static [&'static str] {
        &["csv", "json", "jsonl", "ndjson"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Csv, OutputFormat::Json, OutputFormat::Jsonl]
    }

    /// Cargo feature that provides the writer for this format.
    pub fn feature(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }

    /// Detects the format from a file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        ext.parse().map_err(|_| {
            ChatweaveError::invalid_format(
                "output",
                format!("Unknown file extension: '.{ext}'. Expected one of: csv, json, jsonl"),
            )
        })
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(format!(
                "Unknown format: '{s}'. Expected one of: {}",
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

fn feature_disabled(format: OutputFormat) -> ChatweaveError {
    ChatweaveError::invalid_format(
        "output",
        format!(
            "Output format {format} requires the '{}' feature to be enabled",
            format.feature()
        ),
    )
}

/// Writes every message of the run to `path` in the given format.
///
/// # Errors
///
/// Returns an error if the writer for `format` was compiled out or the file
/// cannot be written.
#[allow(unused_variables)]
pub fn write_to_format(
    transcripts: &[Transcript],
    path: impl AsRef<Path>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(transcripts, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(transcripts, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(transcripts, path),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}

/// Renders every message of the run as a string in the given format.
#[allow(unused_variables)]
pub fn to_format_string(transcripts: &[Transcript], format: OutputFormat) -> Result<String> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(transcripts),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(transcripts),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(transcripts),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}

//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`FormatArg`] - output format choices as clap values
//!
//! [`Args::pipeline_config`] turns the parsed flags into the library's
//! [`PipelineConfig`], so everything the binary can do is also reachable
//! from code.
//!
//! ```rust
//! use chatweave::cli::Args;
//! use clap::Parser;
//!
//! let args = Args::parse_from(["chatweave", "exports", "--context-size", "3"]);
//! let config = args.pipeline_config();
//! assert_eq!(config.context.min_neighbors, 3);
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{
    AttachmentMode, ContextConfig, DEFAULT_TRANSCRIPT_FILE, EnrichConfig, PipelineConfig,
};
use crate::format::OutputFormat;

/// Default output file stem; the extension follows the format.
pub const DEFAULT_OUTPUT_STEM: &str = "chatweave_messages";

/// Turn exported chat transcripts into enriched, context-linked message
/// records.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatweave")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatweave exports/
    chatweave exports/ -f jsonl -o messages.jsonl
    chatweave exports/ --keep-all-attachments --context-size 3 --max-gap 900
    RUST_LOG=chatweave=debug chatweave exports/")]
pub struct Args {
    /// Root folder searched for conversation directories
    pub folder: PathBuf,

    /// Path to output file [default: chatweave_messages.<format>]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: FormatArg,

    /// Transcript file expected in each conversation directory
    #[arg(long, value_name = "NAME", default_value = DEFAULT_TRANSCRIPT_FILE)]
    pub transcript_name: String,

    /// Keep every attachment instead of the last one per kind
    #[arg(long)]
    pub keep_all_attachments: bool,

    /// Continue message ids across conversations instead of restarting at 0
    #[arg(long)]
    pub run_wide_ids: bool,

    /// Messages always included on each side of a context window
    #[arg(long, value_name = "N", default_value_t = 5)]
    pub context_size: usize,

    /// Largest gap in seconds that still extends a context window
    #[arg(long, value_name = "SECONDS", default_value_t = 1800)]
    pub max_gap: u64,

    /// Log level when RUST_LOG is not set
    #[arg(
        long,
        default_value = "warn",
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    pub log_level: String,
}

impl Args {
    /// Library configuration equivalent to these flags.
    pub fn pipeline_config(&self) -> PipelineConfig {
        let mode = if self.keep_all_attachments {
            AttachmentMode::KeepAll
        } else {
            AttachmentMode::LastWinsPerKind
        };

        PipelineConfig::new()
            .with_transcript_file_name(&self.transcript_name)
            .with_enrich(EnrichConfig::new().with_attachment_mode(mode))
            .with_context(
                ContextConfig::new()
                    .with_min_neighbors(self.context_size)
                    .with_max_gap_secs(self.max_gap),
            )
            .with_run_wide_ids(self.run_wide_ids)
    }

    /// The output path, defaulting to [`DEFAULT_OUTPUT_STEM`] with the
    /// format's extension.
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let format: OutputFormat = self.format.into();
            PathBuf::from(format!("{DEFAULT_OUTPUT_STEM}.{}", format.extension()))
        })
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatArg {
    /// CSV with semicolon delimiter
    #[default]
    Csv,

    /// JSON array of rows
    Json,

    /// JSON Lines - one row per line
    #[value(alias = "ndjson")]
    Jsonl,
}

// Conversion to library format type
impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> OutputFormat {
        match format {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Jsonl => OutputFormat::Jsonl,
        }
    }
}

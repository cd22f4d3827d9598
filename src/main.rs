//! # chatweave CLI
//!
//! Command-line interface for the chatweave library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use chatweave::ChatweaveError;
use chatweave::cli::Args;
use chatweave::core::{Pipeline, TranscriptStats};
use chatweave::discovery::discover_transcripts;
use chatweave::format::{OutputFormat, write_to_format};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_subscriber(&args.log_level);

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Logs go to stderr so the run summary on stdout stays clean.
fn init_subscriber(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run(args: &Args) -> Result<(), ChatweaveError> {
    let start = Instant::now();
    let config = args.pipeline_config();
    let format: OutputFormat = args.format.into();
    let output_path = args.output_path();

    let mut pipeline = Pipeline::new(config)?;
    let dirs = discover_transcripts(&args.folder, &pipeline.config().transcript_file_name)?;
    info!(root = %args.folder.display(), count = dirs.len(), "starting run");

    let mut transcripts = Vec::with_capacity(dirs.len());
    let mut totals = TranscriptStats::default();
    let mut skipped = 0usize;

    for dir in &dirs {
        match pipeline.process_dir(dir) {
            Ok(transcript) => {
                let stats = transcript.stats();
                info!(
                    chat = %transcript.chat,
                    messages = stats.messages,
                    media_missing = stats.media_missing,
                    "processed transcript"
                );
                totals.merge(&stats);
                transcripts.push(transcript);
            }
            Err(e) if e.is_transcript_not_found() => {
                warn!(error = %e, "skipping directory");
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    write_to_format(&transcripts, &output_path, format)?;

    println!("chatweave v{}", env!("CARGO_PKG_VERSION"));
    println!("Root:         {}", args.folder.display());
    println!("Output:       {} ({format})", output_path.display());
    println!("Transcripts:  {}", transcripts.len());
    if skipped > 0 {
        println!("Skipped:      {skipped}");
    }
    println!("Messages:     {}", totals.messages);
    println!(
        "Media-free:   {} ({:.1}%)",
        totals.media_free,
        totals.media_free_ratio()
    );
    println!("Attachments:  {}", totals.with_attachment);
    println!("Links:        {}", totals.with_link);
    println!("Locations:    {}", totals.with_location);
    println!("Missing media: {}", totals.media_missing);
    println!("Time:         {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}

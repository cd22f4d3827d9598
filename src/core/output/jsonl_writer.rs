//! JSON Lines (JSONL) output writer.
//!
//! One message per line, which keeps large runs streamable for downstream
//! loaders.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::row::rows;
use crate::core::processor::Transcript;
use crate::error::Result;

/// Writes all messages to JSONL (JSON Lines) format.
///
/// Each line is a complete JSON object:
/// ```jsonl
/// {"message_id":0,"chat":"Alice","chat_id":1,...}
/// {"message_id":1,"chat":"Alice","chat_id":1,...}
/// ```
pub fn write_jsonl(transcripts: &[Transcript], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(transcripts, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Same as [`write_jsonl`], returned as a string.
pub fn to_jsonl(transcripts: &[Transcript]) -> Result<String> {
    let mut buffer = Vec::new();
    write_lines(transcripts, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_lines<W: Write>(transcripts: &[Transcript], out: &mut W) -> Result<()> {
    for row in rows(transcripts) {
        let line = serde_json::to_string(&row)?;
        writeln!(out, "{line}")?;
    }
    Ok(())
}

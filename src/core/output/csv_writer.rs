//! CSV output writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::row::{MessageRow, rows};
use crate::core::processor::Transcript;
use crate::error::Result;

/// Writes all messages to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Header: [`MessageRow::HEADER`], always written
/// - Empty attachment and location slots are empty fields
/// - Encoding: UTF-8
pub fn write_csv(transcripts: &[Transcript], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(transcripts, BufWriter::new(file))
}

/// Same as [`write_csv`], returned as a string.
pub fn to_csv(transcripts: &[Transcript]) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(transcripts, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_records<W: Write>(transcripts: &[Transcript], out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_writer(out);

    writer.write_record(MessageRow::HEADER)?;
    for row in rows(transcripts) {
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(())
}

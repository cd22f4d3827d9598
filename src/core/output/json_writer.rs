//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::row::{MessageRow, rows};
use crate::core::processor::Transcript;
use crate::error::Result;

/// Writes all messages to a JSON file as one pretty-printed array.
///
/// # Format
/// ```json
/// [
///   {"message_id": 0, "chat": "Alice", "chat_id": 1, "author": "Alice", ...},
///   {"message_id": 1, "chat": "Alice", "chat_id": 1, "author": "Bob", ...}
/// ]
/// ```
pub fn write_json(transcripts: &[Transcript], output_path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(transcripts)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts all messages to a JSON array string.
pub fn to_json(transcripts: &[Transcript]) -> Result<String> {
    let all: Vec<MessageRow> = rows(transcripts).collect();
    Ok(serde_json::to_string_pretty(&all)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::core::processor::Pipeline;
    use tempfile::{NamedTempFile, tempdir};

    fn sample() -> Transcript {
        let dir = tempdir().unwrap();
        Pipeline::new(PipelineConfig::new()).unwrap().process_str(
            "[1.2.2021, 10:00] Alice: <b>hi</b>\n[1.2.2021, 10:05] Bob: Ort: Park <geo:1,2>",
            dir.path(),
        )
    }

    #[test]
    fn test_to_json_fields() {
        let json = to_json(&[sample()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["message"], "&lt;b&gt;hi&lt;/b&gt;");
        assert_eq!(rows[0]["has_no_media"], true);
        assert_eq!(rows[0]["image"], serde_json::Value::Null);
        assert_eq!(rows[1]["message"], "Park");
        assert_eq!(rows[1]["location"], "1,2");
        assert_eq!(rows[1]["context"], "0,1");
    }

    #[test]
    fn test_empty_run_is_empty_array() {
        assert_eq!(to_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_write_json() {
        let file = NamedTempFile::new().unwrap();
        write_json(&[sample()], file.path()).unwrap();
        let content = std::fs::read_to_string(file.path()).unwrap();
        let back: Vec<MessageRow> = serde_json::from_str(&content).unwrap();
        assert_eq!(back[1].author, "Bob");
    }
}

//! JSONL dataset loading.
//!
//! Training datasets arrive as JSON Lines. Loading is lenient: blank lines
//! are skipped silently and unparseable lines are skipped with a warning,
//! so one corrupt record never aborts a run.

use crate::error_for_path;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use toolmint_core::Result;

/// Loads raw JSON records from a JSONL file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened or read. Malformed
/// lines are not errors: they are logged and skipped.
pub fn load_records(path: &Path) -> Result<Vec<Value>> {
    let file = File::open(path).map_err(|e| error_for_path(path, e))?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| error_for_path(path, e))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(trimmed) {
            Ok(value) => records.push(value),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    line = line_no + 1,
                    error = %e,
                    "skipping malformed JSONL line"
                );
            }
        }
    }

    tracing::debug!(path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}

/// Writes records to a JSONL file, one compact JSON object per line.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created or written, or a
/// serialization error if a record cannot be encoded.
pub fn save_records(path: &Path, records: &[Value]) -> Result<()> {
    let file = File::create(path).map_err(|e| error_for_path(path, e))?;
    let mut writer = BufWriter::new(file);

    for record in records {
        let line = serde_json::to_string(record).map_err(|e| {
            toolmint_core::Error::SerializationError {
                message: "failed to encode JSONL record".to_string(),
                source: Some(e),
            }
        })?;
        writeln!(writer, "{line}").map_err(|e| error_for_path(path, e))?;
    }

    writer.flush().map_err(|e| error_for_path(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_skips_blank_and_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.jsonl");
        std::fs::write(
            &path,
            "{\"question\": \"q1\", \"sql\": \"SELECT 1\"}\n\
             \n\
             not json at all\n\
             {\"question\": \"q2\", \"sql\": \"SELECT 2\"}\n",
        )
        .unwrap();

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["question"], "q1");
        assert_eq!(records[1]["question"], "q2");
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_records(&dir.path().join("absent.jsonl")).unwrap_err();
        assert!(err.is_io_error());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jsonl");
        let records = vec![json!({"a": 1}), json!({"b": "two"})];

        save_records(&path, &records).unwrap();
        let loaded = load_records(&path).unwrap();
        assert_eq!(loaded, records);
    }
}

//! Tool document persistence.
//!
//! The merged tool document is a single JSON file with a top-level `tools`
//! map. Loading tolerates a missing file and a non-object payload, both of
//! which yield an empty document so repeated runs can always merge.

use crate::error_for_path;
use serde_json::Value;
use std::fs;
use std::path::Path;
use toolmint_core::{Error, Result, ToolDocument};

/// Loads a tool document from `path`.
///
/// A missing file and a file whose top level is not a JSON object both
/// produce an empty document. A present-but-unreadable file is an error.
///
/// # Errors
///
/// Returns an I/O error if the file exists but cannot be read, or a
/// serialization error if it holds invalid JSON.
pub fn load_document(path: &Path) -> Result<ToolDocument> {
    if !path.exists() {
        return Ok(ToolDocument::default());
    }

    let text = fs::read_to_string(path).map_err(|e| error_for_path(path, e))?;
    let value: Value = serde_json::from_str(&text).map_err(|e| Error::SerializationError {
        message: format!("invalid JSON in tool document {}", path.display()),
        source: Some(e),
    })?;

    if !value.is_object() {
        tracing::warn!(
            path = %path.display(),
            "tool document is not a JSON object, starting empty"
        );
        return Ok(ToolDocument::default());
    }

    serde_json::from_value(value).map_err(|e| Error::SerializationError {
        message: format!("malformed tool document {}", path.display()),
        source: Some(e),
    })
}

/// Writes a tool document to `path` as pretty-printed JSON.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written, or a serialization
/// error if the document cannot be encoded.
pub fn save_document(path: &Path, document: &ToolDocument) -> Result<()> {
    let json = serde_json::to_string_pretty(document).map_err(|e| Error::SerializationError {
        message: "failed to encode tool document".to_string(),
        source: Some(e),
    })?;
    fs::write(path, json).map_err(|e| error_for_path(path, e))?;

    tracing::debug!(path = %path.display(), tools = document.len(), "saved tool document");
    Ok(())
}

/// Loads the existing document at `path`, merges `new_tools` into it, and
/// writes the result back. Colliding keys are overwritten by the new tools.
///
/// # Errors
///
/// Propagates any load or save failure.
pub fn merge_into_document(path: &Path, new_tools: ToolDocument) -> Result<ToolDocument> {
    let mut document = load_document(path)?;
    document.merge(new_tools);
    save_document(path, &document)?;
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolmint_core::ToolRecord;

    fn tool(statement: &str) -> ToolRecord {
        ToolRecord {
            kind: "sql".to_string(),
            source: "spider".to_string(),
            statement: statement.to_string(),
            description: "Retrieves data".to_string(),
            template_parameters: vec![],
        }
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let doc = load_document(&dir.path().join("absent.json")).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_non_object_payload_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tools.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(load_document(&path).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tools.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(load_document(&path).unwrap_err().is_serialization_error());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tools.json");

        let mut doc = ToolDocument::default();
        doc.insert("select_filtered_ab12".to_string(), tool("SELECT {{.select_col}}"));
        save_document(&path, &doc).unwrap();

        assert_eq!(load_document(&path).unwrap(), doc);
    }

    #[test]
    fn test_merge_preserves_existing_and_overwrites_collisions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tools.json");

        let mut first = ToolDocument::default();
        first.insert("a".to_string(), tool("old"));
        first.insert("b".to_string(), tool("kept"));
        save_document(&path, &first).unwrap();

        let mut second = ToolDocument::default();
        second.insert("a".to_string(), tool("new"));
        second.insert("c".to_string(), tool("added"));

        let merged = merge_into_document(&path, second).unwrap();
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.tools["a"].statement, "new");
        assert_eq!(merged.tools["b"].statement, "kept");

        // The merged document was persisted, not just returned.
        assert_eq!(load_document(&path).unwrap(), merged);
    }
}

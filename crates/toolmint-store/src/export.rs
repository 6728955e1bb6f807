//! Tool document exports.
//!
//! CSV flattening of the tool document plus the per-run summary report in
//! text and JSON forms.

use crate::error_for_path;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use toolmint_core::{Error, Result, ToolDocument};

const CSV_HEADER: &str = "key,kind,source,statement,description,param_count";

/// Quotes a CSV field per RFC 4180 when it needs quoting.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Renders a tool document as CSV, one row per tool in key order.
///
/// An empty document still yields the header line.
#[must_use]
pub fn document_to_csv(document: &ToolDocument) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for (key, tool) in &document.tools {
        let row = [
            csv_field(key),
            csv_field(&tool.kind),
            csv_field(&tool.source),
            csv_field(&tool.statement),
            csv_field(&tool.description),
            tool.template_parameters.len().to_string(),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

/// Writes a tool document to `path` as CSV.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written.
pub fn export_csv(path: &Path, document: &ToolDocument) -> Result<()> {
    fs::write(path, document_to_csv(document)).map_err(|e| error_for_path(path, e))?;
    tracing::debug!(path = %path.display(), rows = document.len(), "exported CSV");
    Ok(())
}

/// Summary of one minting run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Dataset file the run consumed.
    pub input_file: String,
    /// Document file the run wrote.
    pub output_file: String,
    /// Records read from the input.
    pub records_processed: usize,
    /// Tools that cleared validation and were minted.
    pub tools_minted: usize,
    /// Records rejected by validation.
    pub records_skipped: usize,
    /// Quality threshold the run enforced.
    pub min_score: f64,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Wall-clock run duration in seconds.
    pub elapsed_secs: f64,
}

impl RunSummary {
    /// Renders the summary as a human-readable report.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "Minting Results\n\
             ========================\n\
             \n\
             Input File: {}\n\
             Output File: {}\n\
             Records Processed: {}\n\
             Tools Minted: {}\n\
             Records Skipped: {}\n\
             Min Quality Score: {:.1}\n\
             Started At: {}\n\
             Elapsed: {:.2}s\n",
            self.input_file,
            self.output_file,
            self.records_processed,
            self.tools_minted,
            self.records_skipped,
            self.min_score,
            self.started_at.to_rfc3339(),
            self.elapsed_secs,
        )
    }

    /// Writes the summary to `path` as the text report.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written.
    pub fn export_text(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render()).map_err(|e| error_for_path(path, e))
    }

    /// Writes the summary to `path` as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written, or a
    /// serialization error if the summary cannot be encoded.
    pub fn export_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| Error::SerializationError {
            message: "failed to encode run summary".to_string(),
            source: Some(e),
        })?;
        fs::write(path, json).map_err(|e| error_for_path(path, e))
    }
}

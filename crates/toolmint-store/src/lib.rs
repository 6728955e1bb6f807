//! Persistence for minted tool documents.
//!
//! Covers the three file formats the pipeline touches: JSONL datasets in,
//! the merged JSON tool document in and out, and CSV/text/JSON exports.
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//! use toolmint_core::ToolDocument;
//! use toolmint_store::{load_records, merge_into_document};
//!
//! # fn main() -> toolmint_core::Result<()> {
//! let records = load_records(Path::new("spider.jsonl"))?;
//! let minted = ToolDocument::default();
//! let merged = merge_into_document(Path::new("tools.json"), minted)?;
//! println!("{} records in, {} tools total", records.len(), merged.len());
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod export;
pub mod jsonl;

pub use document::{load_document, merge_into_document, save_document};
pub use export::{RunSummary, document_to_csv, export_csv};
pub use jsonl::{load_records, save_records};

use std::path::Path;
use toolmint_core::Error;

/// Wraps an `std::io::Error` with the path it occurred on.
pub(crate) fn error_for_path(path: &Path, source: std::io::Error) -> Error {
    Error::IoError {
        path: path.to_path_buf(),
        source,
    }
}

//! ToolMint core - shared types for SQL tool minting.
//!
//! This crate defines the domain model shared by every ToolMint crate:
//! normalized input records, template parameters, tool records, the merged
//! tool document, quality breakdowns, and the minting options.
//!
//! # Overview
//!
//! ToolMint turns question/SQL training pairs into reusable tool
//! definitions. The types here are deliberately closed structs with fixed
//! fields rather than open maps, so every downstream component (scorer,
//! validator, exporter) gets compile-time guarantees on the fields it
//! relies on.
//!
//! # Examples
//!
//! ```
//! use toolmint_core::{NormalizedRecord, TemplateParameter};
//!
//! let record = NormalizedRecord {
//!     question: "How many users are active?".to_string(),
//!     sql: "SELECT COUNT(*) FROM users WHERE active = 1".to_string(),
//!     db_id: "app".to_string(),
//!     source: "spider".to_string(),
//! };
//!
//! let param = TemplateParameter::new("table", "Table name");
//! assert_eq!(param.type_name, "string");
//! assert!(!record.sql.is_empty());
//! ```
//!
//! # Thread Safety
//!
//! All public types are plain data and implement `Send + Sync + Debug`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod options;
pub mod types;

pub use error::{Error, Result};
pub use options::{MintOptions, MintOptionsBuilder};
pub use types::{
    NormalizedRecord, QualityBreakdown, TemplateParameter, ToolDocument, ToolRecord,
};

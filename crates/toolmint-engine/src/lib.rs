//! SQL tool minting engine.
//!
//! Turns natural-language-question/SQL record pairs into reusable,
//! parameterized tool definitions. The pipeline rewrites literal values,
//! table names, and column references into `{{.name}}` placeholders,
//! scores the result on parameters, complexity, description, and
//! reusability, and keeps only tools clearing the quality gate.
//!
//! # Examples
//!
//! ```
//! use toolmint_core::{MintOptions, NormalizedRecord};
//! use toolmint_engine::{MintOutcome, ToolMinter};
//!
//! let minter = ToolMinter::new(MintOptions::default());
//! let record = NormalizedRecord {
//!     question: "Show the names of users older than 30, top 10".to_string(),
//!     sql: "SELECT name FROM users WHERE age > 30 LIMIT 10".to_string(),
//!     db_id: String::new(),
//!     source: "spider".to_string(),
//! };
//!
//! let outcome = minter.mint(&record);
//! assert!(outcome.is_minted());
//! ```

pub mod describe;
pub mod labels;
pub mod minter;
pub mod naming;
pub mod parameterizer;
pub mod quality;
pub mod validate;

pub use describe::{describe_parameters, describe_sql_structure, generate_semantic_description};
pub use labels::generate_labels;
pub use minter::{MintOutcome, ToolMinter};
pub use naming::{generate_smart_tool_name, short_hash, slug};
pub use parameterizer::Parameterizer;
pub use quality::{
    calculate_complexity_score, calculate_description_score, calculate_parameter_score,
    calculate_reusability_score, calculate_tool_quality_score,
};
pub use validate::{validate_tool, Verdict};

//! The minting pipeline.
//!
//! Drives one normalized record through parameterization, validation,
//! naming, labeling, and description generation, producing a keyed
//! [`ToolRecord`] or a skip reason.

use crate::describe::generate_semantic_description;
use crate::labels::generate_labels;
use crate::naming::{generate_smart_tool_name, short_hash};
use crate::parameterizer::Parameterizer;
use crate::validate::{validate_tool, Verdict};
use toolmint_core::{MintOptions, NormalizedRecord, ToolRecord};

/// Length of the key's content-hash suffix.
const KEY_HASH_LEN: usize = 4;

/// Result of minting one record.
#[derive(Debug, Clone, PartialEq)]
pub enum MintOutcome {
    /// The record produced a tool.
    Minted {
        /// Document key: smart name plus a short content hash.
        key: String,
        /// The minted tool definition.
        record: ToolRecord,
        /// Quality score the tool was accepted with.
        score: f64,
    },
    /// The record was rejected by validation.
    Skipped {
        /// Human-readable rejection reason.
        reason: String,
        /// Quality score at the point of rejection.
        score: f64,
    },
}

impl MintOutcome {
    /// Returns `true` for [`MintOutcome::Minted`].
    #[must_use]
    pub fn is_minted(&self) -> bool {
        matches!(self, MintOutcome::Minted { .. })
    }
}

/// Converts normalized question/SQL records into keyed tool definitions.
///
/// # Examples
///
/// ```
/// use toolmint_core::{MintOptions, NormalizedRecord};
/// use toolmint_engine::{MintOutcome, ToolMinter};
///
/// let minter = ToolMinter::new(MintOptions::default());
/// let record = NormalizedRecord {
///     question: "Show the names of users older than 30, top 10".to_string(),
///     sql: "SELECT name FROM users WHERE age > 30 LIMIT 10".to_string(),
///     db_id: "user_db".to_string(),
///     source: "spider".to_string(),
/// };
///
/// match minter.mint(&record) {
///     MintOutcome::Minted { key, record, .. } => {
///         assert!(key.starts_with("select_filtered_limited_"));
///         assert!(record.statement.contains("{{.table}}"));
///     }
///     MintOutcome::Skipped { reason, .. } => panic!("skipped: {reason}"),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ToolMinter {
    options: MintOptions,
    kind: String,
    parameterizer: Parameterizer,
}

impl ToolMinter {
    /// Creates a minter producing tools of kind `"sql"`.
    #[must_use]
    pub fn new(options: MintOptions) -> Self {
        Self {
            parameterizer: Parameterizer::new(options.clone()),
            options,
            kind: "sql".to_string(),
        }
    }

    /// Overrides the tool kind recorded on minted tools.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Mints one record into a keyed tool, or reports why it was skipped.
    ///
    /// The key combines the structural name of the parameterized SQL with
    /// a short hash of the original SQL and question, so near-duplicate
    /// records from the same dataset get distinct keys. Labels are derived
    /// from the original SQL: parameterization erases literals the labeler
    /// would otherwise see.
    #[must_use]
    pub fn mint(&self, record: &NormalizedRecord) -> MintOutcome {
        let (statement, params) = self.parameterizer.parameterize(&record.sql);

        let verdict = validate_tool(&statement, &params, &record.question, self.options.min_score);
        let score = match verdict {
            Verdict::Accepted { score } => score,
            Verdict::Rejected { reason, score } => {
                tracing::debug!(reason = %reason, score, "record skipped");
                return MintOutcome::Skipped { reason, score };
            }
        };

        let smart_name = generate_smart_tool_name(&statement);
        let hash = short_hash(&format!("{}{}", record.sql, record.question), KEY_HASH_LEN);
        let key = format!("{smart_name}_{hash}");

        let base_desc = generate_semantic_description(&statement, &params);
        let labels = generate_labels(&record.sql);
        let description = if labels.is_empty() {
            base_desc
        } else {
            format!("{base_desc} [Labels: {labels}]")
        };

        MintOutcome::Minted {
            key,
            record: ToolRecord {
                kind: self.kind.clone(),
                source: record.source.clone(),
                statement,
                description,
                template_parameters: params,
            },
            score,
        }
    }
}

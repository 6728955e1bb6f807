//! Domain types for SQL tool minting.
//!
//! Fixed-field structs for everything the pipeline produces or consumes:
//! the normalized input record, template parameters, quality breakdowns,
//! tool records, and the merged keyed document.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A named placeholder created during parameterization.
///
/// Parameters are immutable once added to a run and their names are unique
/// within one parameterization run (enforced by the engine's name
/// registry).
///
/// # Examples
///
/// ```
/// use toolmint_core::TemplateParameter;
///
/// let param = TemplateParameter::with_example("limit_n", "Maximum number of rows", "10");
/// assert_eq!(param.name, "limit_n");
/// assert_eq!(param.description, "Maximum number of rows (e.g., 10)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateParameter {
    /// Placeholder name, referenced in SQL as `{{.name}}`.
    pub name: String,

    /// Parameter type. Every placeholder substitutes into SQL text, so the
    /// type is always `"string"`.
    #[serde(rename = "type")]
    pub type_name: String,

    /// Human-readable description, optionally carrying an example value.
    pub description: String,
}

impl TemplateParameter {
    /// Creates a string parameter with a plain description.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: "string".to_string(),
            description: description.into(),
        }
    }

    /// Creates a string parameter whose description embeds the original
    /// value as an example.
    #[must_use]
    pub fn with_example(
        name: impl Into<String>,
        description: impl AsRef<str>,
        example: impl AsRef<str>,
    ) -> Self {
        Self::new(
            name,
            format!("{} (e.g., {})", description.as_ref(), example.as_ref()),
        )
    }
}

/// A normalized question/SQL record from a training dataset.
///
/// Datasets name their fields inconsistently; [`NormalizedRecord::from_raw`]
/// maps the common aliases onto this fixed shape. The record is read-only
/// to the minting pipeline.
///
/// # Examples
///
/// ```
/// use toolmint_core::NormalizedRecord;
///
/// let raw = serde_json::json!({
///     "prompt": "List all singers",
///     "query": "SELECT name FROM singer",
///     "db": "concert_singer",
/// });
/// let rec = NormalizedRecord::from_raw(&raw);
/// assert_eq!(rec.question, "List all singers");
/// assert_eq!(rec.sql, "SELECT name FROM singer");
/// assert_eq!(rec.db_id, "concert_singer");
/// assert_eq!(rec.source, "unknown");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// The natural-language question, trimmed.
    pub question: String,
    /// The SQL query, trimmed.
    pub sql: String,
    /// Database identifier, or empty when the dataset carries none.
    pub db_id: String,
    /// Dataset name, defaulting to `"unknown"`.
    pub source: String,
}

impl NormalizedRecord {
    /// Normalizes a raw JSON record from any supported dataset layout.
    ///
    /// Field aliases, first match wins:
    /// - question: `question`, `prompt`, `nl`, `instruction`
    /// - sql: `sql`, `query`, `gold_sql`, `gold`, `pred_sql`
    /// - db: `db_id`, `db`, `schema`
    /// - source: `source`, `origin` (default `"unknown"`)
    #[must_use]
    pub fn from_raw(raw: &Value) -> Self {
        let question = first_str(raw, &["question", "prompt", "nl", "instruction"]);
        let sql = first_str(raw, &["sql", "query", "gold_sql", "gold", "pred_sql"]);
        let db_id = first_str(raw, &["db_id", "db", "schema"]);
        let source = raw
            .get("source")
            .or_else(|| raw.get("origin"))
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();

        Self {
            question: question.trim().to_string(),
            sql: sql.trim().to_string(),
            db_id,
            source,
        }
    }
}

fn first_str(raw: &Value, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|k| raw.get(*k).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .unwrap_or("")
        .to_string()
}

/// Per-component quality breakdown for a minted tool.
///
/// The four components cap at 40/30/20/10 respectively; the overall score
/// is their unweighted sum, so 100 is the effective maximum without any
/// additional top-level capping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityBreakdown {
    /// Parameter count/diversity score (0-40).
    pub parameters: f64,
    /// SQL structural complexity score (0-30).
    pub complexity: f64,
    /// Description quality score (0-20).
    pub description: f64,
    /// Reusability score after hardcoded-value penalties (0-10).
    pub reusability: f64,
}

impl QualityBreakdown {
    /// Overall quality score: the unweighted sum of the components.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.parameters + self.complexity + self.description + self.reusability
    }
}

impl std::fmt::Display for QualityBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "parameters={:.1}, complexity={:.1}, description={:.1}, reusability={:.1}",
            self.parameters, self.complexity, self.description, self.reusability
        )
    }
}

/// A minted tool definition.
///
/// Created once per accepted record and never mutated afterwards. The wire
/// field name for the parameter list is `templateParameters`, matching the
/// persisted document format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRecord {
    /// Tool kind (for SQL tools, `"sql"`).
    pub kind: String,
    /// Dataset the record came from.
    pub source: String,
    /// Parameterized SQL template with `{{.name}}` placeholders.
    pub statement: String,
    /// Retrieval-friendly description plus label suffix.
    pub description: String,
    /// Parameters referenced by the statement, in first-encountered order.
    #[serde(rename = "templateParameters")]
    pub template_parameters: Vec<TemplateParameter>,
}

/// The merged, persisted document of minted tools, keyed by tool key.
///
/// Later tools with a colliding key overwrite earlier ones; there is no
/// dedup by content.
///
/// # Examples
///
/// ```
/// use toolmint_core::{ToolDocument, ToolRecord};
///
/// let mut doc = ToolDocument::default();
/// doc.insert("select_filtered_ab12".to_string(), ToolRecord {
///     kind: "sql".to_string(),
///     source: "spider".to_string(),
///     statement: "SELECT {{.select_col}} FROM {{.table}}".to_string(),
///     description: "Retrieves data".to_string(),
///     template_parameters: vec![],
/// });
/// assert_eq!(doc.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolDocument {
    /// Tools keyed by generated name + content hash.
    #[serde(default)]
    pub tools: BTreeMap<String, ToolRecord>,
}

impl ToolDocument {
    /// Inserts a tool, overwriting any existing tool with the same key.
    pub fn insert(&mut self, key: String, record: ToolRecord) {
        self.tools.insert(key, record);
    }

    /// Merges another document into this one, overwriting on key collision.
    pub fn merge(&mut self, other: ToolDocument) {
        self.tools.extend(other.tools);
    }

    /// Number of tools in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns true when the document holds no tools.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parameter_with_example() {
        let p = TemplateParameter::with_example("value", "Numeric value", "30");
        assert_eq!(p.name, "value");
        assert_eq!(p.type_name, "string");
        assert_eq!(p.description, "Numeric value (e.g., 30)");
    }

    #[test]
    fn test_parameter_serializes_type_field() {
        let p = TemplateParameter::new("table", "Table name");
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["type"], "string");
        assert!(json.get("type_name").is_none());
    }

    #[test]
    fn test_normalize_prefers_primary_aliases() {
        let raw = json!({
            "question": "q",
            "prompt": "ignored",
            "sql": "SELECT 1",
            "query": "ignored",
            "db_id": "db",
            "source": "spider",
        });
        let rec = NormalizedRecord::from_raw(&raw);
        assert_eq!(rec.question, "q");
        assert_eq!(rec.sql, "SELECT 1");
        assert_eq!(rec.db_id, "db");
        assert_eq!(rec.source, "spider");
    }

    #[test]
    fn test_normalize_falls_back_through_aliases() {
        let raw = json!({
            "instruction": "  padded question  ",
            "gold_sql": " SELECT a FROM b ",
        });
        let rec = NormalizedRecord::from_raw(&raw);
        assert_eq!(rec.question, "padded question");
        assert_eq!(rec.sql, "SELECT a FROM b");
        assert_eq!(rec.db_id, "");
        assert_eq!(rec.source, "unknown");
    }

    #[test]
    fn test_normalize_missing_fields_are_empty() {
        let rec = NormalizedRecord::from_raw(&json!({}));
        assert_eq!(rec.question, "");
        assert_eq!(rec.sql, "");
        assert_eq!(rec.source, "unknown");
    }

    #[test]
    fn test_breakdown_total() {
        let b = QualityBreakdown {
            parameters: 25.0,
            complexity: 15.0,
            description: 9.0,
            reusability: 10.0,
        };
        assert!((b.total() - 59.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_breakdown_display() {
        let b = QualityBreakdown {
            parameters: 25.0,
            complexity: 15.0,
            description: 9.0,
            reusability: 10.0,
        };
        assert_eq!(
            b.to_string(),
            "parameters=25.0, complexity=15.0, description=9.0, reusability=10.0"
        );
    }

    #[test]
    fn test_tool_record_wire_format() {
        let record = ToolRecord {
            kind: "sql".to_string(),
            source: "spider".to_string(),
            statement: "SELECT {{.select_col}} FROM {{.table}}".to_string(),
            description: "Retrieves data".to_string(),
            template_parameters: vec![TemplateParameter::new("table", "Table name")],
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("templateParameters").is_some());
        assert!(json.get("template_parameters").is_none());
    }

    #[test]
    fn test_document_merge_overwrites_on_collision() {
        let make = |statement: &str| ToolRecord {
            kind: "sql".to_string(),
            source: "s".to_string(),
            statement: statement.to_string(),
            description: String::new(),
            template_parameters: vec![],
        };

        let mut doc = ToolDocument::default();
        doc.insert("a".to_string(), make("first"));
        doc.insert("b".to_string(), make("kept"));

        let mut other = ToolDocument::default();
        other.insert("a".to_string(), make("second"));

        doc.merge(other);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.tools["a"].statement, "second");
        assert_eq!(doc.tools["b"].statement, "kept");
    }

    #[test]
    fn test_document_deserializes_missing_tools_key() {
        let doc: ToolDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.is_empty());
    }
}

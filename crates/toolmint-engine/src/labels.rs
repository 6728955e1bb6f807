//! SQL labeling.
//!
//! Classifies SQL into operation and structure tags used for downstream
//! retrieval and filtering: the statement-start operation (at most one)
//! followed by independently-evaluated structural presence flags.

use regex::Regex;
use std::sync::LazyLock;

static COUNT_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bCOUNT\s*\(").expect("valid regex"));
static SUM_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bSUM\s*\(").expect("valid regex"));
static AVG_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bAVG\s*\(").expect("valid regex"));
static MINMAX_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(MAX|MIN)\s*\(").expect("valid regex"));

/// Operation labels from the statement-start keyword.
fn operation_labels(sql: &str) -> Vec<&'static str> {
    let upper = sql.to_uppercase();
    let trimmed = upper.trim();

    let operations = [
        ("SELECT", "select"),
        ("INSERT", "insert"),
        ("UPDATE", "update"),
        ("DELETE", "delete"),
        ("CREATE", "create"),
        ("ALTER", "alter"),
        ("DROP", "drop"),
    ];

    operations
        .iter()
        .find(|(kw, _)| trimmed.starts_with(kw))
        .map(|(_, label)| vec![*label])
        .unwrap_or_default()
}

/// Structure labels from keyword presence, in fixed evaluation order.
///
/// Aggregate checks are regex-bounded so identifiers like `account(` do
/// not count as `COUNT(`.
fn structure_labels(sql: &str) -> Vec<&'static str> {
    let upper = sql.to_uppercase();
    let mut labels = Vec::new();

    if upper.contains("INNER JOIN") || upper.contains("JOIN") {
        labels.push("join");
    }
    if upper.contains("LEFT JOIN") {
        labels.push("left_join");
    }
    if upper.contains("RIGHT JOIN") {
        labels.push("right_join");
    }

    if COUNT_CALL.is_match(sql) {
        labels.push("count");
    }
    if SUM_CALL.is_match(sql) {
        labels.push("sum");
    }
    if AVG_CALL.is_match(sql) {
        labels.push("avg");
    }
    if MINMAX_CALL.is_match(sql) {
        labels.push("minmax");
    }

    if upper.contains("GROUP BY") {
        labels.push("grouped");
    }
    if upper.contains("ORDER BY") {
        labels.push("sorted");
    }
    if upper.contains("HAVING") {
        labels.push("having");
    }

    if upper.contains("WHERE") {
        labels.push("filtered");
    }
    if upper.contains("DISTINCT") {
        labels.push("distinct");
    }

    if upper.contains("LIMIT") {
        labels.push("limited");
    }
    if upper.contains("OFFSET") {
        labels.push("offset");
    }

    if upper.matches("SELECT").count() > 1 {
        labels.push("subquery");
    }

    labels
}

/// Generates all labels for a SQL statement as a comma-joined string.
///
/// The operation label (if any) comes first, followed by structure labels
/// in their fixed evaluation order. There is no cap on label count.
///
/// # Examples
///
/// ```
/// use toolmint_engine::generate_labels;
///
/// let labels = generate_labels("SELECT COUNT(*) FROM t GROUP BY t.id");
/// assert_eq!(labels, "select, count, grouped");
///
/// assert_eq!(generate_labels(""), "");
/// ```
#[must_use]
pub fn generate_labels(sql: &str) -> String {
    let mut all = operation_labels(sql);
    all.extend(structure_labels(sql));
    all.join(", ")
}

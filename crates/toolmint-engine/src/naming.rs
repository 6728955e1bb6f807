//! Deterministic name and ID generation.
//!
//! Short content hashes, slugs, and the structural tool-name generator
//! that derives names like `select_count_grouped_filtered` from SQL shape.

use regex::Regex;
use std::sync::LazyLock;

static SAFE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9_]+").expect("valid regex"));
static UNDERSCORE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").expect("valid regex"));

static COUNT_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bCOUNT\s*\(").expect("valid regex"));
static SUM_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bSUM\s*\(").expect("valid regex"));
static OTHER_AGG_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(AVG|MAX|MIN)\s*\(").expect("valid regex"));
static GROUP_BY_KW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bGROUP\s+BY\b").expect("valid regex"));
static ANY_JOIN_KW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(INNER\s+)?JOIN\b").expect("valid regex"));
static LEFT_JOIN_KW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bLEFT\s+JOIN\b").expect("valid regex"));
static RIGHT_JOIN_KW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bRIGHT\s+JOIN\b").expect("valid regex"));
static WHERE_KW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bWHERE\b").expect("valid regex"));
static ORDER_BY_KW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bORDER\s+BY\b").expect("valid regex"));
static LIMIT_KW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bLIMIT\b").expect("valid regex"));
static OFFSET_KW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bOFFSET\b").expect("valid regex"));
static HAVING_KW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bHAVING\b").expect("valid regex"));
static DISTINCT_KW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bDISTINCT\b").expect("valid regex"));

/// Feature tags in fixed priority order; at most three end up in a name.
const FEATURE_PRIORITY: [&str; 12] = [
    "count",
    "sum",
    "aggregate",
    "grouped",
    "joined",
    "left_joined",
    "filtered",
    "sorted",
    "limited",
    "distinct",
    "having",
    "offset",
];

/// Returns a short hex content hash of `input`, truncated to `len` chars.
///
/// # Examples
///
/// ```
/// use toolmint_engine::short_hash;
///
/// let a = short_hash("SELECT 1", 8);
/// assert_eq!(a.len(), 8);
/// assert_eq!(a, short_hash("SELECT 1", 8));
/// assert_ne!(a, short_hash("SELECT 2", 8));
/// ```
#[must_use]
pub fn short_hash(input: &str, len: usize) -> String {
    let hex = blake3::hash(input.as_bytes()).to_hex();
    hex.as_str().chars().take(len).collect()
}

/// Converts a string into an identifier-safe slug.
///
/// Lowercases, collapses non-`[a-z0-9_]` runs to `_`, trims underscores,
/// prepends `prefix` when the result is empty or does not start with a
/// letter, and truncates to 60 characters.
///
/// # Examples
///
/// ```
/// use toolmint_engine::slug;
///
/// assert_eq!(slug("My Tool Set!", "tool"), "my_tool_set");
/// assert_eq!(slug("", "tool"), "tool");
/// assert_eq!(slug("123 queries", "tool"), "tool_123_queries");
/// ```
#[must_use]
pub fn slug(input: &str, prefix: &str) -> String {
    let lowered = input.to_lowercase();
    let replaced = SAFE.replace_all(&lowered, "_");
    let trimmed = replaced.trim_matches('_');
    let collapsed = UNDERSCORE_RUNS.replace_all(trimmed, "_").into_owned();

    let named = if collapsed.is_empty() {
        prefix.to_string()
    } else if !collapsed.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        format!("{prefix}_{collapsed}")
    } else {
        collapsed
    };

    named.chars().take(60).collect()
}

/// Derives a descriptive tool name from SQL structure.
///
/// Examples of produced names: `select_grouped_sorted_limited`,
/// `select_count_joined_filtered`, `update_filtered`. The name is the
/// operation prefix plus up to three structural feature tags in priority
/// order, sanitized to `[a-z0-9_]` and truncated to 50 characters, with
/// `"query"` as the fallback.
///
/// # Examples
///
/// ```
/// use toolmint_engine::generate_smart_tool_name;
///
/// let name = generate_smart_tool_name(
///     "SELECT COUNT(*) FROM t GROUP BY a ORDER BY COUNT(*) DESC LIMIT 5",
/// );
/// assert_eq!(name, "select_count_grouped_sorted");
/// ```
#[must_use]
pub fn generate_smart_tool_name(sql: &str) -> String {
    let trimmed_upper = sql.trim().to_uppercase();

    let prefix = if trimmed_upper.starts_with("SELECT") {
        "select"
    } else if trimmed_upper.starts_with("INSERT") {
        "insert"
    } else if trimmed_upper.starts_with("UPDATE") {
        "update"
    } else if trimmed_upper.starts_with("DELETE") {
        "delete"
    } else if trimmed_upper.starts_with("CREATE") {
        "create"
    } else if trimmed_upper.starts_with("ALTER") {
        "alter"
    } else if trimmed_upper.starts_with("DROP") {
        "drop"
    } else {
        "query"
    };

    let mut features = Vec::new();

    // Aggregates: COUNT wins over SUM, which wins over AVG/MAX/MIN.
    if COUNT_CALL.is_match(sql) {
        features.push("count");
    } else if SUM_CALL.is_match(sql) {
        features.push("sum");
    } else if OTHER_AGG_CALL.is_match(sql) {
        features.push("aggregate");
    }

    if GROUP_BY_KW.is_match(sql) {
        features.push("grouped");
    }

    // The plain JOIN pattern also matches LEFT/RIGHT JOIN, so those
    // variants only tag when the general pattern somehow missed.
    if ANY_JOIN_KW.is_match(sql) {
        features.push("joined");
    } else if LEFT_JOIN_KW.is_match(sql) {
        features.push("left_joined");
    } else if RIGHT_JOIN_KW.is_match(sql) {
        features.push("right_joined");
    }

    if WHERE_KW.is_match(sql) {
        features.push("filtered");
    }
    if ORDER_BY_KW.is_match(sql) {
        features.push("sorted");
    }
    if LIMIT_KW.is_match(sql) {
        features.push("limited");
    }
    if OFFSET_KW.is_match(sql) {
        features.push("offset");
    }
    if HAVING_KW.is_match(sql) {
        features.push("having");
    }
    if DISTINCT_KW.is_match(sql) {
        features.push("distinct");
    }

    let mut parts = vec![prefix];
    parts.extend(
        FEATURE_PRIORITY
            .iter()
            .filter(|f| features.contains(f))
            .take(3)
            .copied(),
    );

    let name = parts.join("_");
    let name = name.to_lowercase();
    let name = SAFE.replace_all(&name, "_");
    let name = UNDERSCORE_RUNS.replace_all(&name, "_");
    let name = name.trim_matches('_');

    let shortened: String = name.chars().take(50).collect();
    let shortened = shortened.trim_end_matches('_');

    if shortened.is_empty() {
        "query".to_string()
    } else {
        shortened.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_hash_is_deterministic() {
        assert_eq!(short_hash("abc", 4), short_hash("abc", 4));
        assert_eq!(short_hash("abc", 4).len(), 4);
        assert_ne!(short_hash("abc", 8), short_hash("abd", 8));
    }

    #[test]
    fn test_slug_basic() {
        assert_eq!(slug("Spider Train v2", "tool"), "spider_train_v2");
        assert_eq!(slug("___", "tool"), "tool");
        assert_eq!(slug("9lives", "tool"), "tool_9lives");
    }

    #[test]
    fn test_slug_truncates_to_60() {
        let long = "x".repeat(100);
        assert_eq!(slug(&long, "tool").len(), 60);
    }

    #[test]
    fn test_smart_name_operation_prefixes() {
        assert!(generate_smart_tool_name("SELECT a FROM t").starts_with("select"));
        assert!(generate_smart_tool_name("  INSERT INTO t VALUES (1)").starts_with("insert"));
        assert!(generate_smart_tool_name("UPDATE t SET a = 1").starts_with("update"));
        assert!(generate_smart_tool_name("DELETE FROM t").starts_with("delete"));
        assert_eq!(generate_smart_tool_name("EXPLAIN SELECT 1"), "query");
    }

    #[test]
    fn test_smart_name_feature_priority_caps_at_three() {
        let name = generate_smart_tool_name(
            "SELECT COUNT(*) FROM a JOIN b ON a.x = b.x WHERE a.y = 1 GROUP BY a.z ORDER BY COUNT(*) LIMIT 5",
        );
        // count > grouped > joined; filtered/sorted/limited fall off.
        assert_eq!(name, "select_count_grouped_joined");
    }

    #[test]
    fn test_smart_name_left_join_tags_joined() {
        // The general JOIN pattern matches LEFT JOIN first.
        let name = generate_smart_tool_name("SELECT a FROM t LEFT JOIN u ON t.i = u.i");
        assert_eq!(name, "select_joined");
    }

    #[test]
    fn test_smart_name_aggregate_precedence() {
        assert_eq!(
            generate_smart_tool_name("SELECT SUM(x), MAX(y) FROM t"),
            "select_sum"
        );
        assert_eq!(
            generate_smart_tool_name("SELECT MAX(y) FROM t"),
            "select_aggregate"
        );
    }

    #[test]
    fn test_smart_name_reference_example() {
        assert_eq!(
            generate_smart_tool_name(
                "SELECT COUNT(*) FROM t GROUP BY a ORDER BY COUNT(*) DESC LIMIT 5"
            ),
            "select_count_grouped_sorted"
        );
    }
}

//! Quality scoring.
//!
//! Rates a parameterized tool from 0 to 100 across four components:
//! parameter count/diversity (0-40), SQL structural complexity (0-30),
//! description quality (0-20), and reusability after hardcoded-value
//! penalties (0-10). The overall score is the unweighted sum; the
//! component caps alone bound the total.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use toolmint_core::{QualityBreakdown, TemplateParameter};

static SINGLE_QUOTED_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'[^']{2,}'").expect("valid regex"));
static DOUBLE_QUOTED_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[^"]{2,}""#).expect("valid regex"));
static PLACEHOLDER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\.\w+\}\}").expect("valid regex"));
static MULTI_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{2,}\b").expect("valid regex"));
static FROM_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bFROM\s+[a-zA-Z_]\w+").expect("valid regex"));

/// Description keywords worth 2 points each (capped at 10).
const DESCRIPTION_KEYWORDS: [&str; 13] = [
    "how many",
    "what",
    "which",
    "list",
    "show",
    "return",
    "find",
    "calculate",
    "count",
    "average",
    "maximum",
    "minimum",
    "total",
];

/// Aggregate call markers for the complexity score.
const AGGREGATE_CALLS: [&str; 5] = ["COUNT(", "SUM(", "AVG(", "MAX(", "MIN("];

/// Parameter quality score: 0-40 points.
///
/// Count tier (max 15) + distinct semantic categories inferred from name
/// substrings (3 each, max 15) + distinct `type` values (5 each, max 10).
#[must_use]
pub fn calculate_parameter_score(params: &[TemplateParameter]) -> f64 {
    if params.is_empty() {
        return 0.0;
    }

    let mut score = 0.0;

    score += match params.len() {
        n if n >= 5 => 15.0,
        n if n >= 3 => 10.0,
        _ => 5.0,
    };

    let mut categories = HashSet::new();
    for param in params {
        let name = param.name.to_lowercase();
        if name.contains("table") {
            categories.insert("table");
        } else if name.contains("col") || name.contains("column") {
            categories.insert("column");
        } else if name.contains("value") || name.contains("threshold") {
            categories.insert("value");
        } else if name.contains("limit") || name.contains("offset") {
            categories.insert("pagination");
        } else if name.contains("order") || name.contains("sort") {
            categories.insert("sorting");
        } else if name.contains("where")
            || name.contains("filter")
            || name.contains("join")
            || name.contains("group")
        {
            categories.insert("filter");
        }
    }
    score += (categories.len() as f64 * 3.0).min(15.0);

    let types: HashSet<&str> = params.iter().map(|p| p.type_name.as_str()).collect();
    score += (types.len() as f64 * 5.0).min(10.0);

    score.min(40.0)
}

/// SQL structural complexity score: 0-30 points.
#[must_use]
pub fn calculate_complexity_score(sql: &str) -> f64 {
    let upper = sql.to_uppercase();
    let mut score = 0.0;

    if upper.contains("SELECT") {
        score += 5.0;
    }

    if upper.contains("JOIN") {
        score += 8.0;
        let join_count = upper.matches("JOIN").count();
        score += ((join_count - 1).min(2) * 2) as f64;
    }

    if upper.contains("GROUP BY") {
        score += 7.0;
    }

    if AGGREGATE_CALLS.iter().any(|agg| upper.contains(agg)) {
        score += 5.0;
    }

    if upper.contains("WHERE") {
        score += 2.0;
    }
    if upper.contains("HAVING") {
        score += 3.0;
    }

    // Nested SELECT counts on the raw statement.
    if sql.matches("SELECT").count() > 1 {
        score += 5.0;
    }

    if upper.contains("DISTINCT") {
        score += 2.0;
    }

    score.min(30.0)
}

/// Description quality score: 0-20 points.
///
/// Length tiers 10/7/4/2 at >=100/>=50/>=20 characters, plus 2 points per
/// matched interrogative/imperative keyword (capped at 10).
#[must_use]
pub fn calculate_description_score(question: &str) -> f64 {
    if question.is_empty() {
        return 0.0;
    }

    let mut score = 0.0;

    score += match question.chars().count() {
        n if n >= 100 => 10.0,
        n if n >= 50 => 7.0,
        n if n >= 20 => 4.0,
        _ => 2.0,
    };

    let lowered = question.to_lowercase();
    let keyword_hits = DESCRIPTION_KEYWORDS
        .iter()
        .filter(|kw| lowered.contains(*kw))
        .count();
    score += ((keyword_hits * 2) as f64).min(10.0);

    score.min(20.0)
}

/// Reusability score: starts at 10, penalized for hardcoded values that
/// survived parameterization, floored at 0.
#[must_use]
pub fn calculate_reusability_score(sql: &str) -> f64 {
    let mut score: f64 = 10.0;

    if SINGLE_QUOTED_LITERAL.is_match(sql) || DOUBLE_QUOTED_LITERAL.is_match(sql) {
        score -= 3.0;
    }

    let without_placeholders = PLACEHOLDER_TOKEN.replace_all(sql, "");
    if MULTI_DIGIT.is_match(&without_placeholders) {
        score -= 2.0;
    }

    if has_literal_from_table(sql) && !sql.contains("{{.table") {
        score -= 2.0;
    }

    score.max(0.0)
}

/// True when a `FROM <identifier>` remains that is not a subquery opener.
fn has_literal_from_table(sql: &str) -> bool {
    FROM_IDENT.find_iter(sql).any(|m| {
        let rest = sql[m.end()..].trim_start();
        !rest.starts_with('(')
    })
}

/// Scores the tool from 0 to 100 and returns the per-component breakdown.
///
/// # Examples
///
/// ```
/// use toolmint_engine::calculate_tool_quality_score;
/// use toolmint_core::TemplateParameter;
///
/// let params = vec![TemplateParameter::new("table", "Table name")];
/// let (score, breakdown) = calculate_tool_quality_score(
///     "SELECT {{.select_col}} FROM {{.table}}",
///     &params,
///     "Which names are on file?",
/// );
/// assert!((breakdown.total() - score).abs() < f64::EPSILON);
/// assert!(score > 0.0);
/// ```
#[must_use]
pub fn calculate_tool_quality_score(
    sql: &str,
    params: &[TemplateParameter],
    question: &str,
) -> (f64, QualityBreakdown) {
    let breakdown = QualityBreakdown {
        parameters: calculate_parameter_score(params),
        complexity: calculate_complexity_score(sql),
        description: calculate_description_score(question),
        reusability: calculate_reusability_score(sql),
    };
    (breakdown.total(), breakdown)
}

//! Tool quality validation.
//!
//! Cheap structural rejections first, then the scored quality gate.

use crate::quality::calculate_tool_quality_score;
use regex::Regex;
use std::sync::LazyLock;
use toolmint_core::TemplateParameter;

static TRIVIAL_SELECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*SELECT\s+\*\s+FROM\s+\w+\s*;?\s*$").expect("valid regex"));
static PLACEHOLDER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\.(\w+)\}\}").expect("valid regex"));

/// Minimum question length for a usable description.
const MIN_QUESTION_LEN: usize = 5;

/// Outcome of validating a candidate tool.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// The tool passed all gates; carries its quality score.
    Accepted { score: f64 },
    /// The tool was rejected; carries the reason and the score at the
    /// point of rejection (0.0 for structural rejections).
    Rejected { reason: String, score: f64 },
}

impl Verdict {
    /// Returns `true` for [`Verdict::Accepted`].
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted { .. })
    }

    /// The quality score regardless of outcome.
    #[must_use]
    pub fn score(&self) -> f64 {
        match self {
            Verdict::Accepted { score } | Verdict::Rejected { score, .. } => *score,
        }
    }
}

/// Validates a parameterized tool against structural and quality gates.
///
/// Structural gates reject empty SQL, parameter-free tools, trivial
/// `SELECT * FROM table` statements, parameter lists that never appear in
/// the SQL, and questions too short to describe anything. Tools passing
/// those gates are scored and must reach `min_score`.
///
/// # Examples
///
/// ```
/// use toolmint_engine::{validate_tool, Verdict};
///
/// let verdict = validate_tool("SELECT * FROM users", &[], "List users", 50.0);
/// assert_eq!(
///     verdict,
///     Verdict::Rejected {
///         reason: "No parameters - not reusable".to_string(),
///         score: 0.0,
///     }
/// );
/// ```
#[must_use]
pub fn validate_tool(
    sql: &str,
    params: &[TemplateParameter],
    question: &str,
    min_score: f64,
) -> Verdict {
    if sql.trim().is_empty() {
        return rejected("Empty SQL");
    }

    if params.is_empty() {
        return rejected("No parameters - not reusable");
    }

    if TRIVIAL_SELECT.is_match(sql) {
        return rejected("Too simple - just SELECT * FROM table");
    }

    if !PLACEHOLDER_NAME.is_match(sql) {
        return rejected("Parameters defined but not used in SQL");
    }

    if question.len() < MIN_QUESTION_LEN {
        return rejected("No meaningful description");
    }

    let (score, breakdown) = calculate_tool_quality_score(sql, params, question);
    if score < min_score {
        return Verdict::Rejected {
            reason: format!("Quality score too low: {score:.1}/100 ({breakdown})"),
            score,
        };
    }

    Verdict::Accepted { score }
}

fn rejected(reason: &str) -> Verdict {
    Verdict::Rejected {
        reason: reason.to_string(),
        score: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(name: &str) -> TemplateParameter {
        TemplateParameter::new(name, "desc")
    }

    #[test]
    fn test_rejects_empty_sql() {
        let verdict = validate_tool("   ", &[param("x")], "question here", 50.0);
        assert_eq!(
            verdict,
            Verdict::Rejected {
                reason: "Empty SQL".to_string(),
                score: 0.0
            }
        );
    }

    #[test]
    fn test_rejects_no_parameters() {
        let verdict = validate_tool("SELECT a FROM t WHERE b = 1", &[], "question here", 50.0);
        assert!(!verdict.is_accepted());
        assert!(verdict.score().abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_trivial_select_star() {
        for sql in ["SELECT * FROM users", "  select * from users ; "] {
            let verdict = validate_tool(sql, &[param("x")], "question here", 50.0);
            assert_eq!(
                verdict,
                Verdict::Rejected {
                    reason: "Too simple - just SELECT * FROM table".to_string(),
                    score: 0.0
                }
            );
        }
    }

    #[test]
    fn test_select_star_with_where_is_not_trivial() {
        let verdict = validate_tool(
            "SELECT * FROM {{.table}} WHERE {{.where_col}} = {{.value}}",
            &[param("table"), param("where_col"), param("value")],
            "show matching rows from a table",
            0.0,
        );
        assert!(verdict.is_accepted());
    }

    #[test]
    fn test_rejects_unused_parameters() {
        let verdict = validate_tool(
            "SELECT a FROM t WHERE b = 1",
            &[param("value")],
            "question here",
            50.0,
        );
        assert_eq!(
            verdict,
            Verdict::Rejected {
                reason: "Parameters defined but not used in SQL".to_string(),
                score: 0.0
            }
        );
    }

    #[test]
    fn test_rejects_short_question() {
        let verdict = validate_tool(
            "SELECT {{.select_col}} FROM {{.table}}",
            &[param("table"), param("select_col")],
            "hey",
            50.0,
        );
        assert_eq!(
            verdict,
            Verdict::Rejected {
                reason: "No meaningful description".to_string(),
                score: 0.0
            }
        );
    }

    #[test]
    fn test_rejects_low_score_with_breakdown() {
        let verdict = validate_tool(
            "SELECT {{.select_col}} FROM {{.table}}",
            &[param("table"), param("select_col")],
            "short",
            99.0,
        );
        match verdict {
            Verdict::Rejected { reason, score } => {
                assert!(reason.starts_with("Quality score too low:"));
                assert!(reason.contains("parameters="));
                assert!(reason.contains("reusability="));
                assert!(score > 0.0);
            }
            Verdict::Accepted { .. } => panic!("expected rejection"),
        }
    }

    #[test]
    fn test_accepts_rich_tool() {
        let sql = "SELECT {{.select_col}} FROM {{.table}} \
                   WHERE {{.where_col}} > {{.value}} LIMIT {{.limit_n}}";
        let params = vec![
            param("value"),
            param("table"),
            param("select_col"),
            param("where_col"),
            param("limit_n"),
        ];
        let verdict = validate_tool(sql, &params, "show the names of adult users, top ten", 50.0);
        assert!(verdict.is_accepted());
        assert!(verdict.score() >= 50.0);
    }
}

//! Semantic description generation.
//!
//! Builds retrieval-friendly tool descriptions from SQL structure and
//! parameter categories. The original question is deliberately NOT reused:
//! descriptions phrased independently of the question diversify the
//! wording available to embedding-based retrieval.

use toolmint_core::TemplateParameter;

/// Parameter names counted as adjustable filters/limits in summaries.
const FILTER_PARAM_NAMES: [&str; 4] = ["value", "threshold", "limit_n", "offset_n"];

/// Maximum description length in characters.
const MAX_DESCRIPTION_LEN: usize = 500;

/// Narrates what the SQL does, derived purely from keyword structure.
///
/// Only SELECT statements produce a narration; other operations yield an
/// empty string and the parameter summary carries the description alone.
#[must_use]
pub fn describe_sql_structure(sql: &str) -> String {
    let upper = sql.to_uppercase();
    let mut parts = Vec::new();

    if upper.contains("SELECT") {
        parts.push("Retrieves data");

        if upper.contains("COUNT(") {
            parts.push("counts records");
        } else if upper.contains("SUM(") {
            parts.push("calculates sum");
        } else if upper.contains("AVG(") {
            parts.push("calculates average");
        } else if upper.contains("MAX(") || upper.contains("MIN(") {
            parts.push("finds extremes");
        }

        if upper.contains("JOIN") {
            parts.push("by joining multiple tables");
        }
        if upper.contains("GROUP BY") {
            parts.push("grouped by criteria");
        }
        if upper.contains("WHERE") {
            parts.push("with filtering conditions");
        }
        if upper.contains("ORDER BY") {
            parts.push("sorted by specified column");
        }
        if upper.contains("LIMIT") {
            parts.push("limited to top results");
        }
    }

    parts.join(" ")
}

/// Summarizes the parameter list by category counts.
///
/// Categories overlap by design: a `limit_n` parameter counts both as an
/// adjustable filter and as a string parameter.
#[must_use]
pub fn describe_parameters(params: &[TemplateParameter]) -> String {
    if params.is_empty() {
        return String::new();
    }

    let tables = params
        .iter()
        .filter(|p| p.name.to_lowercase().contains("table"))
        .count();
    let columns = params
        .iter()
        .filter(|p| p.name.to_lowercase().contains("col"))
        .count();
    let filters = params
        .iter()
        .filter(|p| FILTER_PARAM_NAMES.contains(&p.name.as_str()))
        .count();
    let strings = params
        .iter()
        .filter(|p| {
            let name = p.name.to_lowercase();
            p.type_name == "string" && !name.contains("table") && !name.contains("col")
        })
        .count();

    let mut parts = Vec::new();
    if tables > 0 {
        parts.push(format!("customizable tables ({tables})"));
    }
    if columns > 0 {
        parts.push(format!("flexible column selection ({columns})"));
    }
    if filters > 0 {
        parts.push(format!("adjustable filters and limits ({filters})"));
    }
    if strings > 0 {
        parts.push(format!("string pattern matching ({strings})"));
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!("Parameters: {}", parts.join(", "))
    }
}

/// Builds the retrieval-optimized description for a parameterized tool.
///
/// Concatenates the structural narration with the parameter summary,
/// joined by ". " and truncated to 500 characters.
///
/// # Examples
///
/// ```
/// use toolmint_engine::generate_semantic_description;
/// use toolmint_core::TemplateParameter;
///
/// let params = vec![TemplateParameter::new("table", "Table name")];
/// let desc = generate_semantic_description(
///     "SELECT {{.select_col}} FROM {{.table}} WHERE {{.where_col}} > {{.value}}",
///     &params,
/// );
/// assert!(desc.starts_with("Retrieves data with filtering conditions"));
/// assert!(desc.contains("customizable tables (1)"));
/// ```
#[must_use]
pub fn generate_semantic_description(sql: &str, params: &[TemplateParameter]) -> String {
    let mut parts = Vec::new();

    let structure = describe_sql_structure(sql);
    if !structure.is_empty() {
        parts.push(structure);
    }

    if !params.is_empty() {
        let param_summary = describe_parameters(params);
        if !param_summary.is_empty() {
            parts.push(param_summary);
        }
    }

    let description = parts.join(". ");
    description.chars().take(MAX_DESCRIPTION_LEN).collect()
}

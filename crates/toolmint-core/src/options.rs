//! Minting options.
//!
//! Controls which parameterization passes run and the quality threshold
//! applied around the validator. Use the builder for partial overrides.

/// Configuration for the minting pipeline.
///
/// # Examples
///
/// ```
/// use toolmint_core::MintOptions;
///
/// let defaults = MintOptions::default();
/// assert!(defaults.parameterize_tables);
/// assert!(defaults.parameterize_columns);
/// assert_eq!(defaults.min_params, 2);
/// assert!((defaults.min_score - 50.0).abs() < f64::EPSILON);
///
/// let strict = MintOptions::builder()
///     .parameterize_tables(false)
///     .min_score(70.0)
///     .build();
/// assert!(!strict.parameterize_tables);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MintOptions {
    /// Replace table names after FROM/JOIN/INTO/UPDATE with placeholders.
    pub parameterize_tables: bool,

    /// Replace column references (SELECT list, WHERE, JOIN ON) with
    /// placeholders.
    pub parameterize_columns: bool,

    /// Minimum parameter count expected by callers filtering results.
    /// Not enforced inside the pipeline itself.
    pub min_params: usize,

    /// Minimum quality score a tool must reach to be minted.
    pub min_score: f64,
}

impl Default for MintOptions {
    fn default() -> Self {
        Self {
            parameterize_tables: true,
            parameterize_columns: true,
            min_params: 2,
            min_score: 50.0,
        }
    }
}

impl MintOptions {
    /// Creates a new builder for `MintOptions`.
    #[must_use]
    pub fn builder() -> MintOptionsBuilder {
        MintOptionsBuilder::default()
    }
}

/// Builder for [`MintOptions`].
///
/// Unset fields fall back to the defaults.
#[derive(Debug, Clone, Default)]
pub struct MintOptionsBuilder {
    parameterize_tables: Option<bool>,
    parameterize_columns: Option<bool>,
    min_params: Option<usize>,
    min_score: Option<f64>,
}

impl MintOptionsBuilder {
    /// Sets whether table names are parameterized.
    #[must_use]
    pub fn parameterize_tables(mut self, enabled: bool) -> Self {
        self.parameterize_tables = Some(enabled);
        self
    }

    /// Sets whether column references are parameterized.
    #[must_use]
    pub fn parameterize_columns(mut self, enabled: bool) -> Self {
        self.parameterize_columns = Some(enabled);
        self
    }

    /// Sets the minimum parameter count for caller-side filtering.
    #[must_use]
    pub fn min_params(mut self, min_params: usize) -> Self {
        self.min_params = Some(min_params);
        self
    }

    /// Sets the minimum quality score.
    #[must_use]
    pub fn min_score(mut self, min_score: f64) -> Self {
        self.min_score = Some(min_score);
        self
    }

    /// Builds the options, using defaults for unset fields.
    #[must_use]
    pub fn build(self) -> MintOptions {
        let defaults = MintOptions::default();
        MintOptions {
            parameterize_tables: self
                .parameterize_tables
                .unwrap_or(defaults.parameterize_tables),
            parameterize_columns: self
                .parameterize_columns
                .unwrap_or(defaults.parameterize_columns),
            min_params: self.min_params.unwrap_or(defaults.min_params),
            min_score: self.min_score.unwrap_or(defaults.min_score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = MintOptions::default();
        assert!(opts.parameterize_tables);
        assert!(opts.parameterize_columns);
        assert_eq!(opts.min_params, 2);
        assert!((opts.min_score - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_builder_partial_override() {
        let opts = MintOptions::builder()
            .parameterize_columns(false)
            .min_score(65.0)
            .build();
        assert!(opts.parameterize_tables);
        assert!(!opts.parameterize_columns);
        assert_eq!(opts.min_params, 2);
        assert!((opts.min_score - 65.0).abs() < f64::EPSILON);
    }
}

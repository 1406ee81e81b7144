//! Error types for textmetrics.
//!
//! The metric functions themselves cannot fail on borrowed input. Errors only
//! arise at the checked entry points, where an argument may be absent, and
//! when parameters or names are parsed from user input.

use thiserror::Error;

/// Errors reported by the checked metric functions and the parsing helpers.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum MetricError {
    /// A compared sequence was absent. An empty sequence is valid input.
    #[error("{argument} must not be null")]
    NullInput { argument: &'static str },

    /// A parameter is outside the range the metric accepts
    #[error("invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Input is too long for a metric that allocates an O(m*n) table
    #[error("{argument} is {len} code units long, exceeding the limit of {max}")]
    InputTooLong {
        argument: &'static str,
        len: usize,
        max: usize,
    },

    /// Metric name did not match any known algorithm
    #[error("unknown metric '{0}' (valid: jaro_winkler, damerau_levenshtein)")]
    UnknownMetric(String),

    /// Normalization mode name did not match any known mode
    #[error(
        "unknown normalization mode '{0}' (valid: lowercase, unicode_nfkd, remove_punctuation, remove_whitespace, strict)"
    )]
    UnknownNormalization(String),
}

impl MetricError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Unwrap an optional argument or report it as absent.
pub(crate) fn require<'a>(
    value: Option<&'a str>,
    argument: &'static str,
) -> Result<&'a str, MetricError> {
    value.ok_or_else(|| {
        tracing::debug!(argument, "rejecting absent input");
        MetricError::NullInput { argument }
    })
}

/// Check that a score-like parameter is a finite number in [0.0, 1.0].
pub(crate) fn validate_unit_interval(value: f64, name: &'static str) -> Result<(), MetricError> {
    if !value.is_finite() {
        return Err(MetricError::invalid(
            name,
            format!("must be a finite number, got {value}"),
        ));
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(MetricError::invalid(
            name,
            format!("must be in range [0.0, 1.0], got {value}"),
        ));
    }
    Ok(())
}

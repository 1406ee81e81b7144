//! Python bindings (`textmetrics._core`).
//!
//! Python `None` is the absent input. It raises `NullInputError`, which is
//! distinct from the valid empty string.

use crate::algorithms::normalize::{normalize as apply_normalization, Normalization};
use crate::algorithms::{self, JaroWinklerConfig, MetricKind};
use crate::batch::{self, Scorer};
use crate::error::{require, MetricError};
use pyo3::create_exception;
use pyo3::prelude::*;

// ============================================================================
// Custom Python Exceptions
// ============================================================================
//
// TextMetricsError (base)
//   ├── NullInputError - A compared string was None
//   ├── ValidationError - Invalid parameter values or oversized input
//   └── AlgorithmError - Unknown metric or normalization name

create_exception!(textmetrics, TextMetricsError, pyo3::exceptions::PyException);
create_exception!(textmetrics, NullInputError, TextMetricsError);
create_exception!(textmetrics, ValidationError, TextMetricsError);
create_exception!(textmetrics, AlgorithmError, TextMetricsError);

impl From<MetricError> for PyErr {
    fn from(err: MetricError) -> Self {
        let message = err.to_string();
        match err {
            MetricError::NullInput { .. } => NullInputError::new_err(message),
            MetricError::InvalidParameter { .. } | MetricError::InputTooLong { .. } => {
                ValidationError::new_err(message)
            }
            MetricError::UnknownMetric(_) | MetricError::UnknownNormalization(_) => {
                AlgorithmError::new_err(message)
            }
        }
    }
}

fn parse_normalization(normalize: Option<&str>) -> PyResult<Option<Normalization>> {
    Ok(normalize.map(str::parse::<Normalization>).transpose()?)
}

fn build_scorer(
    metric: &str,
    prefix_size: usize,
    weight_threshold: f64,
    normalize: Option<&str>,
) -> PyResult<Scorer> {
    let scorer = Scorer::new(metric.parse::<MetricKind>()?)
        .with_jaro_winkler_config(JaroWinklerConfig::new(prefix_size, weight_threshold))
        .with_normalization(parse_normalization(normalize)?);
    scorer.validate()?;
    Ok(scorer)
}

// ============================================================================
// Python Result Types
// ============================================================================

/// Result from score_batch and best_matches.
#[pyclass(name = "MatchResult", frozen)]
#[derive(Clone, Debug)]
pub struct PyMatchResult {
    /// Index of the candidate in the input list
    #[pyo3(get)]
    pub id: usize,

    /// The candidate text
    #[pyo3(get)]
    pub text: String,

    /// Distance (0.0 identical, 1.0 unrelated)
    #[pyo3(get)]
    pub distance: f64,

    /// Similarity (1.0 - distance)
    #[pyo3(get)]
    pub similarity: f64,
}

#[pymethods]
impl PyMatchResult {
    fn __repr__(&self) -> String {
        format!(
            "MatchResult(id={}, text='{}', distance={:.4}, similarity={:.4})",
            self.id, self.text, self.distance, self.similarity
        )
    }
}

impl From<batch::MatchResult> for PyMatchResult {
    fn from(r: batch::MatchResult) -> Self {
        Self {
            id: r.id,
            text: r.text,
            distance: r.distance,
            similarity: r.similarity,
        }
    }
}

// ============================================================================
// Metric Functions
// ============================================================================

/// Compute Jaro-Winkler distance (0.0 identical, 1.0 unrelated).
///
/// # Arguments
/// * `prefix_size` - Maximum shared prefix length that earns a boost
/// * `weight_threshold` - Jaro weight that must be exceeded before boosting (in [0.0, 1.0])
/// * `normalize` - Optional normalization mode: "lowercase", "unicode_nfkd", "remove_punctuation", "remove_whitespace", "strict"
#[pyfunction]
#[pyo3(signature = (source, target, prefix_size=4, weight_threshold=0.7, normalize=None))]
fn jaro_winkler_distance(
    source: Option<&str>,
    target: Option<&str>,
    prefix_size: usize,
    weight_threshold: f64,
    normalize: Option<&str>,
) -> PyResult<f64> {
    let source = require(source, "source")?;
    let target = require(target, "target")?;
    let mode = parse_normalization(normalize)?;
    let source = apply_normalization(source, mode);
    let target = apply_normalization(target, mode);
    let config = JaroWinklerConfig::new(prefix_size, weight_threshold);
    Ok(algorithms::try_jaro_winkler_distance(
        Some(&*source),
        Some(&*target),
        &config,
    )?)
}

/// Compute Jaro-Winkler similarity (1.0 - distance).
#[pyfunction]
#[pyo3(signature = (source, target, prefix_size=4, weight_threshold=0.7, normalize=None))]
fn jaro_winkler_similarity(
    source: Option<&str>,
    target: Option<&str>,
    prefix_size: usize,
    weight_threshold: f64,
    normalize: Option<&str>,
) -> PyResult<f64> {
    jaro_winkler_distance(source, target, prefix_size, weight_threshold, normalize).map(|d| 1.0 - d)
}

/// Compute Damerau-Levenshtein distance in UTF-16 code units.
///
/// Raises `ValidationError` for input longer than `MAX_QUADRATIC_LENGTH`.
#[pyfunction]
#[pyo3(signature = (source, target, normalize=None))]
fn damerau_levenshtein_distance(
    source: Option<&str>,
    target: Option<&str>,
    normalize: Option<&str>,
) -> PyResult<usize> {
    let source = require(source, "source")?;
    let target = require(target, "target")?;
    let mode = parse_normalization(normalize)?;
    let source = apply_normalization(source, mode);
    let target = apply_normalization(target, mode);
    Ok(algorithms::try_damerau_levenshtein_distance(
        Some(&*source),
        Some(&*target),
    )?)
}

/// Compute normalized Damerau-Levenshtein similarity (0.0 to 1.0).
#[pyfunction]
#[pyo3(signature = (source, target, normalize=None))]
fn damerau_levenshtein_similarity(
    source: Option<&str>,
    target: Option<&str>,
    normalize: Option<&str>,
) -> PyResult<f64> {
    let source = require(source, "source")?;
    let target = require(target, "target")?;
    let mode = parse_normalization(normalize)?;
    let source = apply_normalization(source, mode);
    let target = apply_normalization(target, mode);
    Ok(algorithms::try_damerau_levenshtein_similarity(
        Some(&*source),
        Some(&*target),
    )?)
}

// ============================================================================
// Batch Processing
// ============================================================================

/// Score every candidate against the query, in input order.
///
/// Releases the Python GIL during computation.
#[pyfunction]
#[pyo3(signature = (candidates, query, metric="jaro_winkler", prefix_size=4, weight_threshold=0.7, normalize=None))]
fn score_batch(
    py: Python<'_>,
    candidates: Vec<String>,
    query: &str,
    metric: &str,
    prefix_size: usize,
    weight_threshold: f64,
    normalize: Option<&str>,
) -> PyResult<Vec<PyMatchResult>> {
    let scorer = build_scorer(metric, prefix_size, weight_threshold, normalize)?;
    let results = py.allow_threads(|| batch::score_batch(&candidates, query, &scorer))?;
    Ok(results.into_iter().map(PyMatchResult::from).collect())
}

/// Best matches for the query, most similar first.
///
/// Releases the Python GIL during computation.
#[pyfunction]
#[pyo3(signature = (candidates, query, metric="jaro_winkler", limit=10, min_similarity=0.0, prefix_size=4, weight_threshold=0.7, normalize=None))]
#[allow(clippy::too_many_arguments)]
fn best_matches(
    py: Python<'_>,
    candidates: Vec<String>,
    query: &str,
    metric: &str,
    limit: usize,
    min_similarity: f64,
    prefix_size: usize,
    weight_threshold: f64,
    normalize: Option<&str>,
) -> PyResult<Vec<PyMatchResult>> {
    let scorer = build_scorer(metric, prefix_size, weight_threshold, normalize)?;
    let results = py.allow_threads(|| {
        batch::best_matches(&candidates, query, &scorer, limit, min_similarity)
    })?;
    Ok(results.into_iter().map(PyMatchResult::from).collect())
}

#[pymodule]
fn _core(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Custom exceptions
    m.add("TextMetricsError", py.get_type::<TextMetricsError>())?;
    m.add("NullInputError", py.get_type::<NullInputError>())?;
    m.add("ValidationError", py.get_type::<ValidationError>())?;
    m.add("AlgorithmError", py.get_type::<AlgorithmError>())?;

    m.add_class::<PyMatchResult>()?;

    m.add("DEFAULT_PREFIX_SIZE", algorithms::DEFAULT_PREFIX_SIZE)?;
    m.add("DEFAULT_WEIGHT_THRESHOLD", algorithms::DEFAULT_WEIGHT_THRESHOLD)?;
    m.add("MAX_QUADRATIC_LENGTH", algorithms::MAX_QUADRATIC_LENGTH)?;

    m.add_function(wrap_pyfunction!(jaro_winkler_distance, m)?)?;
    m.add_function(wrap_pyfunction!(jaro_winkler_similarity, m)?)?;
    m.add_function(wrap_pyfunction!(damerau_levenshtein_distance, m)?)?;
    m.add_function(wrap_pyfunction!(damerau_levenshtein_similarity, m)?)?;
    m.add_function(wrap_pyfunction!(score_batch, m)?)?;
    m.add_function(wrap_pyfunction!(best_matches, m)?)?;

    Ok(())
}

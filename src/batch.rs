//! Batch scoring: one query against many candidates.
//!
//! Uses parallel processing for large inputs and sequential processing for
//! smaller inputs to avoid thread pool overhead. Each single comparison stays
//! single-threaded.

use crate::algorithms::damerau::ensure_within_limit;
use crate::algorithms::normalize::{normalize, Normalization};
use crate::algorithms::{JaroWinklerConfig, MetricKind, Similarity};
use crate::error::{validate_unit_interval, MetricError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;

/// Minimum input size for parallel processing.
///
/// Below this, sequential scoring is faster than coordinating the thread pool.
pub const PARALLEL_THRESHOLD: usize = 100;

/// Which metric to score with, and how.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scorer {
    pub metric: MetricKind,
    /// Only read by Jaro-Winkler
    pub jaro_winkler: JaroWinklerConfig,
    pub normalization: Option<Normalization>,
}

impl Scorer {
    #[must_use]
    pub fn new(metric: MetricKind) -> Self {
        Self {
            metric,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_jaro_winkler_config(mut self, config: JaroWinklerConfig) -> Self {
        self.jaro_winkler = config;
        self
    }

    #[must_use]
    pub fn with_normalization(mut self, normalization: Option<Normalization>) -> Self {
        self.normalization = normalization;
        self
    }

    pub fn validate(&self) -> Result<(), MetricError> {
        self.jaro_winkler.validate()
    }

    /// Score a single pair.
    ///
    /// # Errors
    ///
    /// Returns [`MetricError::InvalidParameter`] for an invalid configuration
    /// and [`MetricError::InputTooLong`] for oversized Damerau-Levenshtein
    /// input.
    pub fn score(&self, a: &str, b: &str) -> Result<MatchScore, MetricError> {
        self.validate()?;
        let metric = self.metric.build(self.jaro_winkler);
        let a = self.prepare(a, "source")?;
        let b = self.prepare(b, "target")?;
        Ok(MatchScore::from_metric(&*metric, &a, &b))
    }

    /// Normalize one input and check it against the metric's length limit.
    fn prepare<'a>(
        &self,
        s: &'a str,
        argument: &'static str,
    ) -> Result<Cow<'a, str>, MetricError> {
        let s = normalize(s, self.normalization);
        if self.metric == MetricKind::DamerauLevenshtein {
            ensure_within_limit(&s, argument)?;
        }
        Ok(s)
    }
}

/// Distance and similarity of one comparison. `similarity == 1 - distance`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub distance: f64,
    pub similarity: f64,
}

impl MatchScore {
    fn from_metric(metric: &dyn Similarity, a: &str, b: &str) -> Self {
        let distance = metric.distance(a, b);
        Self {
            distance,
            similarity: 1.0 - distance,
        }
    }
}

/// Result for one candidate of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Index of the candidate in the input
    pub id: usize,
    /// The candidate as given, before normalization
    pub text: String,
    pub distance: f64,
    pub similarity: f64,
}

/// Score every candidate against `query`, preserving input order.
///
/// Damerau-Levenshtein results are normalized by the longer input length.
///
/// # Errors
///
/// Returns [`MetricError::InvalidParameter`] for an invalid scorer
/// configuration and [`MetricError::InputTooLong`] if the query or any
/// candidate exceeds the Damerau-Levenshtein length limit.
pub fn score_batch<S>(
    candidates: &[S],
    query: &str,
    scorer: &Scorer,
) -> Result<Vec<MatchResult>, MetricError>
where
    S: AsRef<str> + Sync,
{
    scorer.validate()?;
    let metric = scorer.metric.build(scorer.jaro_winkler);
    let query = scorer.prepare(query, "query")?;
    let parallel = candidates.len() >= PARALLEL_THRESHOLD;

    tracing::debug!(
        metric = metric.name(),
        candidates = candidates.len(),
        parallel,
        "scoring batch"
    );

    let score_one = |(id, candidate): (usize, &S)| -> Result<MatchResult, MetricError> {
        let text = candidate.as_ref();
        let prepared = scorer.prepare(text, "candidate")?;
        let score = MatchScore::from_metric(&*metric, &prepared, &query);
        Ok(MatchResult {
            id,
            text: text.to_string(),
            distance: score.distance,
            similarity: score.similarity,
        })
    };

    if parallel {
        candidates.par_iter().enumerate().map(score_one).collect()
    } else {
        candidates.iter().enumerate().map(score_one).collect()
    }
}

/// Best `limit` candidates with `similarity >= min_similarity`.
///
/// Ordered by similarity descending, ties broken by input position.
///
/// # Errors
///
/// Returns [`MetricError::InvalidParameter`] if `min_similarity` is not in
/// [0.0, 1.0] or the scorer configuration is invalid.
pub fn best_matches<S>(
    candidates: &[S],
    query: &str,
    scorer: &Scorer,
    limit: usize,
    min_similarity: f64,
) -> Result<Vec<MatchResult>, MetricError>
where
    S: AsRef<str> + Sync,
{
    validate_unit_interval(min_similarity, "min_similarity")?;

    let mut results: Vec<MatchResult> = score_batch(candidates, query, scorer)?
        .into_iter()
        .filter(|r| r.similarity >= min_similarity)
        .collect();

    results.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    results.truncate(limit);
    Ok(results)
}

/// Pairwise distances: `matrix[i][j]` compares `queries[i]` with `choices[j]`.
///
/// # Errors
///
/// Same as [`score_batch`].
pub fn distance_matrix<Q, C>(
    queries: &[Q],
    choices: &[C],
    scorer: &Scorer,
) -> Result<Vec<Vec<f64>>, MetricError>
where
    Q: AsRef<str> + Sync,
    C: AsRef<str> + Sync,
{
    scorer.validate()?;
    let metric = scorer.metric.build(scorer.jaro_winkler);
    let choices = choices
        .iter()
        .map(|c| scorer.prepare(c.as_ref(), "choice"))
        .collect::<Result<Vec<_>, _>>()?;

    let row = |query: &Q| -> Result<Vec<f64>, MetricError> {
        let query = scorer.prepare(query.as_ref(), "query")?;
        Ok(choices.iter().map(|c| metric.distance(&query, c)).collect())
    };

    if queries.len() * choices.len() >= PARALLEL_THRESHOLD {
        queries.par_iter().map(row).collect()
    } else {
        queries.iter().map(row).collect()
    }
}

//! Jaro-Winkler distance implementation
//!
//! Excellent for name matching and short strings. The Winkler adjustment
//! rewards a shared prefix, but only once the Jaro weight clears a threshold.
//!
//! Character matching is greedy and first-fit: each source unit claims the
//! first unclaimed equal target unit inside the search window. This can find
//! fewer matches than an optimal assignment would, and that is the intended
//! behavior.
//!
//! # Performance Optimization
//!
//! ASCII input is compared directly as bytes. Other input is converted to
//! UTF-16 code units, kept inline for strings of up to 64 units.

use super::{utf16_units, CodeUnit, Similarity};
use crate::error::{require, validate_unit_interval, MetricError};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Default number of leading units considered for the prefix boost.
pub const DEFAULT_PREFIX_SIZE: usize = 4;

/// Default Jaro weight above which the prefix boost applies.
pub const DEFAULT_WEIGHT_THRESHOLD: f64 = 0.7;

/// Scaling factor applied per shared prefix unit.
const PREFIX_SCALE: f64 = 0.1;

/// Largest prefix size for which the boost cannot push similarity past 1.0.
const MAX_SAFE_PREFIX_SIZE: usize = 10;

// ============================================================================
// Configuration
// ============================================================================

/// Parameters for the Winkler adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JaroWinklerConfig {
    /// Maximum prefix length to consider (typically 4)
    pub prefix_size: usize,
    /// Jaro weight that must be exceeded before the boost applies (typically 0.7)
    pub weight_threshold: f64,
}

impl Default for JaroWinklerConfig {
    fn default() -> Self {
        Self {
            prefix_size: DEFAULT_PREFIX_SIZE,
            weight_threshold: DEFAULT_WEIGHT_THRESHOLD,
        }
    }
}

impl JaroWinklerConfig {
    #[must_use]
    pub fn new(prefix_size: usize, weight_threshold: f64) -> Self {
        Self {
            prefix_size,
            weight_threshold,
        }
    }

    /// Reject thresholds that are not a finite number in [0.0, 1.0].
    ///
    /// Prefix sizes are not restricted. Sizes above 10 can overshoot, in which
    /// case the distance is floored at 0.0.
    pub fn validate(&self) -> Result<(), MetricError> {
        validate_unit_interval(self.weight_threshold, "weight_threshold")
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Jaro-Winkler metric
///
/// # Complexity
/// - Time: O(m*w) where w is the search window, O(m*n) worst case
/// - Space: O(m+n) for match flags
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JaroWinkler {
    config: JaroWinklerConfig,
}

impl JaroWinkler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(config: JaroWinklerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> JaroWinklerConfig {
        self.config
    }

    #[must_use]
    pub fn with_prefix_size(mut self, prefix_size: usize) -> Self {
        if prefix_size > MAX_SAFE_PREFIX_SIZE {
            tracing::warn!(
                prefix_size,
                max_safe = MAX_SAFE_PREFIX_SIZE,
                "prefix size can overshoot; distance will be floored at 0.0"
            );
        }
        self.config.prefix_size = prefix_size;
        self
    }

    #[must_use]
    pub fn with_weight_threshold(mut self, weight_threshold: f64) -> Self {
        self.config.weight_threshold = weight_threshold;
        self
    }
}

impl Similarity for JaroWinkler {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        1.0 - jaro_winkler_distance_with(a, b, &self.config)
    }

    fn distance(&self, a: &str, b: &str) -> f64 {
        jaro_winkler_distance_with(a, b, &self.config)
    }

    fn name(&self) -> &'static str {
        "jaro_winkler"
    }
}

/// Jaro-Winkler distance with default parameters.
///
/// Returns 0.0 for identical input and 1.0 when nothing matches.
///
/// ```
/// use textmetrics::jaro_winkler_distance;
///
/// assert_eq!(jaro_winkler_distance("", ""), 0.0);
/// assert_eq!(jaro_winkler_distance("jump", "still"), 1.0);
/// assert!(jaro_winkler_distance("MARTHA", "MARHTA") < 0.05);
/// ```
#[inline]
#[must_use]
pub fn jaro_winkler_distance(source: &str, target: &str) -> f64 {
    jaro_winkler_distance_with(source, target, &JaroWinklerConfig::default())
}

/// Jaro-Winkler distance with custom parameters.
#[must_use]
pub fn jaro_winkler_distance_with(source: &str, target: &str, config: &JaroWinklerConfig) -> f64 {
    if source.is_ascii() && target.is_ascii() {
        return jaro_winkler_distance_units(source.as_bytes(), target.as_bytes(), config);
    }

    let source = utf16_units(source);
    let target = utf16_units(target);
    jaro_winkler_distance_units(&source, &target, config)
}

/// Similarity version (1.0 - distance) with default parameters.
#[inline]
#[must_use]
pub fn jaro_winkler_similarity(source: &str, target: &str) -> f64 {
    1.0 - jaro_winkler_distance(source, target)
}

/// Similarity version (1.0 - distance) with custom parameters.
#[inline]
#[must_use]
pub fn jaro_winkler_similarity_with(source: &str, target: &str, config: &JaroWinklerConfig) -> f64 {
    1.0 - jaro_winkler_distance_with(source, target, config)
}

/// Jaro-Winkler distance for possibly absent input.
///
/// # Errors
///
/// Returns [`MetricError::NullInput`] if either argument is `None` and
/// [`MetricError::InvalidParameter`] if the configuration is invalid.
pub fn try_jaro_winkler_distance(
    source: Option<&str>,
    target: Option<&str>,
    config: &JaroWinklerConfig,
) -> Result<f64, MetricError> {
    let source = require(source, "source")?;
    let target = require(target, "target")?;
    config.validate()?;
    Ok(jaro_winkler_distance_with(source, target, config))
}

/// Jaro-Winkler distance over arbitrary code unit sequences.
#[must_use]
pub fn jaro_winkler_distance_units<T: CodeUnit>(
    source: &[T],
    target: &[T],
    config: &JaroWinklerConfig,
) -> f64 {
    if source.is_empty() || target.is_empty() {
        return if source.is_empty() && target.is_empty() {
            0.0
        } else {
            1.0
        };
    }

    let Some(weight) = jaro_weight(source, target) else {
        return 1.0;
    };

    if weight <= config.weight_threshold {
        return 1.0 - weight;
    }

    let max_prefix = config.prefix_size.min(source.len().min(target.len()));
    let prefix_len = source
        .iter()
        .zip(target)
        .take(max_prefix)
        .take_while(|(s, t)| s == t)
        .count();

    if prefix_len == 0 {
        return 1.0 - weight;
    }

    (1.0 - (weight + PREFIX_SCALE * prefix_len as f64 * (1.0 - weight))).max(0.0)
}

/// Jaro weight of two nonempty sequences, or `None` when no units match.
fn jaro_weight<T: CodeUnit>(source: &[T], target: &[T]) -> Option<f64> {
    let source_len = source.len();
    let target_len = target.len();

    let search_range = (source_len.max(target_len) / 2).saturating_sub(1);

    let mut matched_source: SmallVec<[bool; 64]> = smallvec::smallvec![false; source_len];
    let mut matched_target: SmallVec<[bool; 64]> = smallvec::smallvec![false; target_len];

    let mut common = 0usize;

    for (i, unit) in source.iter().enumerate() {
        let start = i.saturating_sub(search_range);
        let end = (i + search_range + 1).min(target_len);

        for j in start..end {
            if matched_target[j] || target[j] != *unit {
                continue;
            }
            matched_source[i] = true;
            matched_target[j] = true;
            common += 1;
            break;
        }
    }

    if common == 0 {
        return None;
    }

    // Both flag arrays hold `common` marks, so the cursor never runs off the end
    let mut transpositions = 0usize;
    let mut k = 0usize;
    for (i, unit) in source.iter().enumerate() {
        if !matched_source[i] {
            continue;
        }
        while k < target_len && !matched_target[k] {
            k += 1;
        }
        if k >= target_len {
            break;
        }
        if *unit != target[k] {
            transpositions += 1;
        }
        k += 1;
    }

    let half_transposed = transpositions / 2;
    let common_f = common as f64;

    Some(
        (common_f / source_len as f64
            + common_f / target_len as f64
            + (common - half_transposed) as f64 / common_f)
            / 3.0,
    )
}

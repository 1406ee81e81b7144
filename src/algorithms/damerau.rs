//! Damerau-Levenshtein distance implementation
//!
//! Extends Levenshtein with adjacent transpositions. Particularly useful for
//! typo detection where letter swaps are common.
//!
//! This is the restricted (optimal string alignment) flavor computed over a
//! full table, followed by a second sweep that relaxes every cell whose last
//! two units agree with the cell two steps up the diagonal at a flat cost of
//! one. The two sweeps are kept separate so results match existing callers
//! exactly.
//!
//! Input that is empty or consists only of whitespace is treated as empty:
//! the distance is the length of the other side. As a consequence two equal
//! blank strings are at distance equal to their length, not zero.
//!
//! The table takes O(m*n) memory, so the checked entry points reject input
//! longer than [`MAX_QUADRATIC_LENGTH`] code units.

use super::{unit_len, utf16_units, CodeUnit, EditDistance};
use crate::error::{require, MetricError};

/// Maximum input length, in code units, accepted by the checked functions.
///
/// At this length the table holds about 10^8 cells (800 MB on 64-bit).
pub const MAX_QUADRATIC_LENGTH: usize = 10_000;

/// Damerau-Levenshtein distance calculator
///
/// # Complexity
/// - Time: O(m*n) where m and n are sequence lengths
/// - Space: O(m*n) for the full table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamerauLevenshtein;

impl DamerauLevenshtein {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl EditDistance for DamerauLevenshtein {
    fn distance(&self, a: &str, b: &str) -> usize {
        damerau_levenshtein_distance(a, b)
    }

    fn name(&self) -> &'static str {
        "damerau_levenshtein"
    }
}

/// Damerau-Levenshtein distance between two strings, in UTF-16 code units.
///
/// No length limit is applied. Use [`try_damerau_levenshtein_distance`] for
/// untrusted input.
///
/// ```
/// use textmetrics::damerau_levenshtein_distance;
///
/// assert_eq!(damerau_levenshtein_distance("kitten", "kittne"), 1);
/// assert_eq!(damerau_levenshtein_distance("", "hello"), 5);
/// ```
#[must_use]
pub fn damerau_levenshtein_distance(source: &str, target: &str) -> usize {
    if source.is_ascii() && target.is_ascii() {
        return damerau_levenshtein_distance_units(source.as_bytes(), target.as_bytes());
    }

    let source = utf16_units(source);
    let target = utf16_units(target);
    damerau_levenshtein_distance_units(&source, &target)
}

/// Damerau-Levenshtein distance for possibly absent input.
///
/// # Errors
///
/// Returns [`MetricError::NullInput`] if either argument is `None`, and
/// [`MetricError::InputTooLong`] if either is longer than
/// [`MAX_QUADRATIC_LENGTH`] code units.
pub fn try_damerau_levenshtein_distance(
    source: Option<&str>,
    target: Option<&str>,
) -> Result<usize, MetricError> {
    let source = require(source, "source")?;
    let target = require(target, "target")?;
    ensure_within_limit(source, "source")?;
    ensure_within_limit(target, "target")?;
    Ok(damerau_levenshtein_distance(source, target))
}

/// Normalized similarity for possibly absent input.
///
/// # Errors
///
/// Same as [`try_damerau_levenshtein_distance`].
pub fn try_damerau_levenshtein_similarity(
    source: Option<&str>,
    target: Option<&str>,
) -> Result<f64, MetricError> {
    let source = require(source, "source")?;
    let target = require(target, "target")?;
    ensure_within_limit(source, "source")?;
    ensure_within_limit(target, "target")?;
    Ok(damerau_levenshtein_similarity(source, target))
}

/// Reject input whose table would exceed [`MAX_QUADRATIC_LENGTH`].
pub(crate) fn ensure_within_limit(s: &str, argument: &'static str) -> Result<(), MetricError> {
    let len = unit_len(s);
    if len > MAX_QUADRATIC_LENGTH {
        tracing::debug!(argument, len, "rejecting input over the length limit");
        return Err(MetricError::InputTooLong {
            argument,
            len,
            max: MAX_QUADRATIC_LENGTH,
        });
    }
    Ok(())
}

/// Normalized similarity (0.0 to 1.0): `1 - distance / max_len`.
#[inline]
#[must_use]
pub fn damerau_levenshtein_similarity(source: &str, target: &str) -> f64 {
    EditDistance::similarity(&DamerauLevenshtein, source, target)
}

/// Damerau-Levenshtein distance over arbitrary code unit sequences.
#[must_use]
pub fn damerau_levenshtein_distance_units<T: CodeUnit>(source: &[T], target: &[T]) -> usize {
    if is_blank(source) {
        return target.len();
    }
    if is_blank(target) {
        return source.len();
    }

    let m = source.len();
    let n = target.len();

    let mut d: Vec<Vec<usize>> = vec![vec![0; n + 1]; m + 1];
    for (i, row) in d.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in d[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            let cost = usize::from(source[i - 1] != target[j - 1]);

            let mut best = (d[i - 1][j] + 1) // deletion
                .min(d[i][j - 1] + 1) // insertion
                .min(d[i - 1][j - 1] + cost); // substitution

            // Transposition, charged at the substitution cost
            if i > 1
                && j > 1
                && source[i - 1] == target[j - 2]
                && source[i - 2] == target[j - 1]
            {
                best = best.min(d[i - 2][j - 2] + cost);
            }

            d[i][j] = best;
        }
    }

    for i in 2..=m {
        for j in 2..=n {
            if source[i - 1] == target[j - 1] && source[i - 2] == target[j - 2] {
                d[i][j] = d[i][j].min(d[i - 2][j - 2] + 1);
            }
        }
    }

    d[m][n]
}

#[inline]
fn is_blank<T: CodeUnit>(units: &[T]) -> bool {
    units.iter().all(|u| u.is_blank())
}

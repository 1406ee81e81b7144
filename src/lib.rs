//! textmetrics - Jaro-Winkler and Damerau-Levenshtein string metrics
//!
//! A Rust library with optional Python bindings and a small CLI.
//!
//! # Features
//! - Jaro-Winkler distance with configurable prefix size and weight threshold
//! - Damerau-Levenshtein edit distance
//! - Parallel batch scoring of one query against many candidates
//! - Optional input normalization (case, whitespace, punctuation, NFKD)
//!
//! Strings are compared as UTF-16 code units. Generic `*_units` functions
//! accept any [`CodeUnit`] slice (`u8`, `u16`, `char`).
//!
//! ```
//! use textmetrics::{damerau_levenshtein_distance, jaro_winkler_distance};
//!
//! assert_eq!(damerau_levenshtein_distance("kitten", "kittne"), 1);
//! assert_eq!(jaro_winkler_distance("Alex", "Alexandros"), jaro_winkler_distance("Alexandros", "Alex"));
//! ```

pub mod algorithms;
pub mod batch;
pub mod error;

#[cfg(feature = "python")]
mod python;

pub use algorithms::normalize::Normalization;
pub use algorithms::{
    damerau_levenshtein_distance, damerau_levenshtein_distance_units,
    damerau_levenshtein_similarity, jaro_winkler_distance, jaro_winkler_distance_units,
    jaro_winkler_distance_with, jaro_winkler_similarity, jaro_winkler_similarity_with,
    try_damerau_levenshtein_distance, try_damerau_levenshtein_similarity,
    try_jaro_winkler_distance, CodeUnit, DamerauLevenshtein, EditDistance, JaroWinkler,
    JaroWinklerConfig, MetricKind, Similarity, DEFAULT_PREFIX_SIZE, DEFAULT_WEIGHT_THRESHOLD,
    MAX_QUADRATIC_LENGTH,
};
pub use batch::{best_matches, distance_matrix, score_batch, MatchResult, MatchScore, Scorer};
pub use error::MetricError;

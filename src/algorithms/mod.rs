//! Core string metric algorithms
//!
//! Each algorithm is implemented as a standalone function for composability,
//! plus a trait-based interface used by batch scoring.
//!
//! Sequences are compared code unit by code unit. For `&str` input the code
//! unit is the UTF-16 code unit; ASCII input takes a byte-wise fast path that
//! produces identical results.

pub mod damerau;
pub mod jaro;
pub mod normalize;

pub use damerau::*;
pub use jaro::*;

use crate::error::MetricError;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// An atomic element of a compared sequence.
pub trait CodeUnit: Copy + Eq + Send + Sync {
    /// Whether this unit counts as whitespace for the blank-input rule.
    fn is_blank(self) -> bool;
}

/// Bytes are treated as ASCII. Only ASCII whitespace (including vertical
/// tab) is blank; bytes 0x80 and above never are.
impl CodeUnit for u8 {
    #[inline]
    fn is_blank(self) -> bool {
        self.is_ascii_whitespace() || self == 0x0B
    }
}

impl CodeUnit for u16 {
    #[inline]
    fn is_blank(self) -> bool {
        // Lone surrogates are never whitespace
        char::from_u32(u32::from(self)).is_some_and(char::is_whitespace)
    }
}

impl CodeUnit for char {
    #[inline]
    fn is_blank(self) -> bool {
        self.is_whitespace()
    }
}

/// UTF-16 code units of a string, inline for typical lengths.
pub(crate) type Utf16Units = SmallVec<[u16; 64]>;

#[inline]
pub(crate) fn utf16_units(s: &str) -> Utf16Units {
    s.encode_utf16().collect()
}

/// Length of a string in the code units the metrics operate on.
#[inline]
#[must_use]
pub fn unit_len(s: &str) -> usize {
    if s.is_ascii() {
        s.len()
    } else {
        s.encode_utf16().count()
    }
}

/// Trait for metrics that produce a normalized score.
/// Similarity is between 0.0 (unrelated) and 1.0 (identical).
pub trait Similarity: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> f64;

    /// Convenience method for distance (1.0 - similarity)
    fn distance(&self, a: &str, b: &str) -> f64 {
        1.0 - self.similarity(a, b)
    }

    /// Name of the algorithm for debugging/logging
    fn name(&self) -> &'static str;
}

/// Trait for edit distance algorithms that return integer distances
pub trait EditDistance: Send + Sync {
    fn distance(&self, a: &str, b: &str) -> usize;

    /// Convert to normalized similarity score (0.0 to 1.0)
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let dist = EditDistance::distance(self, a, b);
        let max_len = unit_len(a).max(unit_len(b));
        if max_len == 0 {
            1.0
        } else {
            (1.0 - dist as f64 / max_len as f64).clamp(0.0, 1.0)
        }
    }

    fn name(&self) -> &'static str;
}

/// Blanket implementation: any EditDistance is also a Similarity
impl<T: EditDistance> Similarity for T {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        EditDistance::similarity(self, a, b)
    }

    fn name(&self) -> &'static str {
        EditDistance::name(self)
    }
}

/// Selects one of the supported metrics by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    #[default]
    JaroWinkler,
    DamerauLevenshtein,
}

impl MetricKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::JaroWinkler => "jaro_winkler",
            Self::DamerauLevenshtein => "damerau_levenshtein",
        }
    }

    /// Build a boxed metric. The Jaro-Winkler parameters are ignored for
    /// Damerau-Levenshtein.
    #[must_use]
    pub fn build(self, config: JaroWinklerConfig) -> Box<dyn Similarity> {
        match self {
            Self::JaroWinkler => Box::new(JaroWinkler::from_config(config)),
            Self::DamerauLevenshtein => Box::new(DamerauLevenshtein::new()),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MetricKind {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "jaro_winkler" | "jw" => Ok(Self::JaroWinkler),
            "damerau_levenshtein" | "damerau" | "dl" => Ok(Self::DamerauLevenshtein),
            _ => Err(MetricError::UnknownMetric(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_kind_parse() {
        assert_eq!("jaro_winkler".parse::<MetricKind>(), Ok(MetricKind::JaroWinkler));
        assert_eq!("JW".parse::<MetricKind>(), Ok(MetricKind::JaroWinkler));
        assert_eq!(
            "damerau-levenshtein".parse::<MetricKind>(),
            Ok(MetricKind::DamerauLevenshtein)
        );
        assert_eq!("dl".parse::<MetricKind>(), Ok(MetricKind::DamerauLevenshtein));
        assert_eq!(
            "soundex".parse::<MetricKind>(),
            Err(MetricError::UnknownMetric("soundex".to_string()))
        );
    }

    #[test]
    fn test_metric_kind_build() {
        let jw = MetricKind::JaroWinkler.build(JaroWinklerConfig::default());
        assert_eq!(jw.name(), "jaro_winkler");
        assert_eq!(jw.distance("jump", "still"), 1.0);

        let dl = MetricKind::DamerauLevenshtein.build(JaroWinklerConfig::default());
        assert_eq!(dl.name(), "damerau_levenshtein");
        assert_eq!(dl.similarity("abcd", "abcd"), 1.0);
    }

    #[test]
    fn test_blank_units() {
        assert!(b' '.is_blank());
        assert!(b'\t'.is_blank());
        assert!(!b'a'.is_blank());
        assert!(0x0Bu8.is_blank());
        assert!(!0xA0u8.is_blank());
        assert!(0x3000u16.is_blank()); // ideographic space
        assert!(!0xD800u16.is_blank());
        assert!('\u{00A0}'.is_blank());
    }

    #[test]
    fn test_unit_len_counts_utf16() {
        assert_eq!(unit_len("abc"), 3);
        assert_eq!(unit_len("caf\u{00e9}"), 4);
        assert_eq!(unit_len("\u{1F600}"), 2);
    }
}

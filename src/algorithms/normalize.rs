//! Input preprocessing
//!
//! Normalization is applied by callers before comparison. The metrics
//! themselves always compare input exactly as given.

use crate::error::MetricError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;

/// Normalization mode for string preprocessing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Convert to lowercase only
    Lowercase,
    /// Apply Unicode NFKD decomposition
    UnicodeNfkd,
    /// Remove ASCII punctuation
    RemovePunctuation,
    /// Remove all whitespace
    RemoveWhitespace,
    /// NFKD, lowercase, then drop punctuation and whitespace
    Strict,
}

impl Normalization {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Lowercase => "lowercase",
            Self::UnicodeNfkd => "unicode_nfkd",
            Self::RemovePunctuation => "remove_punctuation",
            Self::RemoveWhitespace => "remove_whitespace",
            Self::Strict => "strict",
        }
    }

    /// Normalize a single string.
    #[must_use]
    pub fn apply(self, s: &str) -> String {
        match self {
            Self::Lowercase => s.to_lowercase(),
            Self::UnicodeNfkd => s.nfkd().collect(),
            Self::RemovePunctuation => s.chars().filter(|c| !c.is_ascii_punctuation()).collect(),
            Self::RemoveWhitespace => s.chars().filter(|c| !c.is_whitespace()).collect(),
            Self::Strict => s
                .nfkd()
                .flat_map(char::to_lowercase)
                .filter(|c| !c.is_ascii_punctuation() && !c.is_whitespace())
                .collect(),
        }
    }
}

impl fmt::Display for Normalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Normalization {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lowercase" => Ok(Self::Lowercase),
            "unicode_nfkd" | "nfkd" => Ok(Self::UnicodeNfkd),
            "remove_punctuation" => Ok(Self::RemovePunctuation),
            "remove_whitespace" => Ok(Self::RemoveWhitespace),
            "strict" => Ok(Self::Strict),
            _ => Err(MetricError::UnknownNormalization(s.to_string())),
        }
    }
}

/// Apply an optional normalization, borrowing when there is none.
#[must_use]
pub fn normalize(s: &str, mode: Option<Normalization>) -> Cow<'_, str> {
    match mode {
        None => Cow::Borrowed(s),
        Some(mode) => Cow::Owned(mode.apply(s)),
    }
}

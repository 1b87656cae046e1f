use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Scale on which similarity scores are reported.
///
/// Scores are drawn on a normalized 0–1 range and converted on output, so the
/// same draw reads `0.8` on [`SimilarityScale::Unit`] and `8.0` on
/// [`SimilarityScale::Ten`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityScale {
    Unit,
    #[default]
    Ten,
}

impl SimilarityScale {
    pub fn max(&self) -> f64 {
        match self {
            Self::Unit => 1.0,
            Self::Ten => 10.0,
        }
    }

    /// Convert a normalized score in `[0, 1]` to this scale.
    pub fn report(&self, normalized: f64) -> f64 {
        normalized * self.max()
    }
}

impl fmt::Display for SimilarityScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => f.write_str("unit"),
            Self::Ten => f.write_str("ten"),
        }
    }
}

impl FromStr for SimilarityScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unit" | "1" => Ok(Self::Unit),
            "ten" | "10" => Ok(Self::Ten),
            other => Err(format!("unknown similarity scale: {other}")),
        }
    }
}

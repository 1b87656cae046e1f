use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A question asked when deciding whether a tracked product still earns its
/// place in the stack. Each is rated from 1 to 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Criterion {
    Usage,
    Roi,
    Alternatives,
    Relevance,
    Integration,
}

impl Criterion {
    pub fn all() -> &'static [Criterion] {
        &[
            Self::Usage,
            Self::Roi,
            Self::Alternatives,
            Self::Relevance,
            Self::Integration,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Usage => "usage",
            Self::Roi => "roi",
            Self::Alternatives => "alternatives",
            Self::Relevance => "relevance",
            Self::Integration => "integration",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Usage => "Usage Frequency",
            Self::Roi => "Return on Investment",
            Self::Alternatives => "Better Alternatives",
            Self::Relevance => "Current Relevance",
            Self::Integration => "Integration Quality",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Usage => "How often do you actually use this product?",
            Self::Roi => "Is this product providing value for its cost?",
            Self::Alternatives => "Are there better alternatives available now?",
            Self::Relevance => "Is this product still relevant to your business goals?",
            Self::Integration => "How well does it integrate with your other tools?",
        }
    }
}

/// Ratings given so far. Unrated criteria are absent.
pub type Ratings = BTreeMap<Criterion, u8>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum KeepDecision {
    Keep,
    Review,
    Remove,
}

impl KeepDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keep => "keep",
            Self::Review => "review",
            Self::Remove => "remove",
        }
    }
}

/// Outcome of rating a tracked product against every [`Criterion`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct KeepEvaluation {
    /// Mean of the rated criteria, 0 when nothing is rated.
    pub average_score: f64,
    pub rated: usize,
    /// True once every criterion has a rating.
    pub complete: bool,
    pub decision: KeepDecision,
    pub message: String,
}

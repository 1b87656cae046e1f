//! Client-side filtering of the cached recommendations.

use serde::{Deserialize, Serialize};
use stackwise_core::models::recommendation::{AiRecommendation, RecommendationContent, RecommendationType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadFilter {
    #[default]
    All,
    Read,
    Unread,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Search, type, and read-state filters plus a `created_at` sort.
/// The default matches everything, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationFilter {
    /// Case-insensitive substring of the serialized content.
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub kind: Option<RecommendationType>,
    #[serde(default)]
    pub read: ReadFilter,
    #[serde(default)]
    pub order: SortOrder,
}

impl RecommendationFilter {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, rec: &AiRecommendation) -> bool {
        let kind_ok = self.kind.is_none_or(|kind| rec.recommendation_type() == kind);
        let read_ok = match self.read {
            ReadFilter::All => true,
            ReadFilter::Read => rec.is_read,
            ReadFilter::Unread => !rec.is_read,
        };
        kind_ok && read_ok && self.matches_search(&rec.content)
    }

    fn matches_search(&self, content: &RecommendationContent) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let haystack = match content {
            RecommendationContent::ProductPurchase(response) => serde_json::to_string(response),
            RecommendationContent::UserInsights(insights) => serde_json::to_string(insights),
        };
        haystack.is_ok_and(|text| text.to_lowercase().contains(&needle))
    }

    /// Matching recommendations, sorted by `created_at`.
    pub fn apply(&self, recs: &[AiRecommendation]) -> Vec<AiRecommendation> {
        let mut selected: Vec<AiRecommendation> =
            recs.iter().filter(|r| self.matches(r)).cloned().collect();
        match self.order {
            SortOrder::Asc => selected.sort_by_key(|r| r.created_at),
            SortOrder::Desc => selected.sort_by_key(|r| std::cmp::Reverse(r.created_at)),
        }
        selected
    }
}

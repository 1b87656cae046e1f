use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::goal::Goal;
use super::insights::UserInsights;
use super::product::Product;
use crate::error::CoreError;

/// A generated verdict plus supporting analysis, stored in `ai_recommendations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AiRecommendation {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(default)]
    pub product_id: Option<Uuid>,
    #[serde(flatten)]
    pub content: RecommendationContent,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub relevance_score: Option<f64>,
    pub created_at: jiff::Timestamp,
}

impl AiRecommendation {
    pub fn recommendation_type(&self) -> RecommendationType {
        self.content.recommendation_type()
    }
}

/// Discriminator column of `ai_recommendations`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RecommendationType {
    ProductPurchase,
    UserInsights,
}

impl RecommendationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProductPurchase => "product_purchase",
            Self::UserInsights => "user_insights",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ProductPurchase => "Product Purchase",
            Self::UserInsights => "User Insights",
        }
    }
}

impl fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecommendationType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "product_purchase" => Ok(Self::ProductPurchase),
            "user_insights" => Ok(Self::UserInsights),
            other => Err(CoreError::UnknownRecommendationType(other.to_string())),
        }
    }
}

/// The `recommendation_type` / `content` column pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "recommendation_type", content = "content", rename_all = "snake_case")]
#[ts(export)]
pub enum RecommendationContent {
    ProductPurchase(ProductRecommendationResponse),
    UserInsights(UserInsights),
}

impl RecommendationContent {
    pub fn recommendation_type(&self) -> RecommendationType {
        match self {
            Self::ProductPurchase(_) => RecommendationType::ProductPurchase,
            Self::UserInsights(_) => RecommendationType::UserInsights,
        }
    }
}

/// Row inserted into `ai_recommendations`; `id` and `created_at` are assigned
/// by the store.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationInsert {
    pub user_id: Uuid,
    pub product_id: Option<Uuid>,
    #[serde(flatten)]
    pub content: RecommendationContent,
    pub is_read: bool,
    pub relevance_score: Option<f64>,
}

/// Input to a product recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecommendationRequest {
    pub product_name: String,
    #[serde(default)]
    pub product_url: String,
    /// Set when the recommendation is about an already-tracked product.
    #[serde(default)]
    pub product_id: Option<Uuid>,
    pub user_budget: f64,
    #[serde(default)]
    pub user_goals: BTreeSet<Goal>,
    #[serde(default)]
    pub existing_products: Vec<Product>,
}

/// Content of a `product_purchase` recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductRecommendationResponse {
    pub recommendation: String,
    pub worth_buying: bool,
    pub goal_alignment: GoalAlignment,
    pub budget_analysis: BudgetAnalysis,
    pub similarity_to_existing: SimilarityToExisting,
    #[serde(default)]
    pub alternative_suggestions: Vec<AlternativeSuggestion>,
}

/// Partition of the requested goals into aligned and misaligned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GoalAlignment {
    /// `10 * |aligned_goals| / |requested goals|`, or 0 with no goals.
    pub alignment_score: f64,
    pub aligned_goals: BTreeSet<Goal>,
    pub misaligned_goals: BTreeSet<Goal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BudgetAnalysis {
    pub within_budget: bool,
    pub budget_impact: String,
    #[serde(default)]
    pub estimated_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SimilarityToExisting {
    pub has_similar: bool,
    pub similar_products: Vec<SimilarProduct>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SimilarProduct {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    /// Reported on the configured similarity scale (0–1 or 0–10).
    pub similarity_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AlternativeSuggestion {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    pub reason: String,
}

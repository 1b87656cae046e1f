//! stackwise-scoring
//!
//! Recommendation and analysis strategies. Pure computation, no AWS
//! dependency. [`RandomizedScoring`] is the placeholder strategy: verdicts are
//! drawn from an injected random source and assembled from templates, so
//! callers can swap in a model-backed strategy behind the same trait.

pub mod analysis;
pub mod error;
pub mod evaluate;
pub mod insights;
pub mod recommend;
pub mod scale;
pub mod similarity;
pub mod stub;

use stackwise_core::BoxFuture;
use stackwise_core::models::analysis::ProductAnalysis;
use stackwise_core::models::feature::FeatureMap;
use stackwise_core::models::insights::UserInsights;
use stackwise_core::models::product::{Product, ProductDraft};
use stackwise_core::models::recommendation::{ProductRecommendationResponse, RecommendationRequest};

pub use error::ScoringError;
pub use scale::SimilarityScale;
pub use stub::RandomizedScoring;

/// Trait implemented by each scoring strategy.
///
/// Methods return boxed futures for dyn compatibility, so a strategy that calls
/// out to a model can share the seam with the in-process stub.
pub trait ScoringStrategy: Send + Sync {
    /// Identifier used in logs (e.g. "randomized").
    fn name(&self) -> &str;

    /// Decide whether a product is worth buying for this user.
    fn recommend<'a>(
        &'a self,
        request: &'a RecommendationRequest,
    ) -> BoxFuture<'a, Result<ProductRecommendationResponse, ScoringError>>;

    /// Summarize a product that is about to be tracked.
    fn analyze_product<'a>(
        &'a self,
        draft: &'a ProductDraft,
    ) -> BoxFuture<'a, Result<ProductAnalysis, ScoringError>>;

    /// Derive a feature map from a product page and its description.
    fn extract_features<'a>(
        &'a self,
        url: &'a str,
        description: &'a str,
    ) -> BoxFuture<'a, Result<FeatureMap, ScoringError>>;

    /// Derive profile insights from the products a user tracks.
    fn analyze_profile<'a>(
        &'a self,
        products: &'a [Product],
    ) -> BoxFuture<'a, Result<UserInsights, ScoringError>>;
}

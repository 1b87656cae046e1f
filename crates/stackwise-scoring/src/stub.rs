use std::future;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::debug;

use stackwise_core::BoxFuture;
use stackwise_core::models::analysis::ProductAnalysis;
use stackwise_core::models::feature::FeatureMap;
use stackwise_core::models::insights::UserInsights;
use stackwise_core::models::product::{Product, ProductDraft};
use stackwise_core::models::recommendation::{ProductRecommendationResponse, RecommendationRequest};

use crate::error::ScoringError;
use crate::scale::SimilarityScale;
use crate::{ScoringStrategy, analysis, insights, recommend};

/// Placeholder strategy: random verdicts, templated text.
///
/// The random source is injected; seed it (or script it) to make verdicts
/// reproducible.
pub struct RandomizedScoring<R = StdRng> {
    rng: Mutex<R>,
    scale: SimilarityScale,
}

impl<R: RngCore + Send> RandomizedScoring<R> {
    pub fn new(rng: R, scale: SimilarityScale) -> Self {
        Self {
            rng: Mutex::new(rng),
            scale,
        }
    }

    pub fn scale(&self) -> SimilarityScale {
        self.scale
    }

    /// Score synchronously. Exposed for callers that don't run an executor.
    pub fn score(
        &self,
        request: &RecommendationRequest,
    ) -> Result<ProductRecommendationResponse, ScoringError> {
        let mut rng = self.rng.lock().map_err(|_| ScoringError::RandomSource)?;
        let response = recommend::score_product(request, &mut *rng, self.scale);
        debug!(
            product = %request.product_name,
            goals = request.user_goals.len(),
            existing = request.existing_products.len(),
            worth_buying = response.worth_buying,
            alignment_score = response.goal_alignment.alignment_score,
            "scored product"
        );
        Ok(response)
    }
}

impl RandomizedScoring<StdRng> {
    /// Seeded from the operating system.
    pub fn from_entropy(scale: SimilarityScale) -> Self {
        Self::new(StdRng::from_os_rng(), scale)
    }

    /// Reproducible across runs of the same build.
    pub fn seeded(seed: u64, scale: SimilarityScale) -> Self {
        Self::new(StdRng::seed_from_u64(seed), scale)
    }
}

impl<R: RngCore + Send> ScoringStrategy for RandomizedScoring<R> {
    fn name(&self) -> &str {
        "randomized"
    }

    fn recommend<'a>(
        &'a self,
        request: &'a RecommendationRequest,
    ) -> BoxFuture<'a, Result<ProductRecommendationResponse, ScoringError>> {
        Box::pin(future::ready(self.score(request)))
    }

    fn analyze_product<'a>(
        &'a self,
        draft: &'a ProductDraft,
    ) -> BoxFuture<'a, Result<ProductAnalysis, ScoringError>> {
        Box::pin(future::ready(Ok(analysis::analyze_product(draft))))
    }

    fn extract_features<'a>(
        &'a self,
        url: &'a str,
        description: &'a str,
    ) -> BoxFuture<'a, Result<FeatureMap, ScoringError>> {
        Box::pin(future::ready(Ok(analysis::extract_features(
            url,
            description,
        ))))
    }

    fn analyze_profile<'a>(
        &'a self,
        products: &'a [Product],
    ) -> BoxFuture<'a, Result<UserInsights, ScoringError>> {
        Box::pin(future::ready(Ok(insights::analyze_profile(products))))
    }
}

use std::sync::Arc;

use serde_json::{Map, Value, json};
use stackwise_core::models::product::Product;
use stackwise_core::models::recommendation::{
    AiRecommendation, RecommendationContent, RecommendationInsert, RecommendationRequest,
};
use stackwise_core::tables::{Table, columns, from_row, from_rows, to_row};
use stackwise_scoring::ScoringStrategy;
use stackwise_storage::{Query, TableClient};
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::audit::AuditEvent;
use crate::error::StoreError;
use crate::filter::RecommendationFilter;
use crate::notify::Toasts;
use crate::status::OpState;

#[derive(Debug, Clone, Default)]
pub struct RecommendationState {
    /// Newest first.
    pub recommendations: Vec<AiRecommendation>,
    /// Result of the most recent `request_recommendation`.
    pub latest: Option<AiRecommendation>,
    pub op: OpState,
}

/// Purchase verdicts and profile insights, persisted in `ai_recommendations`.
#[derive(Clone)]
pub struct RecommendationStore {
    tables: Arc<dyn TableClient>,
    scoring: Arc<dyn ScoringStrategy>,
    toasts: Toasts,
    state: Arc<Mutex<RecommendationState>>,
}

impl RecommendationStore {
    pub fn new(tables: Arc<dyn TableClient>, scoring: Arc<dyn ScoringStrategy>, toasts: Toasts) -> Self {
        Self {
            tables,
            scoring,
            toasts,
            state: Arc::default(),
        }
    }

    pub async fn snapshot(&self) -> RecommendationState {
        self.state.lock().await.clone()
    }

    pub async fn recommendations(&self) -> Vec<AiRecommendation> {
        self.state.lock().await.recommendations.clone()
    }

    pub async fn latest(&self) -> Option<AiRecommendation> {
        self.state.lock().await.latest.clone()
    }

    pub async fn get(&self, id: Uuid) -> Option<AiRecommendation> {
        let state = self.state.lock().await;
        state.recommendations.iter().find(|r| r.id == id).cloned()
    }

    pub async fn unread_count(&self) -> usize {
        let state = self.state.lock().await;
        state.recommendations.iter().filter(|r| !r.is_read).count()
    }

    pub async fn filtered(&self, filter: &RecommendationFilter) -> Vec<AiRecommendation> {
        filter.apply(&self.state.lock().await.recommendations)
    }

    /// Replace the cache with the user's recommendations, newest first.
    pub async fn fetch_recommendations(&self, user_id: Uuid) -> Result<Vec<AiRecommendation>, StoreError> {
        self.begin().await;

        let result = async {
            let query = Query::owned_by(user_id).order_desc(columns::CREATED_AT);
            let rows = self.tables.select(Table::AiRecommendations, &query).await?;
            Ok::<_, StoreError>(from_rows::<AiRecommendation>(rows)?)
        }
        .await;

        match result {
            Ok(recs) => {
                let mut state = self.state.lock().await;
                state.recommendations = recs.clone();
                state.op.finish();
                info!(%user_id, count = recs.len(), "loaded recommendations");
                Ok(recs)
            }
            Err(e) => Err(self.fail(e, "Failed to load recommendations").await),
        }
    }

    /// Score a prospective purchase and persist the verdict. The alignment
    /// score is stored as the row's relevance.
    pub async fn request_recommendation(
        &self,
        user_id: Uuid,
        request: RecommendationRequest,
    ) -> Result<AiRecommendation, StoreError> {
        self.begin().await;

        let result = async {
            request.validate()?;
            let response = self.scoring.recommend(&request).await?;
            info!(
                strategy = self.scoring.name(),
                product = %request.product_name,
                worth_buying = response.worth_buying,
                "recommendation scored"
            );
            let insert = RecommendationInsert {
                user_id,
                product_id: request.product_id,
                relevance_score: Some(response.goal_alignment.alignment_score),
                content: RecommendationContent::ProductPurchase(response),
                is_read: false,
            };
            self.persist(insert).await
        }
        .await;

        match result {
            Ok(rec) => {
                let mut state = self.state.lock().await;
                state.recommendations.insert(0, rec.clone());
                state.latest = Some(rec.clone());
                state.op.finish();
                drop(state);

                AuditEvent::new("recommendation.create", Table::AiRecommendations, rec.id)
                    .by(user_id)
                    .with_details(json!({ "product_name": request.product_name }))
                    .emit();
                Ok(rec)
            }
            Err(e) => Err(self.fail(e, "Failed to get recommendation").await),
        }
    }

    /// Analyze the user's products and persist the result as a
    /// `user_insights` row.
    pub async fn request_insights(
        &self,
        user_id: Uuid,
        products: &[Product],
    ) -> Result<AiRecommendation, StoreError> {
        self.begin().await;

        let result = async {
            let insights = self.scoring.analyze_profile(products).await?;
            let insert = RecommendationInsert {
                user_id,
                product_id: None,
                content: RecommendationContent::UserInsights(insights),
                is_read: false,
                relevance_score: None,
            };
            self.persist(insert).await
        }
        .await;

        match result {
            Ok(rec) => {
                let mut state = self.state.lock().await;
                state.recommendations.insert(0, rec.clone());
                state.op.finish();
                drop(state);

                AuditEvent::new("insights.create", Table::AiRecommendations, rec.id)
                    .by(user_id)
                    .emit();
                Ok(rec)
            }
            Err(e) => Err(self.fail(e, "Failed to analyze profile").await),
        }
    }

    /// Mark one recommendation as read. Already-read cached rows are returned
    /// without a write.
    pub async fn mark_as_read(&self, id: Uuid) -> Result<AiRecommendation, StoreError> {
        if let Some(rec) = self.get(id).await.filter(|r| r.is_read) {
            return Ok(rec);
        }

        self.begin().await;
        match self.write_read(id).await {
            Ok(rec) => {
                self.state.lock().await.op.finish();
                Ok(rec)
            }
            Err(e) => Err(self.fail(e, "Failed to mark recommendation as read").await),
        }
    }

    /// Mark every unread cached recommendation as read, one at a time.
    /// Returns how many were updated; rows updated before a failure stay
    /// updated.
    pub async fn mark_all_as_read(&self) -> Result<usize, StoreError> {
        let unread: Vec<Uuid> = {
            let state = self.state.lock().await;
            state
                .recommendations
                .iter()
                .filter(|r| !r.is_read)
                .map(|r| r.id)
                .collect()
        };

        self.begin().await;
        for id in &unread {
            if let Err(e) = self.write_read(*id).await {
                return Err(self.fail(e, "Failed to mark recommendations as read").await);
            }
        }

        self.state.lock().await.op.finish();
        if !unread.is_empty() {
            self.toasts.success("All recommendations marked as read");
        }
        Ok(unread.len())
    }

    async fn write_read(&self, id: Uuid) -> Result<AiRecommendation, StoreError> {
        let mut patch = Map::new();
        patch.insert(columns::IS_READ.to_string(), Value::Bool(true));
        let row = self
            .tables
            .update(Table::AiRecommendations, id, Value::Object(patch))
            .await?;
        let rec: AiRecommendation = from_row(row)?;

        let mut state = self.state.lock().await;
        if let Some(cached) = state.recommendations.iter_mut().find(|r| r.id == id) {
            *cached = rec.clone();
        }
        if let Some(latest) = state.latest.as_mut().filter(|r| r.id == id) {
            *latest = rec.clone();
        }
        Ok(rec)
    }

    async fn persist(&self, insert: RecommendationInsert) -> Result<AiRecommendation, StoreError> {
        let row = self.tables.insert(Table::AiRecommendations, to_row(&insert)?).await?;
        Ok(from_row(row)?)
    }

    async fn begin(&self) {
        self.state.lock().await.op.begin();
    }

    async fn fail(&self, err: StoreError, toast: &str) -> StoreError {
        warn!(error = %err, "{toast}");
        self.state.lock().await.op.fail(err.to_string());
        self.toasts.error(toast);
        err
    }
}

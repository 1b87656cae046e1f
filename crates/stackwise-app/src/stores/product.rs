use std::sync::Arc;

use stackwise_core::models::analysis::ProductAnalysis;
use stackwise_core::models::evaluation::{KeepEvaluation, Ratings};
use stackwise_core::models::feature::FeatureMap;
use stackwise_core::models::product::{Product, ProductDraft, ProductPatch};
use stackwise_core::tables::{Table, columns, from_row, from_rows, to_row};
use stackwise_scoring::ScoringStrategy;
use stackwise_scoring::evaluate;
use stackwise_storage::{Query, TableClient};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::audit::AuditEvent;
use crate::error::StoreError;
use crate::notify::Toasts;
use crate::status::OpState;

#[derive(Debug, Clone, Default)]
pub struct ProductState {
    /// Newest purchase first.
    pub products: Vec<Product>,
    pub op: OpState,
}

/// The signed-in user's tracked products.
#[derive(Clone)]
pub struct ProductStore {
    tables: Arc<dyn TableClient>,
    scoring: Arc<dyn ScoringStrategy>,
    toasts: Toasts,
    state: Arc<Mutex<ProductState>>,
}

impl ProductStore {
    pub fn new(tables: Arc<dyn TableClient>, scoring: Arc<dyn ScoringStrategy>, toasts: Toasts) -> Self {
        Self {
            tables,
            scoring,
            toasts,
            state: Arc::default(),
        }
    }

    pub async fn snapshot(&self) -> ProductState {
        self.state.lock().await.clone()
    }

    pub async fn products(&self) -> Vec<Product> {
        self.state.lock().await.products.clone()
    }

    /// Cached product by id.
    pub async fn get(&self, id: Uuid) -> Option<Product> {
        let state = self.state.lock().await;
        state.products.iter().find(|p| p.id == id).cloned()
    }

    /// Replace the cache with the user's products, newest purchase first.
    pub async fn fetch_products(&self, user_id: Uuid) -> Result<Vec<Product>, StoreError> {
        self.begin().await;

        let query = Query::owned_by(user_id).order_desc(columns::PURCHASE_DATE);
        let result = match self.tables.select(Table::Products, &query).await {
            Ok(rows) => from_rows::<Product>(rows).map_err(StoreError::from),
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(products) => {
                let mut state = self.state.lock().await;
                state.products = products.clone();
                state.op.finish();
                info!(%user_id, count = products.len(), "loaded products");
                Ok(products)
            }
            Err(e) => Err(self.fail(e, "Failed to load products").await),
        }
    }

    /// Validate, enrich with features and an analysis, and persist a new
    /// product. The stored product is prepended to the cache.
    pub async fn add_product(&self, user_id: Uuid, draft: ProductDraft) -> Result<Product, StoreError> {
        self.begin().await;

        match self.create(user_id, draft).await {
            Ok(product) => {
                let mut state = self.state.lock().await;
                state.products.insert(0, product.clone());
                state.op.finish();
                drop(state);

                AuditEvent::new("product.create", Table::Products, product.id)
                    .by(user_id)
                    .emit();
                self.toasts.success("Product added successfully!");
                Ok(product)
            }
            Err(e) => Err(self.fail(e, "Failed to add product").await),
        }
    }

    async fn create(&self, user_id: Uuid, mut draft: ProductDraft) -> Result<Product, StoreError> {
        draft.validate()?;

        let features = match draft.features.take() {
            Some(features) => features,
            None if !draft.description.trim().is_empty() => {
                self.scoring
                    .extract_features(&draft.url, &draft.description)
                    .await?
            }
            None => FeatureMap::new(),
        };
        draft.features = Some(features.clone());

        let analysis = self.scoring.analyze_product(&draft).await?;
        let insert = draft.into_insert(user_id, features, analysis);
        let row = self.tables.insert(Table::Products, to_row(&insert)?).await?;
        Ok(from_row(row)?)
    }

    /// Apply a partial update and replace the cached row with the stored one.
    pub async fn update_product(&self, id: Uuid, patch: ProductPatch) -> Result<Product, StoreError> {
        self.begin().await;

        let result = async {
            patch.validate()?;
            let row = self.tables.update(Table::Products, id, to_row(&patch)?).await?;
            Ok::<Product, StoreError>(from_row(row)?)
        }
        .await;

        match result {
            Ok(product) => {
                let mut state = self.state.lock().await;
                if let Some(cached) = state.products.iter_mut().find(|p| p.id == id) {
                    *cached = product.clone();
                }
                state.op.finish();
                drop(state);

                AuditEvent::new("product.update", Table::Products, id)
                    .by(product.user_id)
                    .emit();
                self.toasts.success("Product updated successfully!");
                Ok(product)
            }
            Err(e) => Err(self.fail(e, "Failed to update product").await),
        }
    }

    pub async fn delete_product(&self, id: Uuid) -> Result<(), StoreError> {
        self.begin().await;

        match self.tables.delete(Table::Products, id).await {
            Ok(()) => {
                let mut state = self.state.lock().await;
                state.products.retain(|p| p.id != id);
                state.op.finish();
                drop(state);

                AuditEvent::new("product.delete", Table::Products, id).emit();
                self.toasts.success("Product deleted successfully!");
                Ok(())
            }
            Err(e) => Err(self.fail(e.into(), "Failed to delete product").await),
        }
    }

    /// Analysis of a draft. Failures are recorded and yield
    /// [`ProductAnalysis::failed`].
    pub async fn analyze_product(&self, draft: &ProductDraft) -> ProductAnalysis {
        self.begin().await;
        match self.scoring.analyze_product(draft).await {
            Ok(analysis) => {
                self.state.lock().await.op.finish();
                analysis
            }
            Err(e) => {
                self.fail(e.into(), "Failed to analyze product").await;
                ProductAnalysis::failed()
            }
        }
    }

    /// Feature map for a product page. Failures are recorded and yield an
    /// empty map.
    pub async fn extract_features(&self, url: &str, description: &str) -> FeatureMap {
        self.begin().await;
        match self.scoring.extract_features(url, description).await {
            Ok(features) => {
                self.state.lock().await.op.finish();
                features
            }
            Err(e) => {
                self.fail(e.into(), "Failed to extract features").await;
                FeatureMap::new()
            }
        }
    }

    /// Keep-or-remove verdict for a cached product. `Ok(None)` when the
    /// product is not cached.
    pub async fn evaluate_product(
        &self,
        id: Uuid,
        ratings: &Ratings,
    ) -> Result<Option<KeepEvaluation>, StoreError> {
        let Some(product) = self.get(id).await else {
            return Ok(None);
        };
        match evaluate::evaluate_product(&product.name, ratings) {
            Ok(evaluation) => {
                debug!(
                    product_id = %id,
                    rated = evaluation.rated,
                    decision = evaluation.decision.as_str(),
                    "evaluated product"
                );
                Ok(Some(evaluation))
            }
            Err(e) => Err(self.fail(e.into(), "Failed to evaluate product").await),
        }
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

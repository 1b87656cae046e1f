use std::sync::Arc;

use stackwise_auth::{AuthProvider, CognitoAuthProvider, MemoryAuthProvider};
use stackwise_scoring::{RandomizedScoring, ScoringStrategy};
use stackwise_storage::{MemoryTableClient, S3TableClient, TableClient};
use tracing::info;
use uuid::Uuid;

use crate::config::{BackendConfig, ScoringSettings, StackwiseConfig};
use crate::dashboard::{self, DashboardSummary};
use crate::error::StoreError;
use crate::notify::Toasts;
use crate::stores::{AuthStore, ProductStore, RecommendationStore};

/// Owns the stores and the services they share. Built once at start-up.
#[derive(Clone)]
pub struct AppContext {
    pub auth: AuthStore,
    pub products: ProductStore,
    pub recommendations: RecommendationStore,
    tables: Arc<dyn TableClient>,
    toasts: Toasts,
}

impl AppContext {
    pub fn new(
        tables: Arc<dyn TableClient>,
        provider: Arc<dyn AuthProvider>,
        scoring: Arc<dyn ScoringStrategy>,
    ) -> Self {
        let toasts = Toasts::new();
        Self {
            auth: AuthStore::new(provider, tables.clone(), scoring.clone(), toasts.clone()),
            products: ProductStore::new(tables.clone(), scoring.clone(), toasts.clone()),
            recommendations: RecommendationStore::new(tables.clone(), scoring, toasts.clone()),
            tables,
            toasts,
        }
    }

    /// Wire up the backends named in `config`.
    pub async fn from_config(config: &StackwiseConfig) -> Self {
        let scoring = scoring_from(&config.scoring);

        match &config.backend {
            BackendConfig::Memory => {
                info!("using in-memory backend");
                Self::new(
                    Arc::new(MemoryTableClient::new()),
                    Arc::new(MemoryAuthProvider::new()),
                    scoring,
                )
            }
            BackendConfig::Aws {
                region,
                bucket,
                cognito_client_id,
            } => {
                info!(bucket = %bucket, region = ?region, "using aws backend");
                let s3 = stackwise_storage::client::build_client(region.as_deref()).await;
                let cognito = stackwise_auth::client::build_client(region.as_deref()).await;
                Self::new(
                    Arc::new(S3TableClient::new(s3, bucket.clone())),
                    Arc::new(CognitoAuthProvider::new(cognito, cognito_client_id.clone())),
                    scoring,
                )
            }
        }
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub async fn dashboard(&self, user_id: Uuid) -> Result<DashboardSummary, StoreError> {
        dashboard::load(self.tables.as_ref(), user_id).await
    }
}

fn scoring_from(settings: &ScoringSettings) -> Arc<dyn ScoringStrategy> {
    let scoring = match settings.seed {
        Some(seed) => RandomizedScoring::seeded(seed, settings.similarity_scale),
        None => RandomizedScoring::from_entropy(settings.similarity_scale),
    };
    info!(scale = %settings.similarity_scale, seeded = settings.seed.is_some(), "scoring configured");
    Arc::new(scoring)
}

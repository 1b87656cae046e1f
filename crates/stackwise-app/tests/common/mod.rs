#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use jiff::civil::{Date, date};
use serde_json::Value;
use stackwise_app::AppContext;
use stackwise_app::notify::Toast;
use stackwise_auth::MemoryAuthProvider;
use stackwise_core::BoxFuture;
use stackwise_core::models::analysis::ProductAnalysis;
use stackwise_core::models::category::Category;
use stackwise_core::models::feature::FeatureMap;
use stackwise_core::models::insights::UserInsights;
use stackwise_core::models::product::{Product, ProductDraft};
use stackwise_core::models::recommendation::{ProductRecommendationResponse, RecommendationRequest};
use stackwise_core::tables::Table;
use stackwise_scoring::{RandomizedScoring, ScoringError, ScoringStrategy, SimilarityScale};
use stackwise_storage::{MemoryTableClient, Query, StorageError, TableClient};
use tokio::sync::broadcast;
use uuid::Uuid;

/// In-memory tables that can be switched offline.
#[derive(Clone, Default)]
pub struct FlakyTables {
    pub inner: MemoryTableClient,
    offline: Arc<AtomicBool>,
}

impl FlakyTables {
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(StorageError::PutObject("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

impl TableClient for FlakyTables {
    fn select<'a>(
        &'a self,
        table: Table,
        query: &'a Query,
    ) -> BoxFuture<'a, Result<Vec<Value>, StorageError>> {
        Box::pin(async move {
            self.check()?;
            self.inner.select(table, query).await
        })
    }

    fn insert<'a>(&'a self, table: Table, row: Value) -> BoxFuture<'a, Result<Value, StorageError>> {
        Box::pin(async move {
            self.check()?;
            self.inner.insert(table, row).await
        })
    }

    fn update<'a>(
        &'a self,
        table: Table,
        id: Uuid,
        patch: Value,
    ) -> BoxFuture<'a, Result<Value, StorageError>> {
        Box::pin(async move {
            self.check()?;
            self.inner.update(table, id, patch).await
        })
    }

    fn delete<'a>(&'a self, table: Table, id: Uuid) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            self.check()?;
            self.inner.delete(table, id).await
        })
    }
}

/// Strategy whose every call fails.
pub struct BrokenScoring;

fn broken<T>() -> Result<T, ScoringError> {
    Err(ScoringError::Strategy {
        strategy: "broken".to_string(),
        message: "model unavailable".to_string(),
    })
}

impl ScoringStrategy for BrokenScoring {
    fn name(&self) -> &str {
        "broken"
    }

    fn recommend<'a>(
        &'a self,
        _request: &'a RecommendationRequest,
    ) -> BoxFuture<'a, Result<ProductRecommendationResponse, ScoringError>> {
        Box::pin(async { broken() })
    }

    fn analyze_product<'a>(
        &'a self,
        _draft: &'a ProductDraft,
    ) -> BoxFuture<'a, Result<ProductAnalysis, ScoringError>> {
        Box::pin(async { broken() })
    }

    fn extract_features<'a>(
        &'a self,
        _url: &'a str,
        _description: &'a str,
    ) -> BoxFuture<'a, Result<FeatureMap, ScoringError>> {
        Box::pin(async { broken() })
    }

    fn analyze_profile<'a>(
        &'a self,
        _products: &'a [Product],
    ) -> BoxFuture<'a, Result<UserInsights, ScoringError>> {
        Box::pin(async { broken() })
    }
}

pub struct Harness {
    pub ctx: AppContext,
    pub tables: FlakyTables,
    pub toasts: broadcast::Receiver<Toast>,
}

pub fn harness() -> Harness {
    harness_with(Arc::new(RandomizedScoring::seeded(7, SimilarityScale::Ten)))
}

pub fn harness_with(scoring: Arc<dyn ScoringStrategy>) -> Harness {
    let tables = FlakyTables::default();
    let ctx = AppContext::new(
        Arc::new(tables.clone()),
        Arc::new(MemoryAuthProvider::new()),
        scoring,
    );
    let toasts = ctx.toasts().subscribe();
    Harness { ctx, tables, toasts }
}

/// Every toast received so far.
pub fn drain(rx: &mut broadcast::Receiver<Toast>) -> Vec<Toast> {
    let mut toasts = Vec::new();
    while let Ok(toast) = rx.try_recv() {
        toasts.push(toast);
    }
    toasts
}

pub fn draft(name: &str, purchased: Date) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        description: format!("{name} keeps our funnels and email campaigns running"),
        url: format!("https://{}.com", name.to_lowercase().replace(' ', "")),
        category: Category::Software,
        price: 49.0,
        purchase_date: purchased,
        features: None,
    }
}

pub fn spring() -> Date {
    date(2024, 4, 1)
}

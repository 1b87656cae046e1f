use serde::Serialize;
use stackwise_core::models::product::Product;
use stackwise_core::models::recommendation::AiRecommendation;
use stackwise_core::tables::{Table, columns, from_rows};
use stackwise_storage::{Query, TableClient};
use uuid::Uuid;

use crate::error::StoreError;

pub const RECENT_PRODUCTS: usize = 5;
pub const RECENT_RECOMMENDATIONS: usize = 3;

/// Headline numbers for the dashboard, read straight from the tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub product_count: usize,
    /// Sum of all product prices.
    pub monthly_spend: f64,
    /// Latest purchases first.
    pub recent_products: Vec<Product>,
    pub recent_recommendations: Vec<AiRecommendation>,
    pub unread_recommendations: usize,
}

pub async fn load(tables: &dyn TableClient, user_id: Uuid) -> Result<DashboardSummary, StoreError> {
    let products_query = Query::owned_by(user_id).order_desc(columns::PURCHASE_DATE);
    let products: Vec<Product> = from_rows(tables.select(Table::Products, &products_query).await?)?;

    let recent_query = Query::owned_by(user_id)
        .order_desc(columns::CREATED_AT)
        .limit(RECENT_RECOMMENDATIONS);
    let recent_recommendations: Vec<AiRecommendation> =
        from_rows(tables.select(Table::AiRecommendations, &recent_query).await?)?;

    // Rows without `is_read` deserialize as unread, so count after decoding.
    let owned: Vec<AiRecommendation> =
        from_rows(tables.select(Table::AiRecommendations, &Query::owned_by(user_id)).await?)?;
    let unread_recommendations = owned.iter().filter(|r| !r.is_read).count();

    Ok(DashboardSummary {
        product_count: products.len(),
        monthly_spend: products.iter().map(|p| p.price).sum(),
        recent_products: products.into_iter().take(RECENT_PRODUCTS).collect(),
        recent_recommendations,
        unread_recommendations,
    })
}

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::analysis::ProductAnalysis;
use super::category::Category;
use super::feature::FeatureMap;

/// A tracked marketing-tool purchase, as stored in the `products` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[ts(type = "string")]
    pub category: Category,
    /// Monthly amount, never negative.
    pub price: f64,
    #[ts(type = "string")]
    pub purchase_date: Date,
    #[serde(default)]
    pub features: FeatureMap,
    #[serde(default)]
    pub ai_analysis: Option<ProductAnalysis>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    pub created_at: jiff::Timestamp,
}

impl Product {
    /// The user-editable part of this product.
    pub fn draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            url: self.url.clone(),
            category: self.category.clone(),
            price: self.price,
            purchase_date: self.purchase_date,
            features: Some(self.features.clone()),
        }
    }
}

/// Product fields as submitted by the user, before the server assigns
/// identity and the analysis is attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub url: String,
    #[ts(type = "string")]
    pub category: Category,
    pub price: f64,
    #[ts(type = "string")]
    pub purchase_date: Date,
    #[serde(default)]
    pub features: Option<FeatureMap>,
}

impl ProductDraft {
    /// Build the row inserted into the `products` table.
    pub fn into_insert(
        self,
        user_id: Uuid,
        features: FeatureMap,
        analysis: ProductAnalysis,
    ) -> ProductInsert {
        let tags = analysis.tags.clone();
        ProductInsert {
            user_id,
            name: self.name,
            description: self.description,
            url: self.url,
            category: self.category,
            price: self.price,
            purchase_date: self.purchase_date,
            features,
            ai_analysis: analysis,
            tags,
        }
    }
}

/// Insert shape for the `products` table; `id` and `created_at` are assigned
/// by the store.
#[derive(Debug, Clone, Serialize)]
pub struct ProductInsert {
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub url: String,
    pub category: Category,
    pub price: f64,
    pub purchase_date: Date,
    pub features: FeatureMap,
    pub ai_analysis: ProductAnalysis,
    pub tags: Vec<String>,
}

/// Partial update of a product. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    pub purchase_date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

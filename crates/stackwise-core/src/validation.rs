//! Input validation for user-submitted drafts and patches.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::models::category::Category;
use crate::models::product::{ProductDraft, ProductPatch};
use crate::models::profile::ProfilePatch;
use crate::models::recommendation::RecommendationRequest;

/// Minimum length of a product description.
pub const MIN_DESCRIPTION_LEN: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ProductDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        validate_url(&self.url)?;
        validate_price(self.price)?;
        validate_category(&self.category)?;
        validate_description(&self.description)
    }
}

impl ProductPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(url) = &self.url {
            validate_url(url)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        if let Some(category) = &self.category {
            validate_category(category)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }
}

impl ProfilePatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(budget) = self.budget {
            validate_amount("budget", budget)?;
        }
        Ok(())
    }
}

impl RecommendationRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.product_name.trim().is_empty() {
            return Err(ValidationError::new("product_name", "Product name is required"));
        }
        validate_amount("user_budget", self.user_budget)
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("name", "Product name is required"));
    }
    Ok(())
}

fn validate_url(url: &str) -> Result<(), ValidationError> {
    if url.trim().is_empty() {
        return Err(ValidationError::new("url", "Product URL is required"));
    }
    if !is_valid_url(url.trim()) {
        return Err(ValidationError::new("url", "Please enter a valid URL"));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), ValidationError> {
    validate_amount("price", price)
}

fn validate_amount(field: &str, amount: f64) -> Result<(), ValidationError> {
    if !amount.is_finite() {
        return Err(ValidationError::new(field, "must be a number"));
    }
    if amount < 0.0 {
        return Err(ValidationError::new(
            field,
            "must be greater than or equal to 0",
        ));
    }
    Ok(())
}

fn validate_category(category: &Category) -> Result<(), ValidationError> {
    if !category.is_known() {
        return Err(ValidationError::new(
            "category",
            format!("unknown category '{category}'"),
        ));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.trim().is_empty() {
        return Err(ValidationError::new("description", "Description is required"));
    }
    if description.chars().count() < MIN_DESCRIPTION_LEN {
        return Err(ValidationError::new(
            "description",
            format!("Description should be at least {MIN_DESCRIPTION_LEN} characters"),
        ));
    }
    Ok(())
}

/// Accepts `[http(s)://]host.tld[/path]`, where the host is alphanumeric with
/// dots and dashes and the TLD is 2–6 letters.
pub fn is_valid_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .unwrap_or(&lower);

    let (host, path) = match rest.find('/') {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };

    let Some((name, tld)) = host.rsplit_once('.') else {
        return false;
    };
    let host_ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    let tld_ok = (2..=6).contains(&tld.len()) && tld.chars().all(|c| c.is_ascii_lowercase());
    let path_ok = path
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '/' | '_' | ' ' | '.' | '-'));

    host_ok && tld_ok && path_ok
}

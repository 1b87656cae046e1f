//! Table names, row key layout, and row (de)serialization.
//!
//! Pure string and JSON functions with no AWS SDK dependency. These define the
//! canonical layout of rows in the backing store.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    Products,
    UserProfiles,
    AiRecommendations,
}

impl Table {
    pub fn all() -> &'static [Table] {
        &[Self::Products, Self::UserProfiles, Self::AiRecommendations]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::UserProfiles => "user_profiles",
            Self::AiRecommendations => "ai_recommendations",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Table {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|t| t.name() == s)
            .copied()
            .ok_or_else(|| CoreError::UnknownTable(s.to_string()))
    }
}

pub fn table_prefix(table: Table) -> String {
    format!("{}/", table.name())
}

pub fn row_key(table: Table, id: Uuid) -> String {
    format!("{}/{id}.json", table.name())
}

/// Column names shared by every table.
pub mod columns {
    pub const ID: &str = "id";
    pub const USER_ID: &str = "user_id";
    pub const CREATED_AT: &str = "created_at";
    pub const UPDATED_AT: &str = "updated_at";
    pub const PURCHASE_DATE: &str = "purchase_date";
    pub const IS_READ: &str = "is_read";
}

/// Encode a typed value as a row.
pub fn to_row<T: Serialize>(value: &T) -> Result<serde_json::Value, CoreError> {
    Ok(serde_json::to_value(value)?)
}

/// Decode a row into a typed value.
pub fn from_row<T: DeserializeOwned>(row: serde_json::Value) -> Result<T, CoreError> {
    Ok(serde_json::from_value(row)?)
}

/// Decode a list of rows, failing on the first malformed one.
pub fn from_rows<T: DeserializeOwned>(rows: Vec<serde_json::Value>) -> Result<Vec<T>, CoreError> {
    rows.into_iter().map(from_row).collect()
}

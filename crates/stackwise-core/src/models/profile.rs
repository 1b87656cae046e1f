use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::feature::FeatureMap;
use super::goal::Goal;
use super::insights::UserInsights;

/// A user's profile row in `user_profiles`. `id` is the auth user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Monthly budget, never negative.
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default, deserialize_with = "nullable_goals")]
    pub goals: BTreeSet<Goal>,
    #[serde(default)]
    pub preferences: Option<FeatureMap>,
    #[serde(default)]
    pub ai_insights: Option<UserInsights>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl UserProfile {
    /// Display name, falling back to the email address.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

/// `goals` is a nullable array column.
fn nullable_goals<'de, D>(deserializer: D) -> Result<BTreeSet<Goal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<BTreeSet<Goal>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Row inserted into `user_profiles` at sign-up.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileInsert {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

/// Partial update of a profile. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<BTreeSet<Goal>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<FeatureMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<UserInsights>,
}

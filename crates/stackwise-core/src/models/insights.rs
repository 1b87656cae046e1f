use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// Profile-level insights derived from a user's tracked products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserInsights {
    pub primary_goal: String,
    pub spending_patterns: Vec<String>,
    pub interest_areas: Vec<String>,
    pub skill_level: SkillLevel,
    pub recommendations: Vec<String>,
}

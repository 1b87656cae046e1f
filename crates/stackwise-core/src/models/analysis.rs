use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Analysis attached to a product when it is added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductAnalysis {
    pub summary: String,
    pub key_features: Vec<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    /// 0–10.
    pub recommendation_score: f64,
    pub tags: Vec<String>,
}

impl ProductAnalysis {
    /// Placeholder returned to callers when analysis could not run.
    pub fn failed() -> Self {
        Self {
            summary: "Analysis failed".to_string(),
            key_features: Vec::new(),
            pros: Vec::new(),
            cons: vec!["Analysis failed due to an error".to_string()],
            recommendation_score: 0.0,
            tags: Vec::new(),
        }
    }
}

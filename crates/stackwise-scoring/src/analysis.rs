use stackwise_core::models::analysis::ProductAnalysis;
use stackwise_core::models::feature::{FeatureMap, FeatureValue};
use stackwise_core::models::product::ProductDraft;

use crate::insights::strings;

/// Canned analysis; only the summary and first tag mention the product.
pub fn analyze_product(draft: &ProductDraft) -> ProductAnalysis {
    let category = draft.category.as_str().trim();
    let (summary_category, tag) = if category.is_empty() {
        ("marketing".to_string(), "Marketing".to_string())
    } else {
        (category.to_lowercase(), category.to_string())
    };

    ProductAnalysis {
        summary: format!(
            "{} is a {summary_category} tool that helps with digital marketing efforts.",
            draft.name
        ),
        key_features: strings(&[
            "Easy to use interface",
            "Integration with popular platforms",
            "Detailed analytics",
            "Automation capabilities",
        ]),
        pros: strings(&[
            "User-friendly",
            "Good value for money",
            "Regular updates",
            "Responsive support",
        ]),
        cons: strings(&[
            "Limited advanced features",
            "Could have better documentation",
            "Some learning curve for beginners",
        ]),
        recommendation_score: 7.5,
        tags: vec![tag, "Digital".into(), "Tool".into(), "Software".into()],
    }
}

/// Canned feature map; the page and description are not inspected.
pub fn extract_features(_url: &str, _description: &str) -> FeatureMap {
    let mut features = FeatureMap::new();
    features.insert(
        "core_features".to_string(),
        FeatureValue::from(vec![
            "Email automation",
            "Landing page builder",
            "A/B testing",
            "Analytics dashboard",
            "Integration with CRM systems",
        ]),
    );
    features.insert("pricing_tier".to_string(), "mid-range".into());
    features.insert(
        "target_audience".to_string(),
        "small to medium businesses".into(),
    );
    features
}

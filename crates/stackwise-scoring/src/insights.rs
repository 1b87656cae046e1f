use std::collections::HashMap;

use stackwise_core::models::insights::{SkillLevel, UserInsights};
use stackwise_core::models::product::Product;

/// Interest area reported when the user tracks no categorized products.
pub const DEFAULT_INTEREST: &str = "Marketing";

/// Most frequent category among `products`.
///
/// Ties go to the category whose last occurrence comes latest in input
/// order. Blank categories are ignored.
pub fn modal_category(products: &[Product]) -> Option<&str> {
    let mut tally: HashMap<&str, (usize, usize)> = HashMap::new();

    for (index, category) in products.iter().map(|p| p.category.as_str()).enumerate() {
        if category.trim().is_empty() {
            continue;
        }
        let (count, last) = tally.entry(category).or_default();
        *count += 1;
        *last = index;
    }

    tally
        .into_iter()
        .max_by_key(|(_, ranking)| *ranking)
        .map(|(category, _)| category)
}

/// Profile insights. Only the leading interest area depends on the input;
/// everything else is fixed text.
pub fn analyze_profile(products: &[Product]) -> UserInsights {
    let primary_interest = modal_category(products).unwrap_or(DEFAULT_INTEREST);

    UserInsights {
        primary_goal: "Grow existing business".to_string(),
        spending_patterns: strings(&[
            "Consistent investment in marketing tools",
            "Focus on automation and analytics",
            "Preference for all-in-one solutions",
        ]),
        interest_areas: strings(&[
            primary_interest,
            "Automation",
            "Analytics",
            "Content Marketing",
        ]),
        skill_level: SkillLevel::Intermediate,
        recommendations: strings(&[
            "Consider investing in advanced analytics tools",
            "Look for tools that integrate with your existing stack",
            "Focus on ROI-driven marketing solutions",
            "Explore AI-powered marketing automation",
        ]),
    }
}

pub(crate) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

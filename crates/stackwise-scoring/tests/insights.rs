mod common;

use jiff::civil::date;
use stackwise_core::models::category::Category;
use stackwise_core::models::insights::SkillLevel;
use stackwise_core::models::product::ProductDraft;
use stackwise_scoring::analysis::{analyze_product, extract_features};
use stackwise_scoring::insights::{DEFAULT_INTEREST, analyze_profile, modal_category};
use stackwise_scoring::{RandomizedScoring, ScoringStrategy, SimilarityScale};

use common::product;

#[test]
fn modal_category_leads_interest_areas() {
    let products = vec![
        product("Ahrefs", "SEO"),
        product("Mailchimp", "Email"),
        product("SEMrush", "SEO"),
    ];
    let insights = analyze_profile(&products);

    assert_eq!(insights.interest_areas[0], "SEO");
    assert_eq!(insights.interest_areas.len(), 4);
    assert_eq!(insights.skill_level, SkillLevel::Intermediate);
}

#[test]
fn tie_goes_to_the_modal_category_seen_last() {
    let products = vec![
        product("Ahrefs", "SEO"),
        product("Mailchimp", "Email"),
    ];
    assert_eq!(modal_category(&products), Some("Email"));

    let products = vec![
        product("Mailchimp", "Email"),
        product("Ahrefs", "SEO"),
        product("ConvertKit", "Email"),
        product("SEMrush", "SEO"),
    ];
    assert_eq!(modal_category(&products), Some("SEO"));

    // Ranked by last occurrence, not first.
    let products = vec![
        product("Mailchimp", "Email"),
        product("Ahrefs", "SEO"),
        product("SEMrush", "SEO"),
        product("ConvertKit", "Email"),
    ];
    assert_eq!(modal_category(&products), Some("Email"));

    // A strictly more frequent category still wins over a later one.
    let products = vec![
        product("Ahrefs", "SEO"),
        product("SEMrush", "SEO"),
        product("Mailchimp", "Email"),
    ];
    assert_eq!(modal_category(&products), Some("SEO"));
}

#[test]
fn no_products_falls_back_to_marketing() {
    assert_eq!(modal_category(&[]), None);
    let insights = analyze_profile(&[]);
    assert_eq!(insights.interest_areas[0], DEFAULT_INTEREST);
    assert_eq!(insights.primary_goal, "Grow existing business");
}

fn draft(name: &str, category: Category) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        description: "Course platform with email marketing built in".to_string(),
        url: "https://kajabi.com".to_string(),
        category,
        price: 149.0,
        purchase_date: date(2024, 5, 10),
        features: None,
    }
}

#[test]
fn product_analysis_mentions_name_and_category() {
    let analysis = analyze_product(&draft("Kajabi", Category::Software));

    assert_eq!(
        analysis.summary,
        "Kajabi is a software tool that helps with digital marketing efforts."
    );
    assert_eq!(analysis.recommendation_score, 7.5);
    assert_eq!(analysis.tags, vec!["software", "Digital", "Tool", "Software"]);
}

#[test]
fn feature_extraction_ignores_its_input() {
    let a = extract_features("https://a.example", "first");
    let b = extract_features("", "");
    assert_eq!(a, b);
    assert_eq!(
        a.get("pricing_tier").and_then(|v| v.as_str()),
        Some("mid-range")
    );
    assert_eq!(a["core_features"].as_list().map(|l| l.len()), Some(5));
}

#[tokio::test]
async fn strategy_delegates_to_placeholders() {
    let scoring = RandomizedScoring::seeded(1, SimilarityScale::Unit);
    assert_eq!(scoring.name(), "randomized");
    assert_eq!(scoring.scale(), SimilarityScale::Unit);

    let products = vec![product("Ahrefs", "SEO")];
    let insights = scoring.analyze_profile(&products).await.unwrap();
    assert_eq!(insights.interest_areas[0], "SEO");

    let features = scoring.extract_features("https://kajabi.com", "").await.unwrap();
    assert!(features.contains_key("target_audience"));
}

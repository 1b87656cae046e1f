use serde_json::json;

use stackwise_core::models::category::Category;
use stackwise_core::models::feature::FeatureValue;
use stackwise_core::models::goal::Goal;
use stackwise_core::models::insights::SkillLevel;
use stackwise_core::models::product::Product;
use stackwise_core::models::profile::UserProfile;
use stackwise_core::models::recommendation::{
    AiRecommendation, RecommendationContent, RecommendationType,
};
use stackwise_core::tables::{self, Table};

fn product_row() -> serde_json::Value {
    json!({
        "id": "7f9c2ad4-54a8-4a5b-9a4e-0a3f7d1c2b11",
        "user_id": "1b2c3d4e-0000-4000-8000-000000000001",
        "name": "ClickFunnels",
        "description": "Sales funnel builder with marketing automation",
        "url": "https://clickfunnels.com",
        "price": 97,
        "category": "Funnel Builder",
        "purchase_date": "2023-05-15",
        "features": { "pages": 20, "visitors": 20000, "automations": true, "tiers": ["basic", "pro"] },
        "ai_analysis": null,
        "tags": null,
        "created_at": "2023-05-15T10:00:00Z"
    })
}

#[test]
fn product_row_with_free_text_category_loads() {
    let product: Product = tables::from_row(product_row()).unwrap();

    assert_eq!(product.category, Category::Custom("Funnel Builder".to_string()));
    assert!(!product.category.is_known());
    assert_eq!(product.price, 97.0);
    assert_eq!(product.features["pages"], FeatureValue::Number(20.0));
    assert_eq!(product.features["automations"], FeatureValue::Bool(true));
    assert_eq!(
        product.features["tiers"],
        FeatureValue::List(vec!["basic".into(), "pro".into()])
    );
    assert!(product.tags.is_none());
}

#[test]
fn custom_category_is_written_back_verbatim() {
    let product: Product = tables::from_row(product_row()).unwrap();
    let row = tables::to_row(&product).unwrap();
    assert_eq!(row["category"], "Funnel Builder");
    assert_eq!(row["features"]["visitors"], 20000.0);
}

#[test]
fn known_categories_map_to_variants() {
    assert_eq!(Category::from("physical_product"), Category::PhysicalProduct);
    assert_eq!(Category::from("plugin").label(), "Plugin/Extension");
    // Stored values are case-sensitive.
    assert_eq!(Category::from("Software"), Category::Custom("Software".to_string()));
}

#[test]
fn profile_with_null_goals_loads_as_empty_set() {
    let profile: UserProfile = tables::from_row(json!({
        "id": "1b2c3d4e-0000-4000-8000-000000000001",
        "email": "ana@example.com",
        "full_name": null,
        "avatar_url": null,
        "budget": 150.0,
        "goals": null,
        "preferences": null,
        "ai_insights": null,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    }))
    .unwrap();

    assert!(profile.goals.is_empty());
    assert_eq!(profile.display_name(), "ana@example.com");
}

#[test]
fn profile_goals_deduplicate() {
    let profile: UserProfile = tables::from_row(json!({
        "id": "1b2c3d4e-0000-4000-8000-000000000001",
        "email": "ana@example.com",
        "goals": ["side_hustle", "e_commerce", "side_hustle"],
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    }))
    .unwrap();

    assert_eq!(profile.goals.len(), 2);
    assert!(profile.goals.contains(&Goal::ECommerce));
}

#[test]
fn recommendation_row_uses_type_and_content_columns() {
    let row = json!({
        "id": "5e0c1a7e-1111-4000-8000-000000000002",
        "user_id": "1b2c3d4e-0000-4000-8000-000000000001",
        "product_id": null,
        "recommendation_type": "user_insights",
        "content": {
            "primary_goal": "Grow existing business",
            "spending_patterns": [],
            "interest_areas": ["SEO"],
            "skill_level": "intermediate",
            "recommendations": []
        },
        "is_read": false,
        "relevance_score": null,
        "created_at": "2024-02-01T12:00:00Z"
    });

    let rec: AiRecommendation = tables::from_row(row).unwrap();
    assert_eq!(rec.recommendation_type(), RecommendationType::UserInsights);
    match &rec.content {
        RecommendationContent::UserInsights(insights) => {
            assert_eq!(insights.skill_level, SkillLevel::Intermediate);
            assert_eq!(insights.interest_areas, vec!["SEO".to_string()]);
        }
        other => panic!("unexpected content: {other:?}"),
    }

    let back = tables::to_row(&rec).unwrap();
    assert_eq!(back["recommendation_type"], "user_insights");
    assert_eq!(back["content"]["primary_goal"], "Grow existing business");
}

#[test]
fn recommendation_type_parses_stored_values() {
    assert_eq!(
        "product_purchase".parse::<RecommendationType>().unwrap(),
        RecommendationType::ProductPurchase
    );
    assert!("keep".parse::<RecommendationType>().is_err());
}

#[test]
fn table_keys() {
    let id = uuid::Uuid::nil();
    assert_eq!(
        tables::row_key(Table::AiRecommendations, id),
        "ai_recommendations/00000000-0000-0000-0000-000000000000.json"
    );
    assert_eq!(tables::table_prefix(Table::UserProfiles), "user_profiles/");
    assert_eq!("products".parse::<Table>().unwrap(), Table::Products);
    assert!("orders".parse::<Table>().is_err());
}

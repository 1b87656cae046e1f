use jiff::civil::date;

use stackwise_core::models::category::Category;
use stackwise_core::models::product::{ProductDraft, ProductPatch};
use stackwise_core::models::profile::ProfilePatch;
use stackwise_core::validation::is_valid_url;

fn draft() -> ProductDraft {
    ProductDraft {
        name: "ConvertKit".to_string(),
        description: "Email marketing platform for creators".to_string(),
        url: "https://convertkit.com".to_string(),
        category: Category::Software,
        price: 29.0,
        purchase_date: date(2023, 6, 2),
        features: None,
    }
}

#[test]
fn valid_draft_passes() {
    assert!(draft().validate().is_ok());
}

#[test]
fn negative_price_is_rejected() {
    let err = ProductDraft {
        price: -1.0,
        ..draft()
    }
    .validate()
    .unwrap_err();
    assert_eq!(err.field, "price");
}

#[test]
fn nan_price_is_rejected() {
    let err = ProductDraft {
        price: f64::NAN,
        ..draft()
    }
    .validate()
    .unwrap_err();
    assert_eq!(err.field, "price");
}

#[test]
fn short_description_is_rejected() {
    let err = ProductDraft {
        description: "Email tool".to_string(),
        ..draft()
    }
    .validate()
    .unwrap_err();
    assert_eq!(err.field, "description");
    assert!(err.message.contains("20"));
}

#[test]
fn free_text_category_is_rejected_for_new_products() {
    let err = ProductDraft {
        category: Category::Custom("SEO".to_string()),
        ..draft()
    }
    .validate()
    .unwrap_err();
    assert_eq!(err.field, "category");
}

#[test]
fn patch_only_checks_present_fields() {
    assert!(ProductPatch::default().validate().is_ok());
    let patch = ProductPatch {
        url: Some("not a url".to_string()),
        ..ProductPatch::default()
    };
    assert_eq!(patch.validate().unwrap_err().field, "url");
}

#[test]
fn profile_budget_must_be_non_negative() {
    let patch = ProfilePatch {
        budget: Some(-50.0),
        ..ProfilePatch::default()
    };
    assert_eq!(patch.validate().unwrap_err().field, "budget");
    let patch = ProfilePatch {
        budget: Some(0.0),
        ..ProfilePatch::default()
    };
    assert!(patch.validate().is_ok());
}

#[test]
fn url_shapes() {
    assert!(is_valid_url("https://semrush.com"));
    assert!(is_valid_url("example.co.uk/pricing/pro-plan"));
    assert!(is_valid_url("http://my-tool.io/"));
    assert!(!is_valid_url("https://localhost"));
    assert!(!is_valid_url("ftp://example.com"));
    assert!(!is_valid_url("https://example.toolongtld"));
}

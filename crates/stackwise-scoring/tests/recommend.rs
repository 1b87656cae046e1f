mod common;

use std::collections::BTreeSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use stackwise_core::models::goal::Goal;
use stackwise_core::models::recommendation::RecommendationRequest;
use stackwise_scoring::recommend::{alignment_score, budget_impact, score_product, worth_buying};
use stackwise_scoring::similarity::is_similar;
use stackwise_scoring::{RandomizedScoring, ScoringStrategy, SimilarityScale};

use common::{ScriptedRng, product};

fn request(goals: &[Goal], budget: f64) -> RecommendationRequest {
    RecommendationRequest {
        product_name: "Kajabi".to_string(),
        product_url: "https://kajabi.com".to_string(),
        product_id: None,
        user_budget: budget,
        user_goals: goals.iter().copied().collect(),
        existing_products: Vec::new(),
    }
}

#[test]
fn goals_are_partitioned_for_many_seeds() {
    let goals: BTreeSet<Goal> = Goal::all().iter().copied().collect();
    let req = RecommendationRequest {
        user_goals: goals.clone(),
        ..request(&[], 100.0)
    };

    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let resp = score_product(&req, &mut rng, SimilarityScale::Ten);
        let alignment = &resp.goal_alignment;

        assert!(alignment.aligned_goals.is_disjoint(&alignment.misaligned_goals));
        let union: BTreeSet<Goal> = alignment
            .aligned_goals
            .union(&alignment.misaligned_goals)
            .copied()
            .collect();
        assert_eq!(union, goals);
        assert_eq!(
            alignment.alignment_score,
            10.0 * alignment.aligned_goals.len() as f64 / goals.len() as f64
        );
    }
}

#[test]
fn empty_goals_score_zero() {
    let mut rng = StdRng::seed_from_u64(7);
    let resp = score_product(&request(&[], 500.0), &mut rng, SimilarityScale::Ten);

    assert_eq!(resp.goal_alignment.alignment_score, 0.0);
    assert!(resp.goal_alignment.aligned_goals.is_empty());
    assert!(resp.goal_alignment.misaligned_goals.is_empty());
    assert!(!resp.worth_buying);
}

#[test]
fn worth_buying_truth_table() {
    for high_alignment in [false, true] {
        for within_budget in [false, true] {
            for few_similar in [false, true] {
                let score = if high_alignment { 10.0 } else { 6.0 };
                let similar = if few_similar { 1 } else { 2 };
                assert_eq!(
                    worth_buying(score, within_budget, similar),
                    high_alignment && within_budget && few_similar,
                    "score={score} within_budget={within_budget} similar={similar}"
                );
            }
        }
    }
}

#[test]
fn scripted_draws_produce_a_buy_verdict() {
    // price draw 0.5 -> 20 + 90 = 110; goal draws all above the cutoff.
    let mut rng = ScriptedRng::new(&[0.5, 0.9, 0.8, 0.31]);
    let req = request(
        &[Goal::SideHustle, Goal::PassiveIncome, Goal::ContentCreation],
        150.0,
    );
    let resp = score_product(&req, &mut rng, SimilarityScale::Ten);

    assert_eq!(rng.remaining(), 0);
    assert_eq!(resp.budget_analysis.estimated_price, 110.0);
    assert!(resp.budget_analysis.within_budget);
    assert_eq!(resp.budget_analysis.budget_impact, "Low impact (73% of your budget)");
    assert_eq!(resp.goal_alignment.alignment_score, 10.0);
    assert!(resp.worth_buying);
    assert!(resp.alternative_suggestions.is_empty());
    assert!(resp.recommendation.starts_with("Based on our analysis, Kajabi"));
    assert!(resp.recommendation.contains("fits within your budget of $150"));
    assert!(resp.recommendation.ends_with("should provide good value."));
}

#[test]
fn scripted_draws_produce_a_pass_verdict() {
    // price 0.99 -> 20 + 178 = 198 over a 100 budget; one of two goals aligned.
    let mut rng = ScriptedRng::new(&[0.99, 0.9, 0.1]);
    let req = request(&[Goal::SideHustle, Goal::ECommerce], 100.0);
    let resp = score_product(&req, &mut rng, SimilarityScale::Ten);

    assert_eq!(resp.budget_analysis.estimated_price, 198.0);
    assert!(!resp.budget_analysis.within_budget);
    assert_eq!(resp.budget_analysis.budget_impact, "High impact (198% of your budget)");
    assert_eq!(resp.goal_alignment.alignment_score, 5.0);
    assert!(!resp.worth_buying);
    assert_eq!(resp.alternative_suggestions.len(), 2);
    assert_eq!(
        resp.alternative_suggestions[0].url.as_deref(),
        Some("https://example.com/alternative-to-kajabi")
    );
    assert!(resp.recommendation.contains("exceeds your budget of $100"));
}

#[test]
fn two_similar_products_rule_out_a_purchase() {
    let mut rng = ScriptedRng::new(&[0.0, 0.5, 0.1, 0.9]);
    let req = RecommendationRequest {
        product_name: "ClickFunnels".to_string(),
        existing_products: vec![
            product("ClickFunnels Pro", "software"),
            product("ClickFunnels Classic", "software"),
            product("Mailchimp", "software"),
        ],
        ..request(&[Goal::MainBusiness], 500.0)
    };
    let resp = score_product(&req, &mut rng, SimilarityScale::Ten);

    let similar = &resp.similarity_to_existing;
    assert!(similar.has_similar);
    assert_eq!(similar.similar_products.len(), 2);
    assert_eq!(resp.goal_alignment.alignment_score, 10.0);
    assert!(resp.budget_analysis.within_budget);
    assert!(!resp.worth_buying);
    assert!(resp.recommendation.contains("ClickFunnels Pro, ClickFunnels Classic"));
}

#[test]
fn similarity_matching_rules() {
    assert!(is_similar(&product("ClickFunnels Pro", "software"), "ClickFunnels"));
    assert!(is_similar(&product("clickfunnels", "software"), "ClickFunnels Pro"));
    assert!(!is_similar(&product("Mailchimp", "software"), "SEMrush"));
    // Category equal to the requested name counts as similar.
    assert!(is_similar(&product("Ahrefs", "SEO"), "seo"));
}

#[test]
fn similarity_scores_follow_the_configured_scale() {
    let existing = vec![product("ClickFunnels Pro", "software")];
    for (scale, expected) in [(SimilarityScale::Ten, 7.5), (SimilarityScale::Unit, 0.75)] {
        let mut rng = ScriptedRng::new(&[0.5, 0.5]);
        let req = RecommendationRequest {
            product_name: "ClickFunnels".to_string(),
            existing_products: existing.clone(),
            ..request(&[], 100.0)
        };
        let resp = score_product(&req, &mut rng, scale);
        assert_eq!(
            resp.similarity_to_existing.similar_products[0].similarity_score,
            expected
        );
    }
}

#[tokio::test]
async fn default_scale_reports_similarity_out_of_ten() {
    let scoring = RandomizedScoring::seeded(42, SimilarityScale::default());
    let req = RecommendationRequest {
        product_name: "ClickFunnels".to_string(),
        existing_products: vec![product("ClickFunnels Pro", "software")],
        ..request(&[Goal::SideHustle], 100.0)
    };

    for _ in 0..50 {
        let resp = scoring.recommend(&req).await.unwrap();
        let score = resp.similarity_to_existing.similar_products[0].similarity_score;
        assert!((5.0..10.0).contains(&score), "score {score} outside [5, 10)");
    }
}

#[test]
fn alignment_and_budget_helpers() {
    assert_eq!(alignment_score(0, 0), 0.0);
    assert_eq!(alignment_score(2, 3), 10.0 * 2.0 / 3.0);
    assert_eq!(budget_impact(50.0, 0.0, false), "High impact (no budget set)");
    assert_eq!(budget_impact(50.0, 200.0, true), "Low impact (25% of your budget)");
}

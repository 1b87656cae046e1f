//! The placeholder product recommendation.
//!
//! Draw order is fixed so a scripted random source reproduces a verdict:
//! one draw per similar product, one for the price, then one per goal.

use std::collections::BTreeSet;

use rand::Rng;
use stackwise_core::models::goal::Goal;
use stackwise_core::models::recommendation::{
    AlternativeSuggestion, BudgetAnalysis, GoalAlignment, ProductRecommendationResponse,
    RecommendationRequest, SimilarProduct, SimilarityToExisting,
};

use crate::scale::SimilarityScale;
use crate::similarity::find_similar;

/// Lowest normalized similarity score assigned to a match.
pub const MIN_SIMILARITY: f64 = 0.5;
/// Estimated prices are drawn from `[PRICE_FLOOR, PRICE_FLOOR + PRICE_SPAN)`.
pub const PRICE_FLOOR: u32 = 20;
pub const PRICE_SPAN: u32 = 180;
/// A goal is aligned when its draw exceeds this, i.e. with probability 0.7.
pub const MISALIGN_CUTOFF: f64 = 0.3;
/// Alignment score a product must exceed to be worth buying.
pub const ALIGNMENT_THRESHOLD: f64 = 6.0;
/// Owning this many similar products rules a purchase out.
pub const MAX_SIMILAR: usize = 2;

/// Produce a recommendation for `request`, drawing from `rng`.
pub fn score_product<R: Rng + ?Sized>(
    request: &RecommendationRequest,
    rng: &mut R,
    scale: SimilarityScale,
) -> ProductRecommendationResponse {
    let product_name = request.product_name.as_str();

    let similar_products: Vec<SimilarProduct> =
        find_similar(&request.existing_products, product_name)
            .into_iter()
            .map(|p| {
                let normalized = MIN_SIMILARITY + rng.random::<f64>() * (1.0 - MIN_SIMILARITY);
                SimilarProduct {
                    id: Some(p.id),
                    name: p.name.clone(),
                    similarity_score: scale.report(normalized),
                }
            })
            .collect();

    let estimated_price = draw_price(rng);
    let within_budget = estimated_price <= request.user_budget;

    let (aligned_goals, misaligned_goals) = partition_goals(&request.user_goals, rng);
    let alignment_score = alignment_score(aligned_goals.len(), request.user_goals.len());

    let worth = worth_buying(alignment_score, within_budget, similar_products.len());

    let recommendation = recommendation_text(&Verdict {
        product_name,
        worth_buying: worth,
        within_budget,
        estimated_price,
        user_budget: request.user_budget,
        aligned: &aligned_goals,
        misaligned: &misaligned_goals,
        similar: &similar_products,
    });

    let alternative_suggestions = if worth {
        Vec::new()
    } else {
        alternatives(product_name)
    };

    ProductRecommendationResponse {
        recommendation,
        worth_buying: worth,
        goal_alignment: GoalAlignment {
            alignment_score,
            aligned_goals,
            misaligned_goals,
        },
        budget_analysis: BudgetAnalysis {
            within_budget,
            budget_impact: budget_impact(estimated_price, request.user_budget, within_budget),
            estimated_price,
        },
        similarity_to_existing: SimilarityToExisting {
            has_similar: !similar_products.is_empty(),
            similar_products,
        },
        alternative_suggestions,
    }
}

/// Whole-dollar price stand-in, uniform over `[20, 200)`.
fn draw_price<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let offset = (rng.random::<f64>() * f64::from(PRICE_SPAN)).floor();
    f64::from(PRICE_FLOOR) + offset
}

/// Assign every goal to exactly one side with an independent draw each.
fn partition_goals<R: Rng + ?Sized>(
    goals: &BTreeSet<Goal>,
    rng: &mut R,
) -> (BTreeSet<Goal>, BTreeSet<Goal>) {
    let mut aligned = BTreeSet::new();
    let mut misaligned = BTreeSet::new();
    for goal in goals {
        if rng.random::<f64>() > MISALIGN_CUTOFF {
            aligned.insert(*goal);
        } else {
            misaligned.insert(*goal);
        }
    }
    (aligned, misaligned)
}

/// `10 * aligned / total`, or 0 when no goals were requested.
pub fn alignment_score(aligned: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    10.0 * aligned as f64 / total as f64
}

pub fn worth_buying(alignment_score: f64, within_budget: bool, similar_count: usize) -> bool {
    alignment_score > ALIGNMENT_THRESHOLD && within_budget && similar_count < MAX_SIMILAR
}

pub fn budget_impact(estimated_price: f64, user_budget: f64, within_budget: bool) -> String {
    if user_budget <= 0.0 {
        return "High impact (no budget set)".to_string();
    }
    let percent = (estimated_price / user_budget * 100.0).round();
    if within_budget {
        format!("Low impact ({percent}% of your budget)")
    } else {
        format!("High impact ({percent}% of your budget)")
    }
}

struct Verdict<'a> {
    product_name: &'a str,
    worth_buying: bool,
    within_budget: bool,
    estimated_price: f64,
    user_budget: f64,
    aligned: &'a BTreeSet<Goal>,
    misaligned: &'a BTreeSet<Goal>,
    similar: &'a [SimilarProduct],
}

fn recommendation_text(v: &Verdict<'_>) -> String {
    let similar_names = v
        .similar
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let mut text = String::new();
    if v.worth_buying {
        text.push_str(&format!(
            "Based on our analysis, {} appears to be a good investment for your marketing stack. ",
            v.product_name
        ));
        if !v.aligned.is_empty() {
            text.push_str(&format!(
                "It aligns well with your goals of {}. ",
                goal_labels(v.aligned)
            ));
        }
        if v.within_budget {
            text.push_str(&format!(
                "At an estimated price of ${}, it fits within your budget of ${}. ",
                v.estimated_price, v.user_budget
            ));
        }
        if v.similar.is_empty() {
            text.push_str(
                "This tool fills a gap in your current marketing stack and should provide good value.",
            );
        } else {
            text.push_str(&format!(
                "However, note that you already have {} similar product(s): {}. Consider if this new tool offers unique features that your existing tools don't provide.",
                v.similar.len(),
                similar_names
            ));
        }
    } else {
        text.push_str(&format!(
            "We don't recommend purchasing {} at this time. ",
            v.product_name
        ));
        if v.aligned.is_empty() {
            text.push_str("It doesn't align well with any of your stated goals. ");
        } else if v.misaligned.len() > v.aligned.len() {
            text.push_str("It only partially aligns with your goals. ");
        }
        if !v.within_budget {
            text.push_str(&format!(
                "At an estimated price of ${}, it exceeds your budget of ${}. ",
                v.estimated_price, v.user_budget
            ));
        }
        if !v.similar.is_empty() {
            text.push_str(&format!(
                "You already have similar tools: {similar_names}. Consider maximizing the use of these existing tools before investing in a new one."
            ));
        }
    }
    text.trim_end().to_string()
}

fn goal_labels(goals: &BTreeSet<Goal>) -> String {
    goals
        .iter()
        .map(Goal::label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The two suggestions offered when a purchase is not recommended.
pub fn alternatives(product_name: &str) -> Vec<AlternativeSuggestion> {
    vec![
        AlternativeSuggestion {
            name: format!("Alternative to {product_name}"),
            url: Some(format!(
                "https://example.com/alternative-to-{}",
                slug(product_name)
            )),
            reason: "More affordable option with similar features".to_string(),
        },
        AlternativeSuggestion {
            name: "Free Open Source Alternative".to_string(),
            url: Some("https://example.com/open-source-marketing-tools".to_string()),
            reason: "No-cost option to try before investing".to_string(),
        },
    ]
}

/// Lowercase, with each run of whitespace replaced by a single dash.
fn slug(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

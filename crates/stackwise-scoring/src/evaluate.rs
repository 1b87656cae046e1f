//! Keep-or-remove evaluation of a product already in the stack.

use stackwise_core::models::evaluation::{Criterion, KeepDecision, KeepEvaluation, Ratings};

use crate::error::ScoringError;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 10;
/// Average rating at or above which a product is kept.
pub const KEEP_THRESHOLD: f64 = 7.0;
/// Average rating at or above which a product is flagged for review rather
/// than removal.
pub const REVIEW_THRESHOLD: f64 = 4.0;

/// Mean of the rated criteria. Unrated criteria do not count; no ratings
/// averages to 0.
pub fn average_rating(ratings: &Ratings) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: u32 = ratings.values().map(|r| u32::from(*r)).sum();
    f64::from(sum) / ratings.len() as f64
}

pub fn decide(average_score: f64) -> KeepDecision {
    if average_score >= KEEP_THRESHOLD {
        KeepDecision::Keep
    } else if average_score >= REVIEW_THRESHOLD {
        KeepDecision::Review
    } else {
        KeepDecision::Remove
    }
}

pub fn decision_message(product_name: &str, decision: KeepDecision) -> String {
    match decision {
        KeepDecision::Keep => format!(
            "{product_name} is still valuable to your marketing stack. Keep it and continue to maximize its use."
        ),
        KeepDecision::Review => format!(
            "{product_name} provides some value but may need reevaluation. Consider if you're using it to its full potential."
        ),
        KeepDecision::Remove => format!(
            "{product_name} doesn't seem to be providing sufficient value. Consider replacing it or canceling your subscription."
        ),
    }
}

/// Evaluate `product_name` from partial or complete ratings.
pub fn evaluate_product(product_name: &str, ratings: &Ratings) -> Result<KeepEvaluation, ScoringError> {
    if let Some((criterion, rating)) = ratings
        .iter()
        .find(|(_, r)| !(MIN_RATING..=MAX_RATING).contains(*r))
    {
        return Err(ScoringError::InvalidRating {
            criterion: criterion.as_str(),
            rating: *rating,
        });
    }

    let average_score = average_rating(ratings);
    let decision = decide(average_score);

    Ok(KeepEvaluation {
        average_score,
        rated: ratings.len(),
        complete: Criterion::all().iter().all(|c| ratings.contains_key(c)),
        decision,
        message: decision_message(product_name, decision),
    })
}

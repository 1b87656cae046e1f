use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("random source unavailable: a previous draw panicked")]
    RandomSource,

    #[error("rating {rating} for '{criterion}' is outside 1..=10")]
    InvalidRating { criterion: &'static str, rating: u8 },

    #[error("scoring strategy '{strategy}' failed: {message}")]
    Strategy { strategy: String, message: String },
}

//! Client-side caches over the tables, one per domain.
//!
//! Stores are cheap to clone; clones share state. The state lock is only
//! taken between awaits, so concurrent calls interleave freely and the last
//! write wins.

pub mod auth;
pub mod product;
pub mod recommendation;

pub use auth::{AuthState, AuthStore};
pub use product::{ProductState, ProductStore};
pub use recommendation::{RecommendationState, RecommendationStore};

//! stackwise-app
//!
//! Application layer: the product, auth, and recommendation stores, the
//! [`AppContext`] that owns them, configuration, and logging setup.

pub mod audit;
pub mod config;
pub mod context;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod notify;
pub mod status;
pub mod stores;
pub mod telemetry;

pub use context::AppContext;
pub use error::StoreError;

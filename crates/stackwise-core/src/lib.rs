//! stackwise-core
//!
//! Pure domain types, table conventions, and input validation.
//! No AWS SDK dependency; this is the shared vocabulary of the Stackwise system.

pub mod error;
pub mod models;
pub mod tables;
pub mod validation;

use std::future::Future;
use std::pin::Pin;

/// Boxed, `Send` future used by the dyn-compatible service traits
/// (table client, auth provider, scoring strategy).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

//! stackwise-storage
//!
//! Row persistence. [`TableClient`] is the seam the stores talk to; rows are
//! plain JSON objects. [`S3TableClient`] keeps one object per row in a bucket,
//! [`MemoryTableClient`] keeps them in process.

pub mod client;
pub mod error;
pub mod memory;
pub mod objects;
pub mod query;
pub mod row;
pub mod s3;
pub mod json;

use serde_json::Value;
use stackwise_core::BoxFuture;
use stackwise_core::tables::Table;
use uuid::Uuid;

pub use error::StorageError;
pub use memory::MemoryTableClient;
pub use query::{Filter, Order, Query};
pub use s3::S3TableClient;

/// Generic table operations over JSON rows.
pub trait TableClient: Send + Sync {
    /// Rows matching every filter, ordered and truncated per `query`.
    fn select<'a>(
        &'a self,
        table: Table,
        query: &'a Query,
    ) -> BoxFuture<'a, Result<Vec<Value>, StorageError>>;

    /// Store a new row. `id` and `created_at` are assigned when absent;
    /// returns the row as stored.
    fn insert<'a>(&'a self, table: Table, row: Value)
    -> BoxFuture<'a, Result<Value, StorageError>>;

    /// Shallow-merge `patch` into an existing row and return the result.
    fn update<'a>(
        &'a self,
        table: Table,
        id: Uuid,
        patch: Value,
    ) -> BoxFuture<'a, Result<Value, StorageError>>;

    /// Remove a row. Deleting a missing row succeeds.
    fn delete<'a>(&'a self, table: Table, id: Uuid) -> BoxFuture<'a, Result<(), StorageError>>;
}

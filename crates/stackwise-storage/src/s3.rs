use aws_sdk_s3::Client;
use serde_json::Value;
use stackwise_core::BoxFuture;
use stackwise_core::tables::{Table, row_key, table_prefix};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::StorageError;
use crate::query::Query;
use crate::row::{merge_patch, stamp_row};
use crate::{TableClient, json, objects};

/// Rows stored as `{table}/{id}.json` objects in one bucket.
///
/// Selection lists the table prefix and evaluates the query client-side.
#[derive(Clone)]
pub struct S3TableClient {
    client: Client,
    bucket: String,
}

impl S3TableClient {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn load_table(&self, table: Table) -> Result<Vec<Value>, StorageError> {
        let keys = objects::list_keys(&self.client, &self.bucket, &table_prefix(table)).await?;
        let mut rows = Vec::with_capacity(keys.len());
        for key in keys.iter().filter(|k| k.ends_with(".json")) {
            match json::load_json::<Value>(&self.client, &self.bucket, key).await {
                Ok(row) => rows.push(row),
                // Deleted between list and get.
                Err(StorageError::NotFound { .. }) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(rows)
    }
}

impl TableClient for S3TableClient {
    fn select<'a>(
        &'a self,
        table: Table,
        query: &'a Query,
    ) -> BoxFuture<'a, Result<Vec<Value>, StorageError>> {
        Box::pin(async move {
            let rows = self.load_table(table).await?;
            let scanned = rows.len();
            let selected = query.apply(rows);
            debug!(%table, scanned, selected = selected.len(), "selected rows");
            Ok(selected)
        })
    }

    fn insert<'a>(
        &'a self,
        table: Table,
        mut row: Value,
    ) -> BoxFuture<'a, Result<Value, StorageError>> {
        Box::pin(async move {
            let id = stamp_row(&mut row)?;
            json::save_json(&self.client, &self.bucket, &row_key(table, id), &row).await?;
            info!(%table, %id, "inserted row");
            Ok(row)
        })
    }

    fn update<'a>(
        &'a self,
        table: Table,
        id: Uuid,
        patch: Value,
    ) -> BoxFuture<'a, Result<Value, StorageError>> {
        Box::pin(async move {
            let key = row_key(table, id);
            let mut row: Value = json::load_json(&self.client, &self.bucket, &key)
                .await
                .map_err(|e| match e {
                    StorageError::NotFound { .. } => StorageError::RowNotFound { table, id },
                    other => other,
                })?;
            merge_patch(&mut row, patch)?;
            json::save_json(&self.client, &self.bucket, &key, &row).await?;
            info!(%table, %id, "updated row");
            Ok(row)
        })
    }

    fn delete<'a>(&'a self, table: Table, id: Uuid) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            objects::delete_object(&self.client, &self.bucket, &row_key(table, id)).await?;
            info!(%table, %id, "deleted row");
            Ok(())
        })
    }
}

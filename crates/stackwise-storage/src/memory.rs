use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use stackwise_core::BoxFuture;
use stackwise_core::tables::Table;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::error::StorageError;
use crate::query::Query;
use crate::row::{merge_patch, row_id, stamp_row};
use crate::TableClient;

/// In-process tables, kept in insertion order. Clones share the same rows.
#[derive(Clone, Default)]
pub struct MemoryTableClient {
    tables: Arc<Mutex<HashMap<Table, Vec<Value>>>>,
}

impl MemoryTableClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently stored in `table`.
    pub async fn len(&self, table: Table) -> usize {
        self.tables.lock().await.get(&table).map_or(0, Vec::len)
    }
}

fn position(rows: &[Value], id: Uuid) -> Option<usize> {
    rows.iter().position(|r| row_id(r).is_ok_and(|rid| rid == id))
}

impl TableClient for MemoryTableClient {
    fn select<'a>(
        &'a self,
        table: Table,
        query: &'a Query,
    ) -> BoxFuture<'a, Result<Vec<Value>, StorageError>> {
        Box::pin(async move {
            let tables = self.tables.lock().await;
            let rows = tables.get(&table).cloned().unwrap_or_default();
            Ok(query.apply(rows))
        })
    }

    fn insert<'a>(
        &'a self,
        table: Table,
        mut row: Value,
    ) -> BoxFuture<'a, Result<Value, StorageError>> {
        Box::pin(async move {
            let id = stamp_row(&mut row)?;
            let mut tables = self.tables.lock().await;
            let rows = tables.entry(table).or_default();
            match position(rows, id) {
                Some(index) => rows[index] = row.clone(),
                None => rows.push(row.clone()),
            }
            debug!(%table, %id, "inserted row");
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
            let mut tables = self.tables.lock().await;
            let rows = tables.entry(table).or_default();
            let index = position(rows, id).ok_or(StorageError::RowNotFound { table, id })?;
            merge_patch(&mut rows[index], patch)?;
            debug!(%table, %id, "updated row");
            Ok(rows[index].clone())
        })
    }

    fn delete<'a>(&'a self, table: Table, id: Uuid) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let mut tables = self.tables.lock().await;
            if let Some(rows) = tables.get_mut(&table) {
                rows.retain(|r| !row_id(r).is_ok_and(|rid| rid == id));
            }
            debug!(%table, %id, "deleted row");
            Ok(())
        })
    }
}

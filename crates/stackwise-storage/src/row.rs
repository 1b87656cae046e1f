//! Helpers shared by the table backends.

use jiff::Timestamp;
use serde_json::{Map, Value};
use stackwise_core::tables::columns;
use uuid::Uuid;

use crate::error::StorageError;

/// Prepare a row for insertion: assign `id` and `created_at` when absent and
/// return the row's id.
pub fn stamp_row(row: &mut Value) -> Result<Uuid, StorageError> {
    let object = as_object_mut(row)?;

    let id = match object.get(columns::ID) {
        None | Some(Value::Null) => {
            let id = Uuid::new_v4();
            object.insert(columns::ID.to_string(), Value::String(id.to_string()));
            id
        }
        Some(value) => parse_id(value)?,
    };

    if matches!(object.get(columns::CREATED_AT), None | Some(Value::Null)) {
        object.insert(
            columns::CREATED_AT.to_string(),
            Value::String(Timestamp::now().to_string()),
        );
    }

    Ok(id)
}

/// Copy each top-level field of `patch` onto `row`. The id is never changed.
pub fn merge_patch(row: &mut Value, patch: Value) -> Result<(), StorageError> {
    let Value::Object(fields) = patch else {
        return Err(StorageError::InvalidRow("patch must be a JSON object".to_string()));
    };
    let object = as_object_mut(row)?;
    for (column, value) in fields {
        if column != columns::ID {
            object.insert(column, value);
        }
    }
    Ok(())
}

/// The id column of a stored row.
pub fn row_id(row: &Value) -> Result<Uuid, StorageError> {
    let value = row
        .get(columns::ID)
        .ok_or_else(|| StorageError::InvalidRow("row has no id".to_string()))?;
    parse_id(value)
}

fn parse_id(value: &Value) -> Result<Uuid, StorageError> {
    value
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| StorageError::InvalidRow(format!("id is not a UUID: {value}")))
}

fn as_object_mut(row: &mut Value) -> Result<&mut Map<String, Value>, StorageError> {
    row.as_object_mut()
        .ok_or_else(|| StorageError::InvalidRow("row must be a JSON object".to_string()))
}

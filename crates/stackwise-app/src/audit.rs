use serde::Serialize;
use stackwise_core::tables::Table;
use tracing::info;
use uuid::Uuid;

/// A mutation performed on behalf of a user, logged via `tracing` under the
/// `audit.*` fields.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: &'static str,
    pub table: &'static str,
    pub row_id: Uuid,
    pub user_id: Option<Uuid>,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(action: &'static str, table: Table, row_id: Uuid) -> Self {
        Self {
            action,
            table: table.name(),
            row_id,
            user_id: None,
            details: None,
        }
    }

    pub fn by(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn emit(&self) {
        let user_id = self.user_id.map(|id| id.to_string()).unwrap_or_default();
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        info!(
            audit.action = self.action,
            audit.table = self.table,
            audit.row_id = %self.row_id,
            audit.user_id = %user_id,
            audit.details = %details,
            "audit event"
        );
    }
}

//! Capabilities the pipeline needs from the host that owns the table.
//!
//! The pipeline only sees these traits; the concrete host (a JSON file in the
//! app, in-memory stubs in tests) is chosen at the call boundary.

use serde_json::Value;
use thiserror::Error;

use crate::{FieldUpdate, Row};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("table unavailable: {0}")]
    Unavailable(String),
    #[error("table could not be parsed: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    #[error("no record with id {0:?}")]
    UnknownRecord(String),
    #[error("no field named {0:?}")]
    UnknownField(String),
    #[error("update rejected: {0}")]
    Rejected(String),
    #[error("failed to persist table: {0}")]
    Persist(String),
}

#[async_trait::async_trait]
pub trait RowSource: Send + Sync {
    /// All rows of the table, in table order.
    async fn list_rows(&self) -> Result<Vec<Row>, SourceError>;
}

#[async_trait::async_trait]
pub trait RecordWriter: Send + Sync {
    /// Applies one bulk update. Resolves only once the host has accepted it.
    async fn update_records(&self, batch: &[FieldUpdate]) -> Result<(), WriteError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionResult {
    pub has_permission: bool,
    /// User-facing explanation when permission is denied.
    pub reason: Option<String>,
}

impl PermissionResult {
    pub fn granted() -> Self {
        Self {
            has_permission: true,
            reason: None,
        }
    }

    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            has_permission: false,
            reason: Some(reason.into()),
        }
    }
}

pub trait PermissionCheck {
    fn check_update_permission(&self, fields: &[&str]) -> PermissionResult;
}

pub trait FieldAccessor: Send + Sync {
    /// Renders the selected field of `row` as plain text.
    fn extract(&self, row: &Row) -> String;
}

/// Reads a field by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedField {
    name: String,
}

impl NamedField {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl FieldAccessor for NamedField {
    fn extract(&self, row: &Row) -> String {
        row.fields
            .get(&self.name)
            .map(render_value)
            .unwrap_or_default()
    }
}

/// Plain-text rendering of a cell value.
///
/// Linked records and attachments arrive as objects; their `name` is the
/// text a user sees in the cell.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(items) => items
            .iter()
            .map(render_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => match map.get("name") {
            Some(Value::String(name)) => name.clone(),
            _ => value.to_string(),
        },
    }
}

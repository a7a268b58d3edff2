//! A host table stored as a JSON document on disk.
//!
//! ```json
//! { "name": "Articles", "fields": ["URL", "Summary"],
//!   "records": [ { "id": "r1", "fields": { "URL": "https://example.com" } } ] }
//! ```
//!
//! An empty `fields` list disables schema checks.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use engine_logging::{engine_debug, engine_info};
use serde::{Deserialize, Serialize};

use crate::persist::write_atomically;
use crate::{
    FieldUpdate, PermissionCheck, PermissionResult, RecordWriter, Row, RowSource, SourceError,
    WriteError,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDocument {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub records: Vec<Row>,
}

impl TableDocument {
    fn has_field(&self, field: &str) -> bool {
        self.fields.is_empty() || self.fields.iter().any(|name| name == field)
    }

    /// Applies `batch` to a copy, so a rejected batch leaves `self` untouched.
    fn with_updates(&self, batch: &[FieldUpdate]) -> Result<Self, WriteError> {
        let mut next = self.clone();
        for update in batch {
            if let Some(field) = update.fields.keys().find(|field| !self.has_field(field)) {
                return Err(WriteError::UnknownField(field.clone()));
            }
            let record = next
                .records
                .iter_mut()
                .find(|record| record.id == update.id)
                .ok_or_else(|| WriteError::UnknownRecord(update.id.clone()))?;
            for (field, value) in &update.fields {
                record.fields.insert(field.clone(), value.clone());
            }
        }
        Ok(next)
    }
}

pub struct JsonTable {
    path: PathBuf,
    document: Mutex<TableDocument>,
}

impl JsonTable {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SourceError> {
        let path = path.into();
        let content = fs::read_to_string(&path)
            .map_err(|err| SourceError::Unavailable(format!("{}: {}", path.display(), err)))?;
        let document: TableDocument = serde_json::from_str(&content)
            .map_err(|err| SourceError::Parse(format!("{}: {}", path.display(), err)))?;
        engine_info!(
            "Opened table {:?} with {} records from {:?}",
            document.name,
            document.records.len(),
            path
        );
        Ok(Self {
            path,
            document: Mutex::new(document),
        })
    }

    pub fn name(&self) -> String {
        self.lock().name.clone()
    }

    pub fn snapshot(&self) -> TableDocument {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TableDocument> {
        // A panic while holding the lock cannot leave a half-applied batch.
        self.document
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn is_read_only(&self) -> bool {
        fs::metadata(&self.path)
            .map(|meta| meta.permissions().readonly())
            .unwrap_or(false)
    }
}

#[async_trait::async_trait]
impl RowSource for JsonTable {
    async fn list_rows(&self) -> Result<Vec<Row>, SourceError> {
        Ok(self.lock().records.clone())
    }
}

#[async_trait::async_trait]
impl RecordWriter for JsonTable {
    async fn update_records(&self, batch: &[FieldUpdate]) -> Result<(), WriteError> {
        let mut document = self.lock();
        let next = document.with_updates(batch)?;
        let content = serde_json::to_vec_pretty(&next)
            .map_err(|err| WriteError::Persist(err.to_string()))?;
        write_atomically(&self.path, &content)
            .map_err(|err| WriteError::Persist(err.to_string()))?;
        *document = next;
        engine_debug!("Persisted {} updates to {:?}", batch.len(), self.path);
        Ok(())
    }
}

impl PermissionCheck for JsonTable {
    fn check_update_permission(&self, fields: &[&str]) -> PermissionResult {
        let document = self.lock();
        if let Some(missing) = fields.iter().find(|field| !document.has_field(field)) {
            return PermissionResult::denied(format!(
                "Field \"{}\" does not exist in table \"{}\"",
                missing, document.name
            ));
        }
        drop(document);
        if self.is_read_only() {
            return PermissionResult::denied(format!(
                "Table file {} is read-only",
                self.path.display()
            ));
        }
        PermissionResult::granted()
    }
}

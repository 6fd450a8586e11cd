//! Record store persisted as a single JSON document.
//!
//! The document maps table names to arrays of records. Every save rewrites
//! the whole document through a temporary file and a rename, so a crash
//! never leaves a half-written store behind.

use super::{matches_query, Storage};
use crate::effects::Record;
use crate::error::StorageError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::{debug, info};

type Tables = BTreeMap<String, Vec<Record>>;

/// Record store backed by a JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    tables: Mutex<Tables>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store; it is
    /// created on the first save.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let tables = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => Tables::new(),
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|source| StorageError::Decode {
                    path: path.clone(),
                    source,
                })?
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Tables::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        info!(path = %path.display(), tables = tables.len(), "opened json store");
        Ok(Self {
            path,
            tables: Mutex::new(tables),
        })
    }

    async fn persist(&self, tables: &Tables) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(tables).map_err(StorageError::Encode)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| self.io_error(source))?;
        }
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, bytes)
            .await
            .map_err(|source| StorageError::Io {
                path: tmp_path.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl Storage for JsonFileStore {
    async fn save(&self, table: &str, record: Record) -> Result<Record, StorageError> {
        let mut tables = self.tables.lock().await;
        tables
            .entry(table.to_string())
            .or_default()
            .push(record.clone());

        if let Err(err) = self.persist(&tables).await {
            // keep memory in step with disk
            if let Some(rows) = tables.get_mut(table) {
                rows.pop();
            }
            return Err(err);
        }
        debug!(table, path = %self.path.display(), "saved record");
        Ok(record)
    }

    async fn all(&self, table: &str, query: Option<Record>) -> Result<Vec<Record>, StorageError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| matches_query(row, query.as_ref()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

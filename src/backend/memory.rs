//! In-process record store.

use super::{matches_query, Storage};
use crate::effects::Record;
use crate::error::StorageError;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// Record store that lives for the duration of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Vec<Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in `table`.
    pub fn count(&self, table: &str) -> usize {
        self.tables.read().get(table).map_or(0, Vec::len)
    }
}

#[async_trait]
impl Storage for MemoryStore {
    async fn save(&self, table: &str, record: Record) -> Result<Record, StorageError> {
        let mut tables = self.tables.write();
        let rows = tables.entry(table.to_string()).or_default();
        rows.push(record.clone());
        debug!(table, rows = rows.len(), "saved record");
        Ok(record)
    }

    async fn all(&self, table: &str, query: Option<Record>) -> Result<Vec<Record>, StorageError> {
        let tables = self.tables.read();
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(title: &str) -> Record {
        let mut record = Record::new();
        record.insert("title".to_string(), json!(title));
        record
    }

    #[tokio::test]
    async fn unknown_table_is_empty() {
        let store = MemoryStore::new();
        assert!(store.all("posts", None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn all_preserves_insertion_order() {
        let store = MemoryStore::new();
        for title in ["first", "second", "third"] {
            store.save("posts", record(title)).await.unwrap();
        }

        let titles: Vec<String> = store
            .all("posts", None)
            .await
            .unwrap()
            .iter()
            .filter_map(|r| r.get("title").and_then(|v| v.as_str()).map(String::from))
            .collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn tables_are_independent() {
        let store = MemoryStore::new();
        store.save("posts", record("a")).await.unwrap();

        assert_eq!(store.count("posts"), 1);
        assert_eq!(store.count("authors"), 0);
    }

    #[tokio::test]
    async fn all_applies_query() {
        let store = MemoryStore::new();
        store.save("posts", record("keep")).await.unwrap();
        store.save("posts", record("drop")).await.unwrap();

        let found = store.all("posts", Some(record("keep"))).await.unwrap();
        assert_eq!(found, vec![record("keep")]);
    }
}

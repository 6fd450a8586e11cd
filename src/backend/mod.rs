//! Backends that carry out interpreted instructions.
//!
//! The interpreter only knows the [`Storage`] and [`Console`] traits; which
//! implementation sits behind them is decided when the environment is built.

mod json_file;
mod memory;
mod terminal;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use terminal::TerminalConsole;

use crate::effects::Record;
use crate::error::{ConsoleError, StorageError};
use async_trait::async_trait;
use std::sync::Arc;

/// A table-oriented record store.
///
/// Implementations serialize their own operations and preserve insertion
/// order per table.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Append `record` to `table` and return it as stored.
    async fn save(&self, table: &str, record: Record) -> Result<Record, StorageError>;

    /// Records of `table` matching `query`, oldest first. An unknown table is
    /// empty.
    async fn all(&self, table: &str, query: Option<Record>) -> Result<Vec<Record>, StorageError>;
}

/// Line-oriented user interaction.
#[async_trait]
pub trait Console: Send + Sync {
    /// Show `prompt` without a line break and read one line of input.
    async fn question(&self, prompt: &str) -> Result<String, ConsoleError>;

    /// Show `text` followed by a line break.
    async fn print(&self, text: &str) -> Result<(), ConsoleError>;
}

/// The environment programs are interpreted against.
#[derive(Clone)]
pub struct AppEnv {
    pub store: Arc<dyn Storage>,
    pub console: Arc<dyn Console>,
}

impl AppEnv {
    pub fn new(store: Arc<dyn Storage>, console: Arc<dyn Console>) -> Self {
        Self { store, console }
    }
}

/// Whether every field of `query` is present in `record` with an equal value.
pub fn matches_query(record: &Record, query: Option<&Record>) -> bool {
    query.map_or(true, |query| {
        query
            .iter()
            .all(|(field, expected)| record.get(field) == Some(expected))
    })
}

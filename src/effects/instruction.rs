//! Effect descriptions: inert data naming one side effect each.
//!
//! Instructions come in two closed families. Storage instructions address a
//! table; console instructions talk to the user. An interpreter routes on the
//! family first and then matches the family's variants exhaustively.

use serde::{Deserialize, Serialize};
use std::any::Any;

/// A stored record: a flat mapping from field name to JSON value.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Requests addressed to the record store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StorageOp {
    /// Append `record` to `table`.
    Save { table: String, record: Record },

    /// Read every record of `table`, optionally keeping only those whose
    /// fields equal every field of `query`.
    All {
        table: String,
        query: Option<Record>,
    },
}

/// Requests addressed to the user at the terminal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ConsoleOp {
    /// Show `prompt` and read one line of input.
    Question { prompt: String },

    /// Show `text` on its own line.
    Print { text: String },
}

/// One effect to be performed later by an interpreter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    Storage(StorageOp),
    Console(ConsoleOp),
}

impl Instruction {
    /// Stable name of the variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Storage(StorageOp::Save { .. }) => "save",
            Self::Storage(StorageOp::All { .. }) => "all",
            Self::Console(ConsoleOp::Question { .. }) => "question",
            Self::Console(ConsoleOp::Print { .. }) => "print",
        }
    }

    /// The table a storage instruction addresses.
    pub fn table(&self) -> Option<&str> {
        match self {
            Self::Storage(StorageOp::Save { table, .. } | StorageOp::All { table, .. }) => {
                Some(table.as_str())
            }
            Self::Console(_) => None,
        }
    }
}

impl From<StorageOp> for Instruction {
    fn from(op: StorageOp) -> Self {
        Self::Storage(op)
    }
}

impl From<ConsoleOp> for Instruction {
    fn from(op: ConsoleOp) -> Self {
        Self::Console(op)
    }
}

/// What performing an instruction produced.
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    /// The record as stored by `Save`.
    Saved(Record),
    /// The records returned by `All`, in insertion order.
    Records(Vec<Record>),
    /// The trimmed line answered to `Question`.
    Line(String),
    /// `Print` produces nothing.
    Unit,
}

impl Reply {
    pub(crate) fn into_value(self) -> Box<dyn Any + Send> {
        match self {
            Self::Saved(record) => Box::new(record),
            Self::Records(records) => Box::new(records),
            Self::Line(line) => Box::new(line),
            Self::Unit => Box::new(()),
        }
    }
}

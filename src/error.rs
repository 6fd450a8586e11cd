//! Error types shared by the interpreter, executor and run loop.

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O failed for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode store contents: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Store file '{path}' is not valid: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures raised by a console backend.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The input stream ended; no further answers can be read.
    #[error("Console input closed")]
    InputClosed,
}

/// Failures raised while walking a program.
#[derive(Debug, Error)]
pub enum ProgramError {
    /// An interpreter produced a reply of a different type than the
    /// instruction promised.
    #[error("Interpreter produced a value that is not a `{expected}`")]
    UnexpectedValue { expected: &'static str },
}

/// Failures raised when resolving a route to its program.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("No state registered for route '{name}'")]
    UnregisteredState { name: String },
}

/// Any failure that can end a running program.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Console(#[from] ConsoleError),

    #[error(transparent)]
    Program(#[from] ProgramError),

    #[error(transparent)]
    Router(#[from] RouterError),
}

impl AppError {
    /// Whether this failure is the console running out of input.
    pub fn is_input_closed(&self) -> bool {
        matches!(self, Self::Console(ConsoleError::InputClosed))
    }
}

//! Core navigation types.
//!
//! This module contains the pure part of the navigation state machine:
//! - State definitions via the `State` trait
//! - Bounded, immutable history tracking
//!
//! Nothing here performs I/O.

mod history;
mod state;

pub use history::{StateHistory, StateTransition, DEFAULT_HISTORY_LIMIT};
pub use state::State;

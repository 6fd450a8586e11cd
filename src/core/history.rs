//! Navigation history tracking.
//!
//! A session runs until its input ends, so its history is bounded: once the
//! capacity is reached the oldest transition is evicted for every new one.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Capacity used by [`StateHistory::new`].
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

/// Record of a single navigation from one state to the next.
///
/// # Example
///
/// ```rust
/// use postroom::core::StateTransition;
/// use postroom::router::Route;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: Route::Start,
///     to: Route::CreateAuthor,
///     timestamp: Utc::now(),
///     step: 1,
/// };
/// assert_eq!(transition.step, 1);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state whose program just completed
    pub from: S,
    /// The state that program selected
    pub to: S,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
    /// Session step number, starting at 1
    pub step: u64,
}

/// Ordered, bounded history of navigation transitions.
///
/// History is immutable - `record` returns a new history with the
/// transition added.
///
/// # Example
///
/// ```rust
/// use postroom::core::{StateHistory, StateTransition};
/// use postroom::router::Route;
/// use chrono::Utc;
///
/// let history = StateHistory::with_capacity(2);
/// let history = history.record(StateTransition {
///     from: Route::Start,
///     to: Route::Menu,
///     timestamp: Utc::now(),
///     step: 1,
/// });
/// let history = history.record(StateTransition {
///     from: Route::Menu,
///     to: Route::Write,
///     timestamp: Utc::now(),
///     step: 2,
/// });
/// let history = history.record(StateTransition {
///     from: Route::Write,
///     to: Route::Latest,
///     timestamp: Utc::now(),
///     step: 3,
/// });
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.get_path(), vec![&Route::Menu, &Route::Write, &Route::Latest]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: VecDeque<StateTransition<S>>,
    capacity: usize,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create an empty history holding at most [`DEFAULT_HISTORY_LIMIT`] transitions.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_LIMIT)
    }

    /// Create an empty history holding at most `capacity` transitions.
    ///
    /// A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            transitions: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_LIMIT)),
            capacity,
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// Evicts the oldest transition when the history is full.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        if transitions.len() == self.capacity {
            transitions.pop_front();
        }
        transitions.push_back(transition);
        Self {
            transitions,
            capacity: self.capacity,
        }
    }

    /// States traversed by the retained transitions: the `from` of the
    /// oldest one, then every `to` in order.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the oldest and newest retained transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        match (self.transitions.front(), self.transitions.back()) {
            (Some(first), Some(last)) => last
                .timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .ok(),
            _ => None,
        }
    }

    /// Retained transitions, oldest first.
    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &StateTransition<S>> {
        self.transitions.iter()
    }

    /// Most recent transition.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

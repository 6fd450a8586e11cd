//! Build errors for the router builder.

use thiserror::Error;

/// Errors that can occur when building a router.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial route not specified. Call .initial(route) before .build()")]
    MissingInitialState,

    #[error("No state registered for: {}", .names.join(", "))]
    MissingStates { names: Vec<String> },
}

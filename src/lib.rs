//! Postroom: a terminal menu for authors and posts, built from interpreted
//! effect programs.
//!
//! Every screen of the menu is a pure [`Program`](effects::Program): a value
//! describing which questions to ask, what to print and which records to read
//! or write. Nothing happens until the program is folded through an
//! [`Interpreter`](effects::Interpreter) and the resulting Stillwater effect is
//! run against an environment.
//!
//! # Core Concepts
//!
//! - **Instructions**: inert storage and console requests
//! - **Programs**: lazy `map`/`chain` composition of instructions
//! - **Interpreter + fold**: the only place effects are performed
//! - **Router**: a registry of named states, each yielding the next route
//! - **Session**: the trampolined run loop entering one route after another
//!
//! # Example
//!
//! ```rust
//! use postroom::effects::{print, question, Program};
//! use postroom::router::Route;
//!
//! // A screen that greets the user and returns to the menu.
//! let greet: Program<Route> = question("Name? ")
//!     .chain(|name| print(format!("Hello, {name}")))
//!     .map(|()| Route::Menu);
//!
//! // Building it asked nothing yet.
//! assert!(greet.next_instruction().is_some());
//! ```

pub mod backend;
pub mod config;
pub mod core;
pub mod domain;
pub mod effects;
pub mod error;
pub mod logging;
pub mod router;
pub mod session;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types
pub use backend::AppEnv;
pub use error::AppError;
pub use router::{Route, Router};
pub use session::{Session, SessionEnd};

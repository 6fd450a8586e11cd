//! Core State trait for navigation states.
//!
//! Navigation states are plain values. The trait exposes pure methods for
//! inspecting them; entering a state and running its program is the job of
//! the router and the session, never of the state itself.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for navigation states.
///
/// All methods are pure - no side effects.
///
/// # Required Traits
///
/// - `Clone` + `Eq` + `Hash`: states key the router's registry
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states are recorded in serializable history
///
/// # Example
///
/// ```rust
/// use postroom::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Screen {
///     Boot,
///     Home,
/// }
///
/// impl State for Screen {
///     fn name(&self) -> &str {
///         match self {
///             Self::Boot => "boot",
///             Self::Home => "home",
///         }
///     }
///
///     fn is_selectable(&self) -> bool {
///         matches!(self, Self::Home)
///     }
/// }
///
/// assert_eq!(Screen::Home.name(), "home");
/// assert!(!Screen::Boot.is_selectable());
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// The state's name, as typed by a user and shown in logs.
    fn name(&self) -> &str;

    /// Whether a user may jump to this state by typing its name.
    ///
    /// Default implementation returns `true`.
    fn is_selectable(&self) -> bool {
        true
    }
}

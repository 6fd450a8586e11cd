//! Named navigation routes.

use crate::core::State;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A screen of the menu program.
///
/// # Example
///
/// ```rust
/// use postroom::core::State;
/// use postroom::router::Route;
///
/// assert_eq!(Route::from_name("createAuthor"), Some(Route::CreateAuthor));
/// assert_eq!(Route::CreateAuthor.name(), "createAuthor");
/// assert!(!Route::Start.is_selectable());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Route {
    /// Entered once, to decide whether an author must be created first.
    Start,
    Menu,
    Write,
    Latest,
    CreateAuthor,
    All,
}

impl Route {
    /// Every route, in display order.
    pub const ALL: [Route; 6] = [
        Route::Start,
        Route::Menu,
        Route::Write,
        Route::Latest,
        Route::CreateAuthor,
        Route::All,
    ];

    /// The route called `name`, if any. Names are case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|route| route.name() == name)
    }
}

impl State for Route {
    fn name(&self) -> &str {
        match self {
            Self::Start => "start",
            Self::Menu => "menu",
            Self::Write => "write",
            Self::Latest => "latest",
            Self::CreateAuthor => "createAuthor",
            Self::All => "all",
        }
    }

    fn is_selectable(&self) -> bool {
        !matches!(self, Self::Start)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_round_trips_through_its_name() {
        for route in Route::ALL {
            assert_eq!(Route::from_name(route.name()), Some(route));
        }
    }

    #[test]
    fn unknown_and_miscased_names_are_rejected() {
        assert_eq!(Route::from_name("quit"), None);
        assert_eq!(Route::from_name("Write"), None);
        assert_eq!(Route::from_name("createauthor"), None);
        assert_eq!(Route::from_name(""), None);
    }

    #[test]
    fn only_start_is_hidden_from_the_menu() {
        let selectable: Vec<Route> = Route::ALL
            .into_iter()
            .filter(|route| route.is_selectable())
            .collect();
        assert_eq!(
            selectable,
            vec![
                Route::Menu,
                Route::Write,
                Route::Latest,
                Route::CreateAuthor,
                Route::All
            ]
        );
    }

    #[test]
    fn serde_uses_route_names() {
        let json = serde_json::to_string(&Route::CreateAuthor).unwrap();
        assert_eq!(json, "\"createAuthor\"");
    }
}

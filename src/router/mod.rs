//! Navigation router: a registry from route to program factory.
//!
//! Every state is a factory producing a fresh [`Program`] whose result is the
//! next [`Route`]. States never call each other; they name where to go and
//! the session looks the name up here.

mod builder;
mod error;
mod route;
pub mod states;

pub use builder::RouterBuilder;
pub use error::BuildError;
pub use route::Route;

use crate::core::State;
use crate::effects::Program;
use crate::error::RouterError;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The route among `choices` a user reaches by typing `answer`.
///
/// Names match exactly; routes that are not selectable never match.
pub fn resolve(choices: &[Route], answer: &str) -> Option<Route> {
    choices
        .iter()
        .copied()
        .find(|route| route.is_selectable() && route.name() == answer)
}

/// Factory for a state's program. Called once per visit.
pub type StateFn = Arc<dyn Fn(&Router) -> Program<Route> + Send + Sync>;

/// Table names the states read and write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    pub authors: String,
    pub posts: String,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            authors: "authors".to_string(),
            posts: "posts".to_string(),
        }
    }
}

/// Registry of every route's state, fixed once built.
pub struct Router {
    pub(crate) initial: Route,
    pub(crate) catalog: Catalog,
    pub(crate) states: HashMap<Route, StateFn>,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// The author/post menu: starts at [`Route::Start`] with every state of
    /// [`states`] registered.
    pub fn standard(catalog: Catalog) -> Result<Self, BuildError> {
        Self::builder()
            .initial(Route::Start)
            .catalog(catalog)
            .state(Route::Start, states::start)
            .state(Route::Menu, states::menu)
            .state(Route::Write, states::write)
            .state(Route::Latest, states::latest)
            .state(Route::CreateAuthor, states::create_author)
            .state(Route::All, states::all_posts)
            .build()
    }

    pub fn initial(&self) -> Route {
        self.initial
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Registered routes, in [`Route::ALL`] order.
    pub fn routes(&self) -> Vec<Route> {
        Route::ALL
            .into_iter()
            .filter(|route| self.states.contains_key(route))
            .collect()
    }

    /// Registered routes a user may pick by name.
    pub fn selectable(&self) -> Vec<Route> {
        self.routes()
            .into_iter()
            .filter(|route| route.is_selectable())
            .collect()
    }

    /// The selectable route called `name`.
    pub fn select(&self, name: &str) -> Option<Route> {
        resolve(&self.selectable(), name)
    }

    /// A fresh program for `route`.
    pub fn program(&self, route: Route) -> Result<Program<Route>, RouterError> {
        let factory = self
            .states
            .get(&route)
            .ok_or_else(|| RouterError::UnregisteredState {
                name: route.name().to_string(),
            })?;
        Ok(factory(self))
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("initial", &self.initial)
            .field("catalog", &self.catalog)
            .field("routes", &self.routes())
            .finish()
    }
}

//! Builder for constructing routers.

use crate::core::State;
use crate::effects::Program;
use crate::router::error::BuildError;
use crate::router::{Catalog, Route, Router, StateFn};
use std::collections::HashMap;
use std::sync::Arc;

/// Builder for constructing a [`Router`] with a fluent API.
///
/// Every route must have a state before `build` succeeds, so a program can
/// never navigate to a route that has nothing to run.
pub struct RouterBuilder {
    initial: Option<Route>,
    catalog: Catalog,
    states: HashMap<Route, StateFn>,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self {
            initial: None,
            catalog: Catalog::default(),
            states: HashMap::new(),
        }
    }

    /// Set the route entered first (required).
    pub fn initial(mut self, route: Route) -> Self {
        self.initial = Some(route);
        self
    }

    /// Set the table names states read and write.
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Register the program factory for `route`, replacing any earlier one.
    pub fn state<F>(mut self, route: Route, factory: F) -> Self
    where
        F: Fn(&Router) -> Program<Route> + Send + Sync + 'static,
    {
        self.states.insert(route, Arc::new(factory));
        self
    }

    /// Build the router.
    /// Returns an error if the initial route or any route's state is missing.
    pub fn build(self) -> Result<Router, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let missing: Vec<String> = Route::ALL
            .into_iter()
            .filter(|route| !self.states.contains_key(route))
            .map(|route| route.name().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(BuildError::MissingStates { names: missing });
        }

        Ok(Router {
            initial,
            catalog: self.catalog,
            states: self.states,
        })
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

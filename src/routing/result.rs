//! Outcome of a routing call.

use std::collections::BTreeSet;

use crate::routing::alias::Alias;
use crate::routing::route::Route;

/// Outcome of [`crate::routing::Router::route`].
///
/// The router fills at most one slot: a bound route, a forced alias to
/// redirect to, or the methods allowed on the path. All empty means no match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouterResult {
    route: Option<Route>,
    alias: Option<Alias>,
    allowed_methods: Option<BTreeSet<String>>,
}

impl RouterResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.route.is_none() && self.alias.is_none() && self.allowed_methods.is_none()
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn set_route(&mut self, route: Option<Route>) {
        self.route = route;
    }

    pub fn into_route(self) -> Option<Route> {
        self.route
    }

    pub fn alias(&self) -> Option<&Alias> {
        self.alias.as_ref()
    }

    pub fn set_alias(&mut self, alias: Option<Alias>) {
        self.alias = alias;
    }

    /// Methods allowed on the path, set only when the method was rejected.
    pub fn allowed_methods(&self) -> Option<&BTreeSet<String>> {
        self.allowed_methods.as_ref()
    }

    pub fn set_allowed_methods(&mut self, allowed_methods: Option<BTreeSet<String>>) {
        self.allowed_methods = allowed_methods;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result() {
        let mut result = RouterResult::new();
        assert!(result.is_empty());
        assert!(result.route().is_none());
        assert!(result.allowed_methods().is_none());

        result.set_allowed_methods(Some(BTreeSet::from(["POST".to_string()])));
        assert!(!result.is_empty());

        result.set_allowed_methods(None);
        assert!(result.is_empty());

        let route = Route::new("/", "function").unwrap();
        result.set_route(Some(route.clone()));
        assert_eq!(result.route(), Some(&route));
        assert!(!result.is_empty());

        result.set_alias(Some(Alias::new("/a", "/b").unwrap()));
        assert!(result.route().is_some());
        assert!(result.alias().is_some());
    }
}

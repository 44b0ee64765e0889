//! Registry of routes and aliases.
//!
//! # Responsibilities
//! - Own every registered route, keyed by id, in insertion order
//! - Own every alias, indexed by canonical path and by alias text
//! - Merge other containers, build URLs by route id
//!
//! # Design Decisions
//! - Routes without an id get `i<ordinal>`; the ordinal never reuses an id
//!   still present, even after removals
//! - The two alias indexes are updated together or not at all
//! - The container is read-only during matching

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::reverse::url::Parameters;
use crate::reverse::Url;
use crate::routing::alias::Alias;
use crate::routing::callback::Callback;
use crate::routing::route::Route;
use crate::routing::types::{RouterError, RoutingResult};

/// Container for routes and aliases.
#[derive(Debug, Clone, Default)]
pub struct RouteContainer {
    routes: IndexMap<String, Route>,
    aliases_by_path: IndexMap<String, Alias>,
    /// Alias text → canonical path key of `aliases_by_path`.
    aliases_by_alias: HashMap<String, String>,
    source: Option<String>,
    next_ordinal: usize,
}

impl RouteContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container whose created routes and aliases carry `source`.
    pub fn with_source(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::default()
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn set_source(&mut self, source: Option<String>) {
        self.source = source;
    }

    /// Copies every route and alias of `other` into this container.
    /// Entries of `other` win on id or path collisions.
    pub fn set_route_container(&mut self, other: &RouteContainer) {
        for route in other.routes() {
            self.set_route(route.clone());
        }
        for alias in other.aliases() {
            self.set_alias(alias.clone());
        }

        tracing::debug!(
            routes = other.routes.len(),
            aliases = other.aliases_by_path.len(),
            source = ?other.source,
            "Merged route container"
        );
    }

    /// Create a route carrying this container's source. The route is not registered.
    pub fn create_route<I, S>(
        &self,
        path: &str,
        callback: impl Into<Callback>,
        id: Option<&str>,
        methods: I,
    ) -> RoutingResult<Route>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut route = Route::new(path, callback)?;
        if let Some(id) = id {
            route.set_id(id)?;
        }
        route.set_allowed_methods(methods)?;
        route.set_source(self.source.clone());

        Ok(route)
    }

    pub fn get_route_by_id(&self, id: &str) -> Option<&Route> {
        self.routes.get(id)
    }

    /// First route registered for `path`.
    pub fn get_route_by_path(&self, path: &str) -> Option<&Route> {
        self.routes.values().find(|route| route.path() == path)
    }

    /// Every route, in insertion order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Registers a route, overwriting any route with the same id.
    ///
    /// Returns the id the route is stored under.
    pub fn set_route(&mut self, mut route: Route) -> String {
        let id = match route.id().map(str::to_string) {
            Some(id) => id,
            None => {
                let id = self.next_generated_id();
                // Generated ids are never empty.
                let _ = route.set_id(id.clone());
                tracing::debug!(id = %id, path = %route.path(), "Assigned route id");
                id
            }
        };

        if let Some(previous) = self.routes.insert(id.clone(), route) {
            tracing::warn!(id = %id, previous = %previous.path(), "Route id overwritten");
        } else {
            tracing::debug!(id = %id, "Route registered");
        }

        id
    }

    /// Removes the route registered under the id of `route`.
    pub fn unset_route(&mut self, route: &Route) -> Option<Route> {
        let removed = route.id().and_then(|id| self.routes.shift_remove(id));
        if removed.is_some() {
            tracing::debug!(id = ?route.id(), "Route removed");
        }
        removed
    }

    fn next_generated_id(&mut self) -> String {
        let mut ordinal = self.next_ordinal.max(self.routes.len());
        while self.routes.contains_key(&format!("i{}", ordinal)) {
            ordinal += 1;
        }
        self.next_ordinal = ordinal + 1;

        format!("i{}", ordinal)
    }

    /// Create an alias carrying this container's source. The alias is not registered.
    pub fn create_alias(&self, path: &str, alias: &str, is_forced: bool) -> RoutingResult<Alias> {
        let mut alias = Alias::new(path, alias)?.with_forced(is_forced);
        alias.set_source(self.source.clone());

        Ok(alias)
    }

    pub fn get_alias_by_path(&self, path: &str) -> Option<&Alias> {
        self.aliases_by_path.get(path)
    }

    pub fn get_alias_by_alias(&self, alias: &str) -> Option<&Alias> {
        self.aliases_by_alias
            .get(alias)
            .and_then(|path| self.aliases_by_path.get(path))
    }

    /// Every alias, in insertion order.
    pub fn aliases(&self) -> impl Iterator<Item = &Alias> {
        self.aliases_by_path.values()
    }

    /// Registers an alias, replacing any alias sharing its path or its alias text.
    pub fn set_alias(&mut self, alias: Alias) {
        if let Some(previous) = self.aliases_by_path.get(alias.path()) {
            let previous_alias = previous.alias().to_string();
            self.aliases_by_alias.remove(&previous_alias);
        }
        if let Some(previous_path) = self.aliases_by_alias.remove(alias.alias()) {
            self.aliases_by_path.shift_remove(&previous_path);
        }

        tracing::debug!(
            path = %alias.path(),
            alias = %alias.alias(),
            forced = alias.is_forced(),
            "Alias registered"
        );

        self.aliases_by_alias
            .insert(alias.alias().to_string(), alias.path().to_string());
        self.aliases_by_path.insert(alias.path().to_string(), alias);
    }

    /// Removes the alias registered for the path of `alias`.
    pub fn unset_alias(&mut self, alias: &Alias) -> Option<Alias> {
        let removed = self.aliases_by_path.shift_remove(alias.path())?;

        if self.aliases_by_alias.get(removed.alias()).map(String::as_str) == Some(removed.path()) {
            self.aliases_by_alias.remove(removed.alias());
        }
        tracing::debug!(path = %removed.path(), "Alias removed");

        Some(removed)
    }

    /// Builds the URL of the route registered under `id`.
    pub fn get_url(
        &self,
        base_url: &str,
        id: &str,
        arguments: &Parameters,
        query_parameters: &Parameters,
    ) -> RoutingResult<Url> {
        let route = self
            .get_route_by_id(id)
            .ok_or_else(|| RouterError::RouteNotFound(id.to_string()))?;

        route.url(base_url, arguments, query_parameters)
    }

    /// Renders `url`, replacing its path with the forced alias registered for it.
    pub fn get_url_alias(&self, url: &Url) -> String {
        let path = url.parsed_path();
        let path = match self.get_alias_by_path(&path) {
            Some(alias) if alias.is_forced() => alias.alias().to_string(),
            _ => path,
        };

        let query = url.query_string();
        if query.is_empty() {
            format!("{}{}", url.base_url(), path)
        } else {
            format!("{}{}?{}", url.base_url(), path, query)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn route(path: &str, id: Option<&str>) -> Route {
        let route = Route::new(path, "callback").unwrap();
        match id {
            Some(id) => route.with_id(id).unwrap(),
            None => route,
        }
    }

    #[test]
    fn test_set_route() {
        let mut container = RouteContainer::new();
        assert_eq!(container.route_count(), 0);

        let id = container.set_route(route("/path", Some("id")));
        assert_eq!(id, "id");
        assert_eq!(container.get_route_by_id("id").map(Route::path), Some("/path"));
    }

    #[test]
    fn test_generated_ids() {
        let mut container = RouteContainer::new();
        assert_eq!(container.set_route(route("/a", None)), "i0");
        assert_eq!(container.set_route(route("/b", Some("named"))), "named");
        assert_eq!(container.set_route(route("/c", None)), "i2");
    }

    #[test]
    fn test_generated_ids_do_not_collide_after_removal() {
        let mut container = RouteContainer::new();
        container.set_route(route("/a", None));
        container.set_route(route("/b", None));

        let first = container.get_route_by_id("i0").cloned().unwrap();
        container.unset_route(&first);

        let id = container.set_route(route("/c", None));
        assert_eq!(id, "i2");
        assert_eq!(container.route_count(), 2);
        assert_eq!(container.get_route_by_id("i1").map(Route::path), Some("/b"));
    }

    #[test]
    fn test_set_and_unset_route() {
        let mut container = RouteContainer::new();
        let named = route("/path", Some("id"));

        container.set_route(route("/path", None));
        container.set_route(named.clone());
        assert_eq!(container.route_count(), 2);
        assert_eq!(container.get_route_by_id("id"), Some(&named));

        assert!(container.unset_route(&named).is_some());
        assert_eq!(container.route_count(), 1);
        assert!(container.get_route_by_id("id").is_none());
        assert!(container.unset_route(&named).is_none());
    }

    #[test]
    fn test_set_route_container() {
        let mut source = RouteContainer::new();
        source.set_route(route("/path", Some("id")));
        source.set_route(route("/path2", Some("id2")));
        source.set_alias(Alias::new("/path", "/p").unwrap());

        let mut container = RouteContainer::new();
        container.set_route(Route::new("/old", "other").unwrap().with_id("id2").unwrap());
        container.set_route_container(&source);

        let ids: Vec<&str> = container.routes().filter_map(Route::id).collect();
        assert_eq!(ids, vec!["id2", "id"]);
        assert_eq!(container.get_route_by_id("id2").map(Route::path), Some("/path2"));
        assert!(container.get_alias_by_alias("/p").is_some());
    }

    #[test]
    fn test_set_and_unset_alias() {
        let mut container = RouteContainer::new();
        assert_eq!(container.aliases().count(), 0);

        let alias = Alias::new("/path", "/alias").unwrap();
        container.set_alias(Alias::new("/path2", "/alias2").unwrap());
        container.set_alias(alias.clone());

        assert_eq!(container.aliases().count(), 2);
        assert_eq!(container.get_alias_by_path("/path"), Some(&alias));
        assert_eq!(container.get_alias_by_alias("/alias"), Some(&alias));

        container.unset_alias(&alias);
        assert_eq!(container.aliases().count(), 1);
        assert!(container.get_alias_by_path("/path").is_none());
        assert!(container.get_alias_by_alias("/alias").is_none());
        assert!(container.get_alias_by_alias("/alias2").is_some());
    }

    #[test]
    fn test_alias_indexes_stay_in_sync() {
        let mut container = RouteContainer::new();
        container.set_alias(Alias::new("/path", "/a").unwrap());
        container.set_alias(Alias::new("/path", "/b").unwrap());

        assert!(container.get_alias_by_alias("/a").is_none());
        assert_eq!(container.get_alias_by_alias("/b").map(Alias::path), Some("/path"));

        container.set_alias(Alias::new("/other", "/b").unwrap());
        assert!(container.get_alias_by_path("/path").is_none());
        assert_eq!(container.aliases().count(), 1);
    }

    #[test]
    fn test_source_is_inherited() {
        let mut container = RouteContainer::with_source("routes.toml");
        assert_eq!(container.source(), Some("routes.toml"));

        let route = container
            .create_route("/", "callback", Some("home"), ["GET"])
            .unwrap();
        assert_eq!(route.source(), Some("routes.toml"));
        assert!(route.is_method_allowed("GET"));

        let alias = container.create_alias("/path", "/alias/path", true).unwrap();
        assert_eq!(alias.source(), Some("routes.toml"));
        assert!(alias.is_forced());

        container.set_source(Some("source_string".into()));
        assert_eq!(container.source(), Some("source_string"));
    }

    #[test]
    fn test_get_route_by_path() {
        let mut container = RouteContainer::new();
        assert!(container.get_route_by_path("/").is_none());

        container.set_route(route("/path", None));
        assert!(container.get_route_by_path("/path").is_some());
    }

    #[test]
    fn test_get_url() {
        let mut container = RouteContainer::new();
        let err = container
            .get_url("http://localhost", "123", &Parameters::new(), &Parameters::new())
            .unwrap_err();
        assert_eq!(err, RouterError::RouteNotFound("123".into()));

        container.set_route(route("/data/%id%", Some("data")));
        let arguments: Parameters = [("id".to_string(), json!(5))].into_iter().collect();
        let url = container
            .get_url("http://localhost", "data", &arguments, &Parameters::new())
            .unwrap();
        assert_eq!(url.to_string(), "http://localhost/data/5");
    }

    #[test]
    fn test_get_url_alias() {
        let mut container = RouteContainer::new();
        let url = Url::new("http://localhost", "/data/123/");
        assert_eq!(container.get_url_alias(&url), "http://localhost/data/123");

        container.set_alias(Alias::new("/data/123", "/d").unwrap());
        assert_eq!(container.get_url_alias(&url), "http://localhost/data/123");

        container.set_alias(Alias::new("/data/123", "/d").unwrap().with_forced(true));
        let url = url.with_query_parameter("page", 2);
        assert_eq!(container.get_url_alias(&url), "http://localhost/d?page=2");
    }
}

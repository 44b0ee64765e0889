//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Normalize the request path and resolve aliases
//! - Scan registered routes for structural matches
//! - Rank matches by specificity, then admit by method
//! - Return a bound route, a redirect alias, allowed methods or nothing
//!
//! # Design Decisions
//! - Stateless between calls; never mutates registered routes
//! - O(routes × tokens) scan (acceptable for typical route counts)
//! - Fewer bound arguments means more literal segments, which wins
//! - Ties keep the earliest registered route that allows the method

use std::collections::BTreeSet;

use crate::routing::arguments::Arguments;
use crate::routing::callback::Callback;
use crate::routing::container::RouteContainer;
use crate::routing::path::{normalize_request_path, path_tokens, Token};
use crate::routing::result::RouterResult;
use crate::routing::route::Route;

/// Maps a request path to a route of its container.
#[derive(Debug, Clone, Default)]
pub struct Router {
    container: RouteContainer,
    default_callback: Option<Callback>,
}

impl Router {
    /// Create a router over `container`.
    pub fn new(container: RouteContainer) -> Self {
        Self {
            container,
            default_callback: None,
        }
    }

    pub fn with_default_callback(mut self, callback: impl Into<Callback>) -> Self {
        self.default_callback = Some(callback.into());
        self
    }

    pub fn container(&self) -> &RouteContainer {
        &self.container
    }

    /// Mutable access for registration. Must not overlap with matching.
    pub fn container_mut(&mut self) -> &mut RouteContainer {
        &mut self.container
    }

    pub fn set_container(&mut self, container: RouteContainer) {
        self.container = container;
    }

    pub fn default_callback(&self) -> Option<&Callback> {
        self.default_callback.as_ref()
    }

    /// Callback served on `/` when no route matches it.
    pub fn set_default_callback(&mut self, callback: Option<Callback>) {
        self.default_callback = callback;
    }

    /// Routes a request.
    ///
    /// Never fails: an empty result means not found, a result carrying only
    /// allowed methods means the method is not allowed, a result carrying an
    /// alias means redirect to the alias.
    pub fn route(&self, method: &str, path: &str, base_url: Option<&str>) -> RouterResult {
        let mut path = normalize_request_path(path);
        let mut result = RouterResult::new();

        let mut via_alias = false;
        if let Some(alias) = self.container.get_alias_by_alias(&path) {
            tracing::trace!(alias = %path, path = %alias.path(), "Resolved alias");
            path = alias.path().to_string();
            via_alias = true;
        }

        if !via_alias {
            if let Some(alias) = self.container.get_alias_by_path(&path) {
                if alias.is_forced() {
                    tracing::debug!(
                        method,
                        path = %path,
                        alias = %alias.alias(),
                        outcome = "redirect",
                        "Routed request"
                    );
                    result.set_alias(Some(alias.clone()));
                    return result;
                }
            }
        }

        let request_tokens = path_tokens(&path);
        let candidates = self.most_specific_matches(&request_tokens, base_url);

        if candidates.is_empty() {
            if path == "/" {
                if let Some(callback) = &self.default_callback {
                    if let Ok(route) = Route::new("/", callback.clone()) {
                        tracing::debug!(
                            method,
                            path = %path,
                            outcome = "default",
                            "Routed request"
                        );
                        result.set_route(Some(route));
                        return result;
                    }
                }
            }

            tracing::debug!(method, path = %path, outcome = "not_found", "Routed request");
            return result;
        }

        if let Some((route, arguments)) = candidates
            .iter()
            .find(|(route, _)| route.is_method_allowed(method))
        {
            tracing::debug!(
                method,
                path = %path,
                route = ?route.id(),
                arguments = arguments.len(),
                outcome = "matched",
                "Routed request"
            );
            result.set_route(Some(route.bind(arguments.clone())));
            return result;
        }

        let allowed: BTreeSet<String> = candidates
            .iter()
            .filter_map(|(route, _)| route.allowed_methods())
            .flatten()
            .cloned()
            .collect();

        tracing::debug!(
            method,
            path = %path,
            allowed = ?allowed,
            outcome = "method_not_allowed",
            "Routed request"
        );
        result.set_allowed_methods(Some(allowed));
        result
    }

    /// Structural matches with the fewest bound arguments, in registration order.
    fn most_specific_matches<'a>(
        &'a self,
        request_tokens: &[&str],
        base_url: Option<&str>,
    ) -> Vec<(&'a Route, Arguments)> {
        let mut best: Vec<(&Route, Arguments)> = Vec::new();

        for route in self.container.routes() {
            if !route.accepts_base_url(base_url) {
                continue;
            }

            let Some(arguments) = match_tokens(route, request_tokens) else {
                continue;
            };

            tracing::trace!(
                route = ?route.id(),
                path = %route.path(),
                arguments = arguments.len(),
                "Candidate route"
            );

            match best.first().map(|(_, current)| current.len()) {
                Some(current) if arguments.len() > current => {}
                Some(current) if arguments.len() == current => best.push((route, arguments)),
                _ => {
                    best.clear();
                    best.push((route, arguments));
                }
            }
        }

        best
    }
}

/// Matches request tokens against the tokens of `route`.
///
/// Returns the bound arguments, or `None` when the route does not match.
fn match_tokens(route: &Route, request_tokens: &[&str]) -> Option<Arguments> {
    let route_tokens = route.tokens();
    if request_tokens.len() < route_tokens.len() {
        return None;
    }

    let mut arguments = Arguments::new();
    for (token, segment) in route_tokens.iter().zip(request_tokens) {
        match token {
            Token::Parameter(name) => arguments.insert(name.as_str(), *segment),
            Token::Literal(literal) if literal == segment => {}
            Token::Literal(_) => return None,
        }
    }

    let tail = &request_tokens[route_tokens.len()..];
    if !route.is_dynamic() {
        return tail.is_empty().then_some(arguments);
    }

    for segment in tail {
        arguments.push(*segment);
    }

    Some(arguments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::alias::Alias;

    fn router_with(routes: Vec<Route>) -> Router {
        let mut container = RouteContainer::new();
        for route in routes {
            container.set_route(route);
        }
        Router::new(container)
    }

    #[test]
    fn test_match_tokens() {
        let route = Route::new("/path1/%var1%", "callback").unwrap();
        assert!(match_tokens(&route, &["path1"]).is_none());
        assert!(match_tokens(&route, &["path1", "foo", "bar"]).is_none());
        assert!(match_tokens(&route, &["path2", "foo"]).is_none());

        let arguments = match_tokens(&route, &["path1", "foo"]).unwrap();
        assert_eq!(arguments.get("var1"), Some("foo"));
    }

    #[test]
    fn test_match_tokens_dynamic_tail() {
        let route = Route::new("/path/%var1%/to", "callback").unwrap().with_dynamic(true);
        let arguments = match_tokens(&route, &["path", "value1", "to", "value2"]).unwrap();

        let keys: Vec<String> = arguments.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["var1", "0"]);
        assert_eq!(arguments.get_index(0), Some("value2"));
    }

    #[test]
    fn test_empty_container() {
        let router = Router::default();
        assert!(router.default_callback().is_none());
        assert!(router.route("GET", "/path", None).is_empty());
        assert!(router.route("GET", "?only_query", None).is_empty());
    }

    #[test]
    fn test_registered_route_stays_unbound() {
        let router = router_with(vec![Route::new("/path/%id%", "callback").unwrap()]);

        let result = router.route("GET", "/path/7", None);
        assert_eq!(result.route().and_then(|r| r.argument("id")), Some("7"));
        assert!(router
            .container()
            .routes()
            .all(|route| route.arguments().is_empty()));
    }

    #[test]
    fn test_forced_alias_is_not_applied_to_its_own_short_form() {
        let mut router = router_with(vec![Route::new("/path/to/%action%", "callback").unwrap()]);
        router
            .container_mut()
            .set_alias(Alias::new("/path/to/contact", "/ptc").unwrap().with_forced(true));

        let result = router.route("GET", "/ptc", None);
        assert!(result.alias().is_none());
        assert_eq!(result.route().and_then(|r| r.argument("action")), Some("contact"));
    }

    #[test]
    fn test_alias_registered_without_slashes() {
        let mut router = router_with(vec![Route::new("/path/to/%action%", "callback").unwrap()]);
        router
            .container_mut()
            .set_alias(Alias::new("path/to/contact/", "ptc/").unwrap().with_forced(true));

        let result = router.route("GET", "/path/to/contact", None);
        assert!(result.route().is_none());
        assert_eq!(result.alias().map(|a| a.alias()), Some("/ptc"));

        let result = router.route("GET", "/ptc", None);
        assert_eq!(result.route().and_then(|r| r.argument("action")), Some("contact"));
    }

    #[test]
    fn test_more_specific_route_without_method_reports_its_methods() {
        let router = router_with(vec![
            Route::new("/a/%x%", "generic").unwrap().with_allowed_methods(["GET"]).unwrap(),
            Route::new("/a/b", "literal").unwrap().with_allowed_methods(["POST"]).unwrap(),
        ]);

        let result = router.route("GET", "/a/b", None);
        assert!(result.route().is_none());
        let allowed: Vec<&String> = result.allowed_methods().unwrap().iter().collect();
        assert_eq!(allowed, vec!["POST"]);

        let result = router.route("GET", "/a/c", None);
        assert_eq!(result.route().and_then(|r| r.argument("x")), Some("c"));
    }
}

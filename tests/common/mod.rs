//! Shared fixtures for integration tests.

#![allow(dead_code)]

use path_router::{Route, RouteContainer, Router};

/// Route for `path` with a plain function callback.
pub fn route(path: &str) -> Route {
    Route::new(path, "callback").unwrap()
}

/// Route for `path` restricted to `methods`.
pub fn route_with_methods(path: &str, methods: &[&str]) -> Route {
    route(path).with_allowed_methods(methods).unwrap()
}

/// Router over a container holding `routes`, registered in order.
pub fn router_with(routes: Vec<Route>) -> Router {
    let mut container = RouteContainer::new();
    for route in routes {
        container.set_route(route);
    }
    Router::new(container)
}

/// A route table in TOML exercising every definition field.
pub const ROUTE_TABLE: &str = r#"
default_callback = "HomeController::index"
base_url = "http://example.com"

[observability]
log_level = "debug"

[[routes]]
id = "user.show"
path = "/users/%id%"
callback = "UserController::show"
methods = ["get"]

[[routes]]
id = "user.update"
path = "/users/%id%"
callback = "UserController::update"
methods = ["put", "patch"]

[[routes]]
id = "files"
path = "/files"
callback = "serve_files"
dynamic = true

[[routes]]
id = "contact"
path = "/pages/%page%"
callback = "PageController::show"
locale = "en"
permissions = ["pages.view"]

[routes.arguments]
layout = "wide"
cache = 60

[[aliases]]
path = "/pages/contact"
alias = "/contact"
forced = true
"#;

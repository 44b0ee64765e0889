//! Path routing library.
//!
//! Resolves `(method, path, base URL)` against a table of route patterns and
//! builds URLs back from route ids.

pub mod config;
pub mod observability;
pub mod reverse;
pub mod routing;

pub use config::schema::RouterConfig;
pub use reverse::Url;
pub use routing::{Alias, Route, RouteContainer, Router, RouterError, RouterResult, SharedRouter};

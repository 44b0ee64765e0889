//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (method, path, base URL)
//!     → path.rs (strip query, normalize, tokenize)
//!     → container.rs (alias lookup, registered routes)
//!     → router.rs (structural match, specificity, method admission)
//!     → Return: RouterResult (route | alias | allowed methods | empty)
//!
//! Route registration (before or between requests):
//!     loader / host code
//!     → route.rs, alias.rs (validated definitions)
//!     → container.rs (keyed by id, alias indexes)
//!     → shared.rs (optional snapshot swap)
//! ```
//!
//! # Design Decisions
//! - Registered routes are immutable during matching; a match binds a clone
//! - Validation errors surface at registration, matching never fails
//! - Deterministic: same container and request always yield the same result

pub mod alias;
pub mod arguments;
pub mod callback;
pub mod container;
pub mod path;
pub mod result;
pub mod route;
pub mod router;
pub mod shared;
pub mod types;

pub use alias::Alias;
pub use arguments::{ArgumentKey, Arguments};
pub use callback::Callback;
pub use container::RouteContainer;
pub use result::RouterResult;
pub use route::Route;
pub use router::Router;
pub use shared::SharedRouter;
pub use types::{RouterError, RoutingResult};

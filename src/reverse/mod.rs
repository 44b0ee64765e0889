//! Reverse routing: turning a path template back into a URL.
//!
//! # Data Flow
//! ```text
//! Route id + arguments + query parameters
//!     → container.rs (lookup by id)
//!     → Route::url (strict argument check)
//!     → url.rs (Url value: base + substituted path)
//!     → query.rs (sorted, nested query string)
//!     → String via Display
//! ```
//!
//! # Design Decisions
//! - A `Url` stays mutable; rendering always reflects the current state
//! - Query keys are sorted at every nesting level for stable output

pub mod query;
pub mod url;

pub use self::url::Url;

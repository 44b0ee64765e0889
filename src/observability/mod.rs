//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing / config produce:
//!     → tracing events (registration, id assignment, routing outcomes)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr), installed by the binary
//! ```
//!
//! # Design Decisions
//! - Library code only emits events, it never installs a subscriber
//! - Routing outcomes are logged at debug, candidates at trace

pub mod logging;

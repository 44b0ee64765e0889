//! Router snapshots shared across threads.
//!
//! # Design Decisions
//! - Readers load the current snapshot without locking
//! - Writers copy the current router, modify the copy, then swap it in
//! - Writers must be serialized by the caller; concurrent `update` calls
//!   may lose one of the modifications

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::routing::result::RouterResult;
use crate::routing::router::Router;

/// A router that can be replaced while requests are being routed.
#[derive(Clone)]
pub struct SharedRouter {
    inner: Arc<ArcSwap<Router>>,
}

impl SharedRouter {
    pub fn new(router: Router) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(router)),
        }
    }

    /// The router currently in effect.
    pub fn snapshot(&self) -> Arc<Router> {
        self.inner.load_full()
    }

    /// Routes a request against the current snapshot.
    pub fn route(&self, method: &str, path: &str, base_url: Option<&str>) -> RouterResult {
        self.inner.load().route(method, path, base_url)
    }

    /// Installs a new router. In-flight requests keep the old snapshot.
    pub fn replace(&self, router: Router) {
        self.inner.store(Arc::new(router));
        tracing::info!(routes = self.inner.load().container().route_count(), "Router replaced");
    }

    /// Applies `f` to a copy of the current router and installs the copy.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Router),
    {
        let mut router = Router::clone(&self.inner.load());
        f(&mut router);
        self.replace(router);
    }
}

impl std::fmt::Debug for SharedRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedRouter")
            .field("routes", &self.inner.load().container().route_count())
            .finish()
    }
}

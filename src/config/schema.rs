//! Configuration schema definitions.
//!
//! This module defines the route table file format. All types derive Serde
//! traits for deserialization from TOML.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::routing::types::RoutingResult;
use crate::routing::{RouteContainer, Router};

/// Root configuration for a route table.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Callback served on `/` when no route matches it.
    pub default_callback: Option<String>,

    /// Base URL used when generating URLs.
    pub base_url: String,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Route definitions.
    pub routes: Vec<RouteConfig>,

    /// Alias definitions.
    pub aliases: Vec<AliasConfig>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            default_callback: None,
            base_url: "http://localhost".to_string(),
            observability: ObservabilityConfig::default(),
            routes: Vec::new(),
            aliases: Vec::new(),
        }
    }
}

/// A single route definition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Path pattern, e.g. `/users/%id%`.
    pub path: String,

    /// `function` or `Type::method`.
    pub callback: String,

    /// Route id; generated when omitted.
    #[serde(default)]
    pub id: Option<String>,

    /// Allowed methods; empty allows every method.
    #[serde(default)]
    pub methods: Vec<String>,

    /// Accept trailing segments as positional arguments.
    #[serde(default)]
    pub dynamic: bool,

    /// Restrict the route to one base URL.
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub locale: Option<String>,

    #[serde(default)]
    pub permissions: Vec<String>,

    /// Predefined arguments handed to the callback.
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

/// A single alias definition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AliasConfig {
    /// Canonical path.
    pub path: String,

    /// Short form.
    pub alias: String,

    /// Redirect requests for the canonical path to the alias.
    #[serde(default)]
    pub forced: bool,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl RouterConfig {
    /// Builds a container whose routes and aliases carry `source`.
    pub fn build_container(&self, source: Option<&str>) -> RoutingResult<RouteContainer> {
        let mut container = match source {
            Some(source) => RouteContainer::with_source(source),
            None => RouteContainer::new(),
        };

        for definition in &self.routes {
            let mut route = container.create_route(
                &definition.path,
                definition.callback.as_str(),
                definition.id.as_deref(),
                &definition.methods,
            )?;
            route.set_dynamic(definition.dynamic);
            route.set_base_url(definition.base_url.clone());
            route.set_locale(definition.locale.clone());
            route.set_permissions(definition.permissions.iter().cloned());
            route.set_predefined_arguments(definition.arguments.clone().into_iter().collect());

            container.set_route(route);
        }

        for definition in &self.aliases {
            let alias =
                container.create_alias(&definition.path, &definition.alias, definition.forced)?;
            container.set_alias(alias);
        }

        tracing::info!(
            routes = container.route_count(),
            aliases = self.aliases.len(),
            source = ?source,
            "Route table built"
        );

        Ok(container)
    }

    /// Builds a router over the configured routes and default callback.
    pub fn build_router(&self, source: Option<&str>) -> RoutingResult<Router> {
        let mut router = Router::new(self.build_container(source)?);
        router.set_default_callback(self.default_callback.as_deref().map(Into::into));

        Ok(router)
    }
}

//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route paths against the path grammar
//! - Detect duplicate route ids and conflicting aliases
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::routing::path::{is_valid_path, normalize_route_path};

/// A single semantic problem in a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route {index}: path {path:?} is not a valid HTTP path")]
    InvalidPath { index: usize, path: String },

    #[error("route {index}: callback is empty")]
    EmptyCallback { index: usize },

    #[error("route {index}: allowed method {method:?} is empty")]
    InvalidMethod { index: usize, method: String },

    #[error("route {index}: id is empty")]
    EmptyId { index: usize },

    #[error("route id {0:?} is defined more than once")]
    DuplicateRouteId(String),

    #[error("alias {index}: path and alias must not be empty")]
    EmptyAlias { index: usize },

    #[error("path {0:?} has more than one alias")]
    DuplicateAliasPath(String),

    #[error("alias {0:?} is defined more than once")]
    DuplicateAlias(String),
}

/// Validates a configuration, collecting every error.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for (index, route) in config.routes.iter().enumerate() {
        if route.path.is_empty() || !is_valid_path(&route.path) {
            errors.push(ValidationError::InvalidPath {
                index,
                path: route.path.clone(),
            });
        }
        if route.callback.trim().is_empty() {
            errors.push(ValidationError::EmptyCallback { index });
        }
        for method in &route.methods {
            if method.trim().is_empty() {
                errors.push(ValidationError::InvalidMethod {
                    index,
                    method: method.clone(),
                });
            }
        }
        match route.id.as_deref() {
            Some("") => errors.push(ValidationError::EmptyId { index }),
            Some(id) if !ids.insert(id) => {
                errors.push(ValidationError::DuplicateRouteId(id.to_string()))
            }
            _ => {}
        }
    }

    let mut paths = HashSet::new();
    let mut aliases = HashSet::new();
    for (index, alias) in config.aliases.iter().enumerate() {
        if alias.path.is_empty() || alias.alias.is_empty() {
            errors.push(ValidationError::EmptyAlias { index });
            continue;
        }
        let path = normalize_route_path(&alias.path);
        if !paths.insert(path.clone()) {
            errors.push(ValidationError::DuplicateAliasPath(path));
        }
        let short = normalize_route_path(&alias.alias);
        if !aliases.insert(short.clone()) {
            errors.push(ValidationError::DuplicateAlias(short));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

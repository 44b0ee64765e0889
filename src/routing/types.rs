//! Routing error definitions.

use thiserror::Error;

/// Errors raised while registering routes or generating URLs.
///
/// Matching itself never fails; see [`crate::routing::Router::route`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// The route path is empty or contains characters outside the HTTP path grammar.
    #[error("invalid route path {0:?}: not a valid HTTP path")]
    InvalidPath(String),

    /// An explicit route id was empty.
    #[error("invalid id for route {path}: id is empty")]
    InvalidId { path: String },

    /// An allowed method entry was empty.
    #[error("invalid allowed method for route {path}: {method:?}")]
    InvalidAllowedMethod { path: String, method: String },

    /// A parameter token had no value when building a URL.
    #[error("could not get the URL of route {path}: argument {name} is not set")]
    MissingArgument { path: String, name: String },

    /// A parameter token was bound to a list or a table.
    #[error("could not get the URL of route {path}: argument {name} is not a scalar value")]
    InvalidArgumentType { path: String, name: String },

    /// No route is registered under the requested id.
    #[error("could not get the URL for route {0}: no route found for the provided id")]
    RouteNotFound(String),

    /// The path or alias side of an alias was empty.
    #[error("invalid alias: {0} is empty")]
    InvalidAlias(&'static str),
}

/// Result type for routing operations.
pub type RoutingResult<T> = Result<T, RouterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_culprit() {
        let err = RouterError::MissingArgument {
            path: "/data/%id%".into(),
            name: "id".into(),
        };
        assert_eq!(
            err.to_string(),
            "could not get the URL of route /data/%id%: argument id is not set"
        );

        let err = RouterError::RouteNotFound("123".into());
        assert!(err.to_string().contains("123"));
    }
}

//! Short aliases for canonical paths.

use crate::routing::path::normalize_route_path;
use crate::routing::types::{RouterError, RoutingResult};

/// Maps a canonical path to a short alias path.
///
/// A forced alias must never be served under its canonical path; requesting
/// the canonical path yields a redirect to the alias instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    path: String,
    alias: String,
    is_forced: bool,
    source: Option<String>,
}

impl Alias {
    /// Create an alias. Both sides must be non-empty and are stored normalized.
    pub fn new(path: impl Into<String>, alias: impl Into<String>) -> RoutingResult<Self> {
        let path = path.into();
        let alias = alias.into();

        if path.is_empty() {
            return Err(RouterError::InvalidAlias("path"));
        }
        if alias.is_empty() {
            return Err(RouterError::InvalidAlias("alias"));
        }

        Ok(Self {
            path: normalize_route_path(&path),
            alias: normalize_route_path(&alias),
            is_forced: false,
            source: None,
        })
    }

    pub fn with_forced(mut self, is_forced: bool) -> Self {
        self.is_forced = is_forced;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn is_forced(&self) -> bool {
        self.is_forced
    }

    pub fn set_forced(&mut self, is_forced: bool) {
        self.is_forced = is_forced;
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn set_source(&mut self, source: Option<String>) {
        self.source = source;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias() {
        let alias = Alias::new("/path/to/contact", "/ptc").unwrap();
        assert_eq!(alias.path(), "/path/to/contact");
        assert_eq!(alias.alias(), "/ptc");
        assert!(!alias.is_forced());
        assert!(alias.with_forced(true).is_forced());
    }

    #[test]
    fn test_sides_are_normalized() {
        let alias = Alias::new("path/to/contact/", "ptc/").unwrap();
        assert_eq!(alias.path(), "/path/to/contact");
        assert_eq!(alias.alias(), "/ptc");
    }

    #[test]
    fn test_empty_sides_are_rejected() {
        assert_eq!(Alias::new("", "/a").unwrap_err(), RouterError::InvalidAlias("path"));
        assert_eq!(Alias::new("/p", "").unwrap_err(), RouterError::InvalidAlias("alias"));
    }
}

//! Modifiable URL.
//!
//! # Responsibilities
//! - Hold a base URL, a path template and its arguments
//! - Hold query parameters, including nested tables
//! - Render `base + path + ?query` on every `to_string()`
//!
//! # Design Decisions
//! - Tolerant rendering: a parameter token without a scalar argument is
//!   emitted verbatim as `%name%` (strict generation lives in `Route::url`)
//! - Setting a query parameter to null removes it

use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;

use crate::reverse::query;
use crate::routing::path::{normalize_route_path, tokenize, Token};

/// Argument or query parameter values keyed by name.
pub type Parameters = IndexMap<String, Value>;

/// Separator placed between query pairs unless overridden.
pub const DEFAULT_QUERY_SEPARATOR: &str = "&";

/// A URL under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Url {
    base_url: String,
    path: String,
    arguments: Parameters,
    query_parameters: Parameters,
    query_separator: String,
}

impl Url {
    /// Create a URL for `path` below `base_url`.
    pub fn new(base_url: impl Into<String>, path: &str) -> Self {
        Self {
            base_url: base_url.into(),
            path: normalize_route_path(path),
            arguments: IndexMap::new(),
            query_parameters: IndexMap::new(),
            query_separator: DEFAULT_QUERY_SEPARATOR.to_string(),
        }
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_argument(name, value);
        self
    }

    pub fn with_arguments<K, V, I>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (name, value) in arguments {
            self.set_argument(name, value);
        }
        self
    }

    pub fn with_query_parameter(
        mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.set_query_parameter(name, value);
        self
    }

    pub fn with_query_parameters<K, V, I>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (name, value) in parameters {
            self.set_query_parameter(name, value);
        }
        self
    }

    pub fn with_query_separator(mut self, separator: impl Into<String>) -> Self {
        self.query_separator = separator.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The path template, with `%name%` tokens intact.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The path with every bound argument substituted.
    pub fn parsed_path(&self) -> String {
        let mut parsed = String::new();

        for token in tokenize(&self.path) {
            parsed.push('/');
            match &token {
                Token::Literal(literal) => parsed.push_str(literal),
                Token::Parameter(name) => {
                    match self.arguments.get(name).and_then(query::scalar_to_string) {
                        Some(value) => parsed.push_str(&query::encode(&value)),
                        None => parsed.push_str(&token.to_string()),
                    }
                }
            }
        }

        parsed
    }

    /// The serialized query string without `?`, empty when no parameter is set.
    pub fn query_string(&self) -> String {
        query::serialize(&self.query_parameters, &self.query_separator)
    }

    pub fn set_argument(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.arguments.insert(name.into(), value.into());
    }

    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name)
    }

    pub fn arguments(&self) -> &Parameters {
        &self.arguments
    }

    /// Sets a query parameter; a null value removes it.
    pub fn set_query_parameter(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        match value.into() {
            Value::Null => {
                self.query_parameters.shift_remove(&name);
            }
            value => {
                self.query_parameters.insert(name, value);
            }
        }
    }

    pub fn query_parameter(&self, name: &str) -> Option<&Value> {
        self.query_parameters.get(name)
    }

    pub fn query_parameters(&self) -> &Parameters {
        &self.query_parameters
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base_url, self.parsed_path())?;

        let query = self.query_string();
        if !query.is_empty() {
            write!(f, "?{}", query)?;
        }

        Ok(())
    }
}

impl From<Url> for String {
    fn from(url: Url) -> Self {
        url.to_string()
    }
}

//! Route definition.
//!
//! # Responsibilities
//! - Validate and normalize the route path
//! - Hold the tokenized pattern, callback and metadata
//! - Restrict allowed methods and base URL scope
//! - Generate URLs strictly from arguments
//!
//! # Design Decisions
//! - Path and tokens are fixed at construction
//! - `None` allowed methods means every method is allowed
//! - A registered route is never bound in place; matching binds a clone

use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;

use crate::reverse::query::scalar_to_string;
use crate::reverse::url::Parameters;
use crate::reverse::Url;
use crate::routing::arguments::Arguments;
use crate::routing::callback::Callback;
use crate::routing::path::{is_valid_path, normalize_route_path, tokenize, Token};
use crate::routing::types::{RouterError, RoutingResult};

/// A declared route pattern and the arguments bound by its last match.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    path: String,
    tokens: Vec<Token>,
    is_dynamic: bool,
    callback: Callback,
    id: Option<String>,
    allowed_methods: Option<BTreeSet<String>>,
    arguments: Arguments,
    predefined_arguments: IndexMap<String, Value>,
    base_url: Option<String>,
    locale: Option<String>,
    permissions: Option<Vec<String>>,
    source: Option<String>,
}

impl Route {
    /// Create a route for `path`.
    ///
    /// Fails with [`RouterError::InvalidPath`] when the path is empty or
    /// outside the HTTP path grammar.
    pub fn new(path: &str, callback: impl Into<Callback>) -> RoutingResult<Self> {
        if path.is_empty() || !is_valid_path(path) {
            return Err(RouterError::InvalidPath(path.to_string()));
        }

        let path = normalize_route_path(path);
        let tokens = tokenize(&path);

        Ok(Self {
            path,
            tokens,
            is_dynamic: false,
            callback: callback.into(),
            id: None,
            allowed_methods: None,
            arguments: Arguments::new(),
            predefined_arguments: IndexMap::new(),
            base_url: None,
            locale: None,
            permissions: None,
            source: None,
        })
    }

    pub fn with_id(mut self, id: impl Into<String>) -> RoutingResult<Self> {
        self.set_id(id)?;
        Ok(self)
    }

    pub fn with_allowed_methods<I, S>(mut self, methods: I) -> RoutingResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.set_allowed_methods(methods)?;
        Ok(self)
    }

    pub fn with_dynamic(mut self, is_dynamic: bool) -> Self {
        self.is_dynamic = is_dynamic;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.set_base_url(Some(base_url.into()));
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_dynamic(&self) -> bool {
        self.is_dynamic
    }

    pub fn set_dynamic(&mut self, is_dynamic: bool) {
        self.is_dynamic = is_dynamic;
    }

    pub fn callback(&self) -> &Callback {
        &self.callback
    }

    pub fn set_callback(&mut self, callback: impl Into<Callback>) {
        self.callback = callback.into();
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Sets the id; an empty id fails with [`RouterError::InvalidId`].
    pub fn set_id(&mut self, id: impl Into<String>) -> RoutingResult<()> {
        let id = id.into();
        if id.is_empty() {
            return Err(RouterError::InvalidId {
                path: self.path.clone(),
            });
        }

        self.id = Some(id);
        Ok(())
    }

    /// Restricts the route to the given methods.
    ///
    /// Entries are trimmed and upper-cased. An empty collection lifts the
    /// restriction; an empty entry fails with
    /// [`RouterError::InvalidAllowedMethod`].
    pub fn set_allowed_methods<I, S>(&mut self, methods: I) -> RoutingResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut allowed = BTreeSet::new();
        for method in methods {
            let method = method.as_ref();
            let normalized = method.trim().to_uppercase();
            if normalized.is_empty() {
                return Err(RouterError::InvalidAllowedMethod {
                    path: self.path.clone(),
                    method: method.to_string(),
                });
            }
            allowed.insert(normalized);
        }

        self.allowed_methods = if allowed.is_empty() { None } else { Some(allowed) };
        Ok(())
    }

    pub fn clear_allowed_methods(&mut self) {
        self.allowed_methods = None;
    }

    /// The allowed methods, sorted; `None` when every method is allowed.
    pub fn allowed_methods(&self) -> Option<&BTreeSet<String>> {
        self.allowed_methods.as_ref()
    }

    pub fn is_method_allowed(&self, method: &str) -> bool {
        match &self.allowed_methods {
            None => true,
            Some(allowed) => allowed.contains(&method.to_uppercase()),
        }
    }

    /// Arguments bound by the match that produced this route.
    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    pub fn set_arguments(&mut self, arguments: Arguments) {
        self.arguments = arguments;
    }

    pub fn argument(&self, name: &str) -> Option<&str> {
        self.arguments.get(name)
    }

    pub fn predefined_arguments(&self) -> &IndexMap<String, Value> {
        &self.predefined_arguments
    }

    pub fn set_predefined_arguments(&mut self, arguments: IndexMap<String, Value>) {
        self.predefined_arguments = arguments;
    }

    pub fn set_predefined_argument(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.predefined_arguments.insert(name.into(), value.into());
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Scopes the route to one base URL. An empty string clears the scope.
    pub fn set_base_url(&mut self, base_url: Option<String>) {
        self.base_url = base_url.filter(|url| !url.is_empty());
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn set_locale(&mut self, locale: Option<String>) {
        self.locale = locale;
    }

    pub fn permissions(&self) -> Option<&[String]> {
        self.permissions.as_deref()
    }

    /// Sets the required permissions; an empty collection clears them.
    pub fn set_permissions<I, S>(&mut self, permissions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let permissions: Vec<String> = permissions.into_iter().map(Into::into).collect();
        self.permissions = if permissions.is_empty() { None } else { Some(permissions) };
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn set_source(&mut self, source: Option<String>) {
        self.source = source;
    }

    /// Returns true if a request carrying `base_url` may match this route.
    pub fn accepts_base_url(&self, base_url: Option<&str>) -> bool {
        match (&self.base_url, base_url) {
            (Some(own), Some(requested)) if !requested.is_empty() => own == requested,
            _ => true,
        }
    }

    /// A copy of this route carrying `arguments`. The receiver is untouched.
    pub fn bind(&self, arguments: Arguments) -> Route {
        let mut route = self.clone();
        route.arguments = arguments;
        route
    }

    /// Generates the URL of this route.
    ///
    /// Every parameter token needs a scalar argument: a missing one fails with
    /// [`RouterError::MissingArgument`], a list or table with
    /// [`RouterError::InvalidArgumentType`]. The route's own base URL, when
    /// set, overrides `base_url`.
    pub fn url(
        &self,
        base_url: &str,
        arguments: &Parameters,
        query_parameters: &Parameters,
    ) -> RoutingResult<Url> {
        for name in self.tokens.iter().filter_map(Token::parameter) {
            match arguments.get(name) {
                None | Some(Value::Null) => {
                    return Err(RouterError::MissingArgument {
                        path: self.path.clone(),
                        name: name.to_string(),
                    });
                }
                Some(value) if scalar_to_string(value).is_none() => {
                    return Err(RouterError::InvalidArgumentType {
                        path: self.path.clone(),
                        name: name.to_string(),
                    });
                }
                Some(_) => {}
            }
        }

        let base_url = self.base_url.as_deref().unwrap_or(base_url);

        Ok(Url::new(base_url, &self.path)
            .with_arguments(arguments.clone())
            .with_query_parameters(query_parameters.clone()))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rendered: IndexMap<String, String> = IndexMap::new();
        for (name, value) in &self.predefined_arguments {
            let value = match value {
                Value::String(s) => format!("'{}'", s),
                other => other.to_string(),
            };
            rendered.insert(name.clone(), value);
        }
        for (key, value) in self.arguments.iter() {
            rendered.insert(key.to_string(), format!("'{}'", value));
        }

        let arguments: Vec<&str> = rendered.values().map(String::as_str).collect();

        write!(
            f,
            "{} {}({}) {}",
            self.path,
            self.callback,
            arguments.join(", "),
            if self.is_dynamic { 'd' } else { 's' }
        )?;

        match &self.allowed_methods {
            Some(methods) => {
                let methods: Vec<&str> = methods.iter().map(String::as_str).collect();
                write!(f, "[{}]", methods.join("|"))
            }
            None => f.write_str("[*]"),
        }
    }
}

//! Ordered path arguments with mixed named and positional keys.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Key of a bound argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArgumentKey {
    /// Bound by a `%name%` token.
    Name(String),
    /// Trailing segment of a dynamic route, counted from zero.
    Index(usize),
}

impl fmt::Display for ArgumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentKey::Name(name) => f.write_str(name),
            ArgumentKey::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Arguments bound by a match, in binding order.
///
/// Named bindings come first, positional tail segments follow. Binding the
/// same name twice keeps the position of the first binding and the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    entries: Vec<(ArgumentKey, String)>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `value` under `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let key = ArgumentKey::Name(name.into());
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Appends a positional value after every existing entry.
    pub fn push(&mut self, value: impl Into<String>) {
        let index = self.positional().count();
        self.entries.push((ArgumentKey::Index(index), value.into()));
    }

    /// Looks up a named argument.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter().find_map(|(key, value)| match key {
            ArgumentKey::Name(n) if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// Looks up a positional argument.
    pub fn get_index(&self, index: usize) -> Option<&str> {
        self.entries.iter().find_map(|(key, value)| match key {
            ArgumentKey::Index(i) if *i == index => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates every entry in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&ArgumentKey, &str)> {
        self.entries.iter().map(|(key, value)| (key, value.as_str()))
    }

    /// Iterates the named entries only.
    pub fn named(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|(key, value)| match key {
            ArgumentKey::Name(name) => Some((name.as_str(), value.as_str())),
            ArgumentKey::Index(_) => None,
        })
    }

    /// Iterates the positional values in order.
    pub fn positional(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|(key, value)| match key {
            ArgumentKey::Index(_) => Some(value.as_str()),
            ArgumentKey::Name(_) => None,
        })
    }
}

impl<K, V> FromIterator<(K, V)> for Arguments
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut arguments = Arguments::new();
        for (name, value) in iter {
            arguments.insert(name, value);
        }
        arguments
    }
}

impl Serialize for Arguments {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(&key.to_string(), value)?;
        }
        map.end()
    }
}

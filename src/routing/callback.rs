//! Opaque handler references carried by routes.
//!
//! The router never invokes a callback; it only hands the reference of the
//! matched route back to the host.

use std::any::Any;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Reference to the action of a route.
#[derive(Clone)]
pub enum Callback {
    /// A named function, e.g. `"index"`.
    Function(String),
    /// A method on a handler type, written `Type::method`.
    Method { target: String, method: String },
    /// A host value bound at registration time, compared by identity.
    Bound(Arc<dyn Any + Send + Sync>),
}

impl Callback {
    pub fn function(name: impl Into<String>) -> Self {
        Callback::Function(name.into())
    }

    pub fn method(target: impl Into<String>, method: impl Into<String>) -> Self {
        Callback::Method {
            target: target.into(),
            method: method.into(),
        }
    }

    pub fn bound<T: Any + Send + Sync>(value: T) -> Self {
        Callback::Bound(Arc::new(value))
    }

    /// Downcasts a bound host value.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Callback::Bound(value) => value.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Callback::Function(a), Callback::Function(b)) => a == b,
            (
                Callback::Method { target: t1, method: m1 },
                Callback::Method { target: t2, method: m2 },
            ) => t1 == t2 && m1 == m2,
            (Callback::Bound(a), Callback::Bound(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callback::Function(name) => f.write_str(name),
            Callback::Method { target, method } => write!(f, "{}::{}", target, method),
            Callback::Bound(_) => f.write_str("{bound}"),
        }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({})", self)
    }
}

impl From<&str> for Callback {
    fn from(value: &str) -> Self {
        match value.split_once("::") {
            Some((target, method)) if !target.is_empty() && !method.is_empty() => {
                Callback::method(target, method)
            }
            _ => Callback::function(value),
        }
    }
}

impl From<String> for Callback {
    fn from(value: String) -> Self {
        Callback::from(value.as_str())
    }
}

impl FromStr for Callback {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Callback::from(s))
    }
}

impl Serialize for Callback {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Callback {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Callback::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_callback() {
        assert_eq!(Callback::from("index"), Callback::function("index"));
        assert_eq!(
            Callback::from("Controller::indexAction"),
            Callback::method("Controller", "indexAction")
        );
        assert_eq!(Callback::from("::broken"), Callback::function("::broken"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Callback::method("Class", "method").to_string(), "Class::method");
        assert_eq!(Callback::function("callback").to_string(), "callback");
    }

    #[test]
    fn test_bound_callbacks_compare_by_identity() {
        let a = Callback::bound(42u32);
        let b = a.clone();
        let c = Callback::bound(42u32);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.downcast_ref::<u32>(), Some(&42));
    }
}

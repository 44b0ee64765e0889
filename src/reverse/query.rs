//! Query string serialization.
//!
//! Keys are sorted ascending at every nesting level so the same parameters
//! always render the same string. Tables render as `key[inner]=value`, lists
//! as `key[0]=value`. Key names and values are form-encoded, brackets are not.

use indexmap::IndexMap;
use serde_json::Value;
use url::form_urlencoded;

/// Form-encodes a value (space becomes `+`).
pub fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Renders a scalar as text. Lists, tables and null are not scalars.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some("0".to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Serializes query parameters, without the leading `?`.
pub fn serialize(parameters: &IndexMap<String, Value>, separator: &str) -> String {
    let mut pairs = Vec::new();

    let mut keys: Vec<&String> = parameters.keys().collect();
    keys.sort();
    for key in keys {
        collect_pairs(&encode(key), &parameters[key], &mut pairs);
    }

    pairs.join(separator)
}

fn collect_pairs(key: &str, value: &Value, pairs: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::Object(table) => {
            let mut inner: Vec<&String> = table.keys().collect();
            inner.sort();
            for name in inner {
                collect_pairs(&format!("{}[{}]", key, encode(name)), &table[name], pairs);
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                collect_pairs(&format!("{}[{}]", key, index), item, pairs);
            }
        }
        scalar => {
            if let Some(text) = scalar_to_string(scalar) {
                pairs.push(format!("{}={}", key, encode(&text)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> IndexMap<String, Value> {
        match value {
            Value::Object(map) => map.into_iter().collect(),
            _ => IndexMap::new(),
        }
    }

    #[test]
    fn test_sorted_top_level() {
        let p = params(json!({"b": "2", "a": "1"}));
        assert_eq!(serialize(&p, "&"), "a=1&b=2");
    }

    #[test]
    fn test_nested_tables_sorted_at_every_level() {
        let p = params(json!({"filter": {"type": "general", "published": 1}}));
        assert_eq!(serialize(&p, "&"), "filter[published]=1&filter[type]=general");

        let p = params(json!({"a": {"z": {"y": 1, "x": 2}}}));
        assert_eq!(serialize(&p, "&"), "a[z][x]=2&a[z][y]=1");
    }

    #[test]
    fn test_lists_and_encoding() {
        let p = params(json!({"tags": ["a b", "c&d"], "flag": true}));
        assert_eq!(serialize(&p, "&amp;"), "flag=1&amp;tags[0]=a+b&amp;tags[1]=c%26d");
    }

    #[test]
    fn test_keys_are_encoded() {
        let p = params(json!({"a b": {"c&d": 1}, "e=f": "g"}));
        assert_eq!(serialize(&p, "&"), "a+b[c%26d]=1&e%3Df=g");
    }

    #[test]
    fn test_null_is_skipped() {
        let p = params(json!({"a": null, "b": {"c": null}, "d": 4}));
        assert_eq!(serialize(&p, "&"), "d=4");
    }
}

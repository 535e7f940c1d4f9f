// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Conversions between [`Value`] and plain Rust / serde data.

use super::{Deferred, Function, Map, Pattern, Value};
use crate::engine::Instance;

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

impl From<Pattern> for Value {
    fn from(pattern: Pattern) -> Self {
        Value::Regexp(pattern)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Value::Function(function)
    }
}

impl From<Deferred> for Value {
    fn from(deferred: Deferred) -> Self {
        Value::Promise(deferred)
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::Component(instance)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Undefined, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(number) => match number.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(number.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => items.into_iter().map(Value::from).collect(),
            serde_json::Value::Object(map) => map
                .into_iter()
                .map(|(key, value)| (key, Value::from(value)))
                .collect(),
        }
    }
}

impl From<serde_yaml::Value> for Value {
    fn from(value: serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Null => Value::Null,
            serde_yaml::Value::Bool(b) => Value::Boolean(b),
            serde_yaml::Value::Number(number) => match number.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(number.as_f64().unwrap_or(f64::NAN)),
            },
            serde_yaml::Value::String(s) => Value::String(s),
            serde_yaml::Value::Sequence(items) => items.into_iter().map(Value::from).collect(),
            serde_yaml::Value::Mapping(mapping) => mapping
                .into_iter()
                .filter_map(|(key, value)| yaml_key(key).map(|key| (key, Value::from(value))))
                .collect(),
            serde_yaml::Value::Tagged(tagged) => Value::from(tagged.value),
        }
    }
}

// Mapping keys must be scalars; anything else has no sensible property name.
fn yaml_key(key: serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl Value {
    /// Convert the data portion of this value to JSON.
    ///
    /// Runtime-only kinds (functions, promises, components) and `Undefined`
    /// have no JSON form: they are dropped from objects, become `null` inside
    /// arrays, and make a top-level conversion return `None`.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        match self {
            Value::Undefined | Value::Function(_) | Value::Promise(_) | Value::Component(_) => None,
            Value::Null => Some(serde_json::Value::Null),
            Value::Boolean(b) => Some(serde_json::Value::Bool(*b)),
            Value::Integer(i) => Some(serde_json::Value::from(*i)),
            Value::Float(f) => Some(
                serde_json::Number::from_f64(*f)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
            ),
            Value::String(s) => Some(serde_json::Value::String(s.clone())),
            Value::Regexp(pattern) => Some(serde_json::Value::String(pattern.as_str().to_string())),
            Value::Array(items) => Some(serde_json::Value::Array(
                items
                    .iter()
                    .map(|item| item.to_json().unwrap_or(serde_json::Value::Null))
                    .collect(),
            )),
            Value::Object(map) => Some(serde_json::Value::Object(
                map.iter()
                    .filter_map(|(key, value)| value.to_json().map(|json| (key.clone(), json)))
                    .collect(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Kind;
    use serde_json::json;

    #[test]
    fn test_from_json_preserves_key_order() {
        let value = Value::from(json!({"zeta": 1, "alpha": [true, null], "mid": 1.5}));

        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(value.get("mid").map(Value::kind), Some(Kind::Float));
        assert_eq!(
            value.get("alpha"),
            Some(&Value::Array(vec![Value::Boolean(true), Value::Null]))
        );
    }

    #[test]
    fn test_from_yaml() {
        let yaml: serde_yaml::Value = serde_yaml::from_str(
            "__locator: greeter\nretries: 3\n1: numeric key\nmodules:\n  - greeting: hi\n",
        )
        .unwrap();
        let value = Value::from(yaml);

        assert_eq!(value.get("__locator"), Some(&Value::from("greeter")));
        assert_eq!(value.get("retries"), Some(&Value::Integer(3)));
        assert_eq!(value.get("1"), Some(&Value::from("numeric key")));
        assert_eq!(
            value.get("modules").and_then(Value::as_array).map(Vec::len),
            Some(1)
        );
    }

    #[test]
    fn test_to_json_drops_runtime_values() {
        let value = Value::object([
            ("name", Value::from("svc")),
            ("hook", Value::Function(Function::new(|_, _| Ok(Value::Null)))),
            ("missing", Value::Undefined),
            ("list", Value::Array(vec![Value::Undefined, Value::from("x")])),
        ]);

        assert_eq!(
            value.to_json(),
            Some(json!({"name": "svc", "list": [null, "x"]}))
        );
        assert_eq!(Value::Undefined.to_json(), None);
    }
}

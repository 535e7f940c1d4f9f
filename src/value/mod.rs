// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The configuration value model.
//!
//! A configuration tree is a [`Value`]: a closed sum type over the shapes the
//! engine understands. Plain data (`Null`, numbers, strings, arrays, ordered
//! objects) usually comes from JSON or YAML, while the runtime-only shapes
//! (`Function`, `Promise`, `Component`) appear once configuration is handed to
//! the engine programmatically or properties are mounted between instances.
//!
//! # Example
//!
//! ```rust
//! use the_assembly::value::{Kind, Value};
//! use serde_json::json;
//!
//! let config = Value::from(json!({
//!     "__locator": "greeter",
//!     "targets": ["world"],
//! }));
//!
//! assert_eq!(config.kind(), Kind::Object);
//! assert_eq!(config.get("__locator").and_then(Value::as_str), Some("greeter"));
//! ```

mod convert;
mod deferred;
mod function;
mod kind;

use indexmap::IndexMap;
use std::fmt;

use crate::engine::Instance;

pub(crate) use deferred::settle;
pub use deferred::Deferred;
pub use function::Function;
pub use kind::{Kind, KindMask};

/// Ordered mapping used for configuration objects and instance properties.
pub type Map = IndexMap<String, Value>;

/// A configuration value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Regexp(Pattern),
    Array(Vec<Value>),
    Object(Map),
    Function(Function),
    Promise(Deferred),
    Component(Instance),
}

impl Value {
    /// Build an object value from key/value pairs.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Compile a regular expression value.
    pub fn regexp(source: &str) -> Result<Self, regex::Error> {
        Pattern::new(source).map(Value::Regexp)
    }

    /// Look up a key on an object value. Any other kind has no keys.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Float(f) if self.kind() == Kind::Integer => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn as_component(&self) -> Option<&Instance> {
        match self {
            Value::Component(instance) => Some(instance),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Integer(a), Value::Float(b)) | (Value::Float(b), Value::Integer(a)) => {
                *a as f64 == *b
            }
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Regexp(a), Value::Regexp(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Promise(a), Value::Promise(b)) => a.ptr_eq(b),
            (Value::Component(a), Value::Component(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

/// A compiled regular expression. Two patterns are equal when their sources are.
#[derive(Clone)]
pub struct Pattern(regex::Regex);

impl Pattern {
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        regex::Regex::new(source).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.0.is_match(haystack)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.as_str())
    }
}

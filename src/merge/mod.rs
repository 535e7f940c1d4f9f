// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Type-directed recursive merge ("combine") of configuration values.
//!
//! `combine` folds an ordered list of sources into a target. The kind of the
//! target decides how each source is applied, and a source of a different kind
//! is ignored, so a well-typed default is never replaced by a badly-typed
//! override.
//!
//! # Built-in combinators
//!
//! | kind | behavior |
//! |---|---|
//! | object | missing keys are copied, shared keys are combined recursively |
//! | array | the source replaces the target wholesale |
//! | promise | settles once both the previous and the new promise settle |
//! | everything else | the source replaces the target |
//!
//! Object structure merges deeply while every leaf, arrays included, is
//! replaced: defaults provide the shape, overrides provide the values.
//!
//! # Examples
//!
//! ```rust
//! use the_assembly::merge::{combine, Combiners};
//! use the_assembly::value::Value;
//! use serde_json::json;
//!
//! let defaults = Value::from(json!({"retry": {"attempts": 3, "backoff": "linear"}, "tags": ["a", "b"]}));
//! let overrides = Value::from(json!({"retry": {"attempts": 5}, "tags": ["c"]}));
//!
//! let merged = combine(defaults, [overrides], &Combiners::default());
//! assert_eq!(
//!     merged,
//!     Value::from(json!({"retry": {"attempts": 5, "backoff": "linear"}, "tags": ["c"]}))
//! );
//! ```
//!
//! Overrides replace the combinator for a single kind:
//!
//! ```rust
//! use the_assembly::merge::{combine, Combiners};
//! use the_assembly::value::{Kind, Value};
//!
//! let summing = Combiners::new().with(Kind::Integer, |target, source, _| {
//!     Value::Integer(target.as_i64().unwrap_or(0) + source.as_i64().unwrap_or(0))
//! });
//!
//! let total = combine(Value::Integer(1), [Value::Integer(2), Value::Integer(3)], &summing);
//! assert_eq!(total, Value::Integer(6));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::value::{Deferred, Kind, Value};

/// A merge rule for one kind: `(target, source, combiners) -> merged`.
pub type Combinator = Arc<dyn Fn(Value, Value, &Combiners) -> Value + Send + Sync>;

/// Per-kind combinator overrides. Kinds without an override use the built-in rule.
#[derive(Clone, Default)]
pub struct Combiners {
    overrides: HashMap<Kind, Combinator>,
}

impl Combiners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Combiners::insert`].
    pub fn with<F>(mut self, kind: Kind, combinator: F) -> Self
    where
        F: Fn(Value, Value, &Combiners) -> Value + Send + Sync + 'static,
    {
        self.insert(kind, combinator);
        self
    }

    pub fn insert<F>(&mut self, kind: Kind, combinator: F)
    where
        F: Fn(Value, Value, &Combiners) -> Value + Send + Sync + 'static,
    {
        self.overrides.insert(kind, Arc::new(combinator));
    }

    pub fn get(&self, kind: Kind) -> Option<&Combinator> {
        self.overrides.get(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl fmt::Debug for Combiners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&Kind> = self.overrides.keys().collect();
        kinds.sort();
        f.debug_struct("Combiners").field("overrides", &kinds).finish()
    }
}

/// Merge `sources` into `target`, left to right.
pub fn combine<I>(target: Value, sources: I, combiners: &Combiners) -> Value
where
    I: IntoIterator<Item = Value>,
{
    let kind = target.kind();

    sources.into_iter().fold(target, |target, source| {
        if source.kind() != kind {
            return target;
        }
        match combiners.get(kind) {
            Some(combinator) => combinator(target, source, combiners),
            None => builtin(target, source, combiners),
        }
    })
}

fn builtin(target: Value, source: Value, combiners: &Combiners) -> Value {
    match (target, source) {
        (Value::Object(mut target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(&key) {
                    Some(existing) => {
                        let current = std::mem::take(existing);
                        *existing = combine(current, [value], combiners);
                    }
                    None => {
                        target.insert(key, value);
                    }
                }
            }
            Value::Object(target)
        }
        (Value::Promise(previous), Value::Promise(next)) => {
            Value::Promise(Deferred::all(previous, next))
        }
        (_, source) => source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Function;
    use serde_json::json;

    fn v(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn test_combine_table_driven() {
        struct TestCase {
            name: &'static str,
            target: Value,
            sources: Vec<Value>,
            expected: Value,
        }

        let test_cases = vec![
            TestCase {
                name: "nested objects merge key-wise",
                target: v(json!({"a": {"v": 1}})),
                sources: vec![v(json!({"a": {"x": 2}}))],
                expected: v(json!({"a": {"v": 1, "x": 2}})),
            },
            TestCase {
                name: "last array wins wholesale",
                target: v(json!([1])),
                sources: vec![v(json!([2])), v(json!([3]))],
                expected: v(json!([3])),
            },
            TestCase {
                name: "kind mismatch keeps the target",
                target: Value::Integer(1),
                sources: vec![Value::from("a"), Value::Null],
                expected: Value::Integer(1),
            },
            TestCase {
                name: "scalars are replaced",
                target: Value::from("old"),
                sources: vec![Value::from("new")],
                expected: Value::from("new"),
            },
            TestCase {
                name: "whole floats merge with integers",
                target: Value::Integer(1),
                sources: vec![Value::Float(4.0)],
                expected: Value::Float(4.0),
            },
            TestCase {
                name: "fractional floats do not replace integers",
                target: Value::Integer(1),
                sources: vec![Value::Float(4.5)],
                expected: Value::Integer(1),
            },
            TestCase {
                name: "mismatched nested value keeps default",
                target: v(json!({"port": 8080, "host": "localhost"})),
                sources: vec![v(json!({"port": "eighty", "host": "example.org"}))],
                expected: v(json!({"port": 8080, "host": "example.org"})),
            },
            TestCase {
                name: "no sources",
                target: v(json!({"a": 1})),
                sources: vec![],
                expected: v(json!({"a": 1})),
            },
        ];

        for test_case in test_cases {
            let merged = combine(test_case.target, test_case.sources, &Combiners::default());
            assert_eq!(merged, test_case.expected, "Failed for test case: {}", test_case.name);
        }
    }

    #[test]
    fn test_defaults_provide_shape_and_overrides_replace_values() {
        let defaults = v(json!({
            "prop1": {"value": 100},
            "prop2": {"value": 200, "list": ["a", "b", "c"]},
            "prop3": 20,
        }));
        let config = Value::object([(
            "prop2",
            Value::object([
                ("some", Value::Integer(300)),
                ("list", Value::Array(vec![Value::Undefined, Value::from("x")])),
            ]),
        )]);

        let merged = combine(defaults, [config], &Combiners::default());

        assert_eq!(merged.get("prop1").and_then(|p| p.get("value")), Some(&Value::Integer(100)));
        assert_eq!(
            merged.get("prop2"),
            Some(&Value::object([
                ("value", Value::Integer(200)),
                ("list", Value::Array(vec![Value::Undefined, Value::from("x")])),
                ("some", Value::Integer(300)),
            ]))
        );
        assert_eq!(merged.get("prop3"), Some(&Value::Integer(20)));
    }

    #[test]
    fn test_override_changes_only_its_kind() {
        let combiners = Combiners::new().with(Kind::Integer, |target, source, _| {
            Value::Integer(target.as_i64().unwrap_or(0) + source.as_i64().unwrap_or(0))
        });

        let merged = combine(
            v(json!({"count": 1, "label": "a"})),
            [v(json!({"count": 2, "label": "b"})), v(json!({"count": 3}))],
            &combiners,
        );

        assert_eq!(merged, v(json!({"count": 6, "label": "b"})));
    }

    #[test]
    fn test_functions_are_replaced() {
        let first = Function::named("first", |_, _| Ok(Value::Integer(1)));
        let second = Function::named("second", |_, _| Ok(Value::Integer(2)));

        let merged = combine(
            Value::Function(first),
            [Value::Function(second.clone())],
            &Combiners::default(),
        );

        assert_eq!(merged, Value::Function(second));
    }

    #[tokio::test]
    async fn test_promises_accumulate() {
        let merged = combine(
            Value::Promise(Deferred::resolved(Value::Integer(1))),
            [Value::Promise(Deferred::resolved(Value::Integer(2)))],
            &Combiners::default(),
        );

        let Value::Promise(pending) = merged else {
            panic!("Expected a promise after merging promises");
        };
        assert_eq!(
            pending.settle().await.unwrap(),
            Value::Array(vec![Value::Integer(1), Value::Integer(2)])
        );
    }
}

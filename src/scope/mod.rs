// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Write-once registry of published instances.
//!
//! A [`Scope`] lets one branch of a configuration tree reuse an instance built
//! by another: an entry with a definition name publishes its instance, and a
//! later entry with an injection reference receives that same instance instead
//! of constructing a new one.
//!
//! Names are bound once for the lifetime of the scope. There is no removal or
//! rebinding. The scope is an ordinary value owned by the engine that uses it,
//! so independent trees (and tests) stay isolated unless they share a handle.

use std::fmt;
use std::sync::Arc;

use indexmap::map::Entry;
use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::engine::Instance;
use crate::errors::ComposeError;
use crate::observability::messages::scope::InstancePublished;
use crate::observability::messages::StructuredLog;
use crate::value::Value;

/// Cloneable handle to a shared name → instance table.
#[derive(Clone, Default)]
pub struct Scope {
    entries: Arc<RwLock<IndexMap<String, Instance>>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// The instance published under `name`.
    pub fn get(&self, name: &str) -> Result<Instance, ComposeError> {
        let entries = self.entries.read();
        entries
            .get(name)
            .cloned()
            .ok_or_else(|| ComposeError::NotFound {
                name: name.to_string(),
                available: entries.keys().cloned().collect(),
            })
    }

    /// Publish `value` under `name`. Only component values can be published.
    pub fn set(&self, name: impl Into<String>, value: Value) -> Result<(), ComposeError> {
        let name = name.into();
        match value {
            Value::Component(instance) => self.define(name, instance),
            other => Err(ComposeError::InvalidInstance {
                name,
                kind: other.kind(),
            }),
        }
    }

    /// Publish `instance` under `name`.
    pub fn define(&self, name: impl Into<String>, instance: Instance) -> Result<(), ComposeError> {
        let name = name.into();
        let mut entries = self.entries.write();
        match entries.entry(name) {
            Entry::Occupied(occupied) => Err(ComposeError::DuplicateName {
                name: occupied.key().clone(),
            }),
            Entry::Vacant(vacant) => {
                InstancePublished {
                    name: vacant.key(),
                    component: &instance.describe(),
                }
                .log();
                vacant.insert(instance);
                Ok(())
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    /// Published names, in publication order.
    pub fn names(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Module;
    use crate::engine::Engine;
    use std::sync::Arc;

    fn instance(engine: &Engine) -> Instance {
        engine.construct(Arc::new(Module), Value::Undefined)
    }

    #[tokio::test]
    async fn test_set_then_get_returns_same_instance() {
        let engine = Engine::builder().build();
        let scope = Scope::new();
        let a = instance(&engine);

        scope.set("x", Value::Component(a.clone())).unwrap();

        assert!(scope.get("x").unwrap().ptr_eq(&a));
        assert!(scope.contains("x"));
        assert_eq!(scope.len(), 1);
    }

    #[tokio::test]
    async fn test_names_are_write_once() {
        let engine = Engine::builder().build();
        let scope = Scope::new();
        let a = instance(&engine);
        let b = instance(&engine);

        scope.set("x", Value::Component(a.clone())).unwrap();
        let error = scope.set("x", Value::Component(b)).unwrap_err();

        assert_eq!(error, ComposeError::DuplicateName { name: "x".to_string() });
        assert!(scope.get("x").unwrap().ptr_eq(&a));
    }

    #[tokio::test]
    async fn test_missing_name_lists_published_names() {
        let engine = Engine::builder().build();
        let scope = Scope::new();
        scope.define("cache", instance(&engine)).unwrap();
        scope.define("bus", instance(&engine)).unwrap();

        let error = scope.get("missing").unwrap_err();

        assert_eq!(
            error,
            ComposeError::NotFound {
                name: "missing".to_string(),
                available: vec!["cache".to_string(), "bus".to_string()],
            }
        );
    }

    #[test]
    fn test_only_components_can_be_published() {
        let scope = Scope::new();

        let error = scope.set("x", Value::from("not a component")).unwrap_err();

        assert_eq!(
            error,
            ComposeError::InvalidInstance {
                name: "x".to_string(),
                kind: crate::value::Kind::String,
            }
        );
        assert!(scope.is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let engine = Engine::builder().build();
        let scope = Scope::new();
        let view = scope.clone();

        scope.define("shared", instance(&engine)).unwrap();

        assert_eq!(view.names(), vec!["shared".to_string()]);
        assert_eq!(format!("{:?}", view), "Scope { names: [\"shared\"] }");
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::components::Module;
use crate::config::consts::DEFAULT_LOCATOR;
use crate::errors::ComposeError;
use crate::traits::{Component, Resolver};
use crate::value::Value;

/// Explicit table of component types keyed by locator.
///
/// Every registry starts with the base `module` type registered, so a
/// configuration tree made only of plain modules needs no setup.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use the_assembly::components::Module;
/// use the_assembly::config::ComponentRegistry;
///
/// let mut registry = ComponentRegistry::new();
/// registry.register("group", Arc::new(Module)).unwrap();
///
/// assert_eq!(registry.list_available(), vec!["module", "group"]);
/// assert!(registry.is_available("group"));
/// ```
#[derive(Clone)]
pub struct ComponentRegistry {
    components: IndexMap<String, Arc<dyn Component>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        let mut components: IndexMap<String, Arc<dyn Component>> = IndexMap::new();
        components.insert(DEFAULT_LOCATOR.to_string(), Arc::new(Module));
        Self { components }
    }

    /// Register a component type under `locator`.
    pub fn register(
        &mut self,
        locator: impl Into<String>,
        component: Arc<dyn Component>,
    ) -> Result<(), ComposeError> {
        match self.components.entry(locator.into()) {
            Entry::Occupied(occupied) => Err(ComposeError::DuplicateLocator {
                locator: occupied.key().clone(),
            }),
            Entry::Vacant(vacant) => {
                vacant.insert(component);
                Ok(())
            }
        }
    }

    /// Builder form of [`ComponentRegistry::register`].
    pub fn with(
        mut self,
        locator: impl Into<String>,
        component: Arc<dyn Component>,
    ) -> Result<Self, ComposeError> {
        self.register(locator, component)?;
        Ok(self)
    }

    /// Registered locators, in registration order.
    pub fn list_available(&self) -> Vec<&str> {
        self.components.keys().map(String::as_str).collect()
    }

    pub fn is_available(&self, locator: &str) -> bool {
        self.components.contains_key(locator)
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver for ComponentRegistry {
    fn resolve(&self, locator: &Value) -> Result<Arc<dyn Component>, ComposeError> {
        let Value::String(locator) = locator else {
            return Err(ComposeError::InvalidLocator {
                kind: locator.kind(),
            });
        };
        self.components
            .get(locator)
            .cloned()
            .ok_or_else(|| ComposeError::UnknownLocator {
                locator: locator.clone(),
                available: self.components.keys().cloned().collect(),
            })
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("locators", &self.list_available())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::stub::FailingComponent;
    use crate::value::Kind;

    #[test]
    fn test_resolve_table_driven() {
        struct TestCase {
            name: &'static str,
            locator: Value,
            expected: Result<&'static str, ComposeError>,
        }

        let registry = ComponentRegistry::new()
            .with("failing", Arc::new(FailingComponent::new("boom")))
            .unwrap();

        let test_cases = vec![
            TestCase {
                name: "base module is always registered",
                locator: Value::from("module"),
                expected: Ok("module"),
            },
            TestCase {
                name: "registered component",
                locator: Value::from("failing"),
                expected: Ok("failing"),
            },
            TestCase {
                name: "unknown locator lists what is available",
                locator: Value::from("missing"),
                expected: Err(ComposeError::UnknownLocator {
                    locator: "missing".to_string(),
                    available: vec!["module".to_string(), "failing".to_string()],
                }),
            },
            TestCase {
                name: "locator must be a string",
                locator: Value::Integer(7),
                expected: Err(ComposeError::InvalidLocator { kind: Kind::Integer }),
            },
        ];

        for test_case in test_cases {
            let result = registry.resolve(&test_case.locator).map(|c| c.name());
            assert_eq!(result, test_case.expected, "Failed for test case: {}", test_case.name);
        }
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = ComponentRegistry::new();

        let error = registry.register("module", Arc::new(Module)).unwrap_err();

        assert_eq!(
            error,
            ComposeError::DuplicateLocator {
                locator: "module".to_string()
            }
        );
        assert_eq!(registry.list_available(), vec!["module"]);
    }

    #[test]
    fn test_availability() {
        let registry = ComponentRegistry::default();

        assert!(registry.is_available("module"));
        assert!(!registry.is_available("greeter"));
        assert_eq!(format!("{:?}", registry), "ComponentRegistry { locators: [\"module\"] }");
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;

use crate::config::{ComponentRegistry, EngineOptions};
use crate::engine::instance::Instance;
use crate::engine::lifecycle;
use crate::errors::ComposeError;
use crate::merge::Combiners;
use crate::scope::Scope;
use crate::traits::{Component, Resolver};
use crate::value::Value;

struct EngineInner {
    resolver: Arc<dyn Resolver>,
    scope: Scope,
    combiners: Combiners,
    options: EngineOptions,
}

/// Builds instance trees from configuration.
///
/// An engine owns everything the lifecycle needs that is not part of a
/// single instance: the resolver for locators, the scope for published
/// instances, merge overrides and engine options. It is a cheap handle;
/// every lifecycle task holds a clone.
///
/// Construction spawns lifecycle tasks, so the engine must be used from
/// inside a Tokio runtime.
///
/// # Example
/// ```
/// use serde_json::json;
/// use the_assembly::engine::Engine;
/// use the_assembly::value::Value;
///
/// # #[tokio::main]
/// # async fn main() {
/// let engine = Engine::builder().build();
/// let root = engine
///     .load(Value::from(json!({
///         "__define": "app",
///         "modules": [{"__basename": "store", "capacity": 16}],
///     })))
///     .await
///     .unwrap();
///
/// let store = root.get("store").and_then(|v| v.as_component().cloned()).unwrap();
/// assert_eq!(store.get("capacity"), Some(Value::Integer(16)));
/// assert!(engine.scope().get("app").unwrap().ptr_eq(&root));
/// # }
/// ```
#[derive(Clone)]
pub struct Engine {
    inner: Arc<EngineInner>,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn scope(&self) -> &Scope {
        &self.inner.scope
    }

    pub fn combiners(&self) -> &Combiners {
        &self.inner.combiners
    }

    pub fn options(&self) -> EngineOptions {
        self.inner.options
    }

    pub fn resolver(&self) -> &Arc<dyn Resolver> {
        &self.inner.resolver
    }

    /// Create an instance of `component` from `config`.
    ///
    /// Defaults are merged and properties set before this returns; loading
    /// children, mounting and initialization continue in the background.
    /// Await [`Instance::ready`] for the outcome.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn construct(&self, component: Arc<dyn Component>, config: Value) -> Instance {
        let (instance, sender) = Instance::new(component);
        lifecycle::start(self, &instance, config, sender);
        instance
    }

    /// Inject or construct the root of a configuration tree without waiting
    /// for it to become ready.
    pub fn init(&self, config: Value) -> Result<Instance, ComposeError> {
        lifecycle::resolve(self, None, &config).map(|resolved| resolved.instance)
    }

    /// Build the root of a configuration tree, wait until it is ready, and
    /// publish it if it carries a definition name.
    pub async fn load(&self, config: Value) -> Result<Instance, ComposeError> {
        let resolved = lifecycle::resolve(self, None, &config)?;
        resolved.instance.ready().await?;
        lifecycle::publish(self, &config, &resolved)?;
        Ok(resolved.instance)
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("scope", &self.inner.scope)
            .field("combiners", &self.inner.combiners)
            .field("options", &self.inner.options)
            .finish()
    }
}

/// Assembles an [`Engine`]. Anything not set uses its default: a
/// [`ComponentRegistry`] with only the base module, a fresh scope, the
/// built-in combinators and default options.
#[derive(Default)]
pub struct EngineBuilder {
    resolver: Option<Arc<dyn Resolver>>,
    scope: Option<Scope>,
    combiners: Combiners,
    options: EngineOptions,
}

impl EngineBuilder {
    pub fn resolver(mut self, resolver: impl Resolver + 'static) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    /// Share a scope with other engines, or keep a handle to inspect it.
    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn combiners(mut self, combiners: Combiners) -> Self {
        self.combiners = combiners;
        self
    }

    pub fn options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            inner: Arc::new(EngineInner {
                resolver: self
                    .resolver
                    .unwrap_or_else(|| Arc::new(ComponentRegistry::new())),
                scope: self.scope.unwrap_or_default(),
                combiners: self.combiners,
                options: self.options,
            }),
        }
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The per-instance lifecycle.
//!
//! Configuring runs synchronously inside construction. Everything after it
//! runs in a task of its own: named `components` and then `modules` are
//! loaded one at a time through [`queue`] and published, every loaded child
//! is mounted onto the instance, the initialize hook runs, and the outcome
//! settles the instance's readiness.
//!
//! Components load first so that any module entry can inject a component's
//! definition.
//!
//! Errors never escape a lifecycle task. They are logged at the instance that
//! failed and delivered to whoever awaits its readiness; a parent awaiting a
//! failed child then applies the engine's [`FailureStrategy`].

use tokio::sync::oneshot;
use tracing::Instrument;

use crate::config::consts::{
    BASENAME_KEY, COMPONENTS_KEY, DEFINE_KEY, INITIALIZE_KEY, INJECT_KEY, LOCATOR_KEY, MODULES_KEY,
};
use crate::engine::instance::Outcome;
use crate::engine::{mount, queue, Engine, Instance, LifecycleState};
use crate::errors::{ComposeError, FailureStrategy};
use crate::merge::combine;
use crate::observability::messages::lifecycle::{
    ChildLoaded, ChildSkipped, ComponentConstructed, ComponentReady, LifecycleFailed,
};
use crate::observability::messages::scope::InstanceInjected;
use crate::observability::messages::StructuredLog;
use crate::value::{settle, Map, Value};

/// An entry resolved to an instance, either freshly constructed or injected
/// from the scope.
pub(crate) struct Resolved {
    pub instance: Instance,
    pub injected: bool,
}

/// Configure `instance` and start the rest of its lifecycle.
pub(crate) fn start(
    engine: &Engine,
    instance: &Instance,
    config: Value,
    sender: oneshot::Sender<Outcome>,
) {
    let configured = configure(engine, instance, config);

    let constructed = ComponentConstructed {
        component: &instance.describe(),
        property_count: instance.property_names().len(),
    };
    constructed.log();
    let span = constructed.span("lifecycle");

    let engine = engine.clone();
    let instance = instance.clone();
    tokio::spawn(
        async move {
            let outcome = match configured {
                Ok(()) => drive(&engine, &instance).await,
                Err(error) => Err(error),
            };
            if let Err(error) = &outcome {
                let state = instance.state();
                instance.advance(LifecycleState::Failed);
                LifecycleFailed {
                    component: &instance.describe(),
                    state,
                    error,
                }
                .log();
            }
            // Nobody may be waiting; the outcome is still recorded in the state.
            let _ = sender.send(outcome);
        }
        .instrument(span),
    );
}

/// Merge the type's defaults under `config` and copy the result onto the instance.
fn configure(engine: &Engine, instance: &Instance, config: Value) -> Result<(), ComposeError> {
    instance.advance(LifecycleState::Configuring);

    let merged = match instance.component().defaults() {
        Some(defaults) => combine(defaults, [config], engine.combiners()),
        None => config,
    };

    match merged {
        Value::Object(properties) => {
            instance.absorb(properties);
            Ok(())
        }
        Value::Undefined | Value::Null => Ok(()),
        other => Err(ComposeError::InvalidConfiguration {
            component: instance.describe(),
            reason: format!("expected an object, found {}", other.kind()),
        }),
    }
}

async fn drive(engine: &Engine, instance: &Instance) -> Result<(), ComposeError> {
    instance.advance(LifecycleState::LoadingChildren);
    let components = match directive(instance, COMPONENTS_KEY) {
        None => Map::new(),
        Some(Value::Object(entries)) => {
            queue(entries, |entry, key| load_component(engine, instance, entry, key)).await?
        }
        Some(other) => return Err(invalid_shape(instance, COMPONENTS_KEY, &other)),
    };
    let (modules, loaded) = match directive(instance, MODULES_KEY) {
        None => (Vec::new(), Vec::new()),
        Some(Value::Array(entries)) => {
            let loaded = queue(entries.clone(), |entry, index| {
                load_module(engine, instance, entry, index)
            })
            .await?;
            (entries, loaded)
        }
        Some(other) => return Err(invalid_shape(instance, MODULES_KEY, &other)),
    };

    // Loaded children replaced their entries; skipped ones kept the config object.
    instance.advance(LifecycleState::Mounting);
    for (key, slot) in components {
        if let Value::Component(child) = slot {
            mount::install(instance, &child, key, Value::Component(child.clone()))?;
        }
    }
    for (entry, slot) in modules.iter().zip(loaded) {
        let Value::Component(child) = slot else {
            continue;
        };
        let descriptor = match entry.get(BASENAME_KEY) {
            Some(descriptor) => Some(descriptor.clone()),
            None => child.get(BASENAME_KEY),
        };
        if let Some(descriptor) = descriptor {
            mount::mount(instance, &child, descriptor).await?;
        }
    }

    instance.advance(LifecycleState::Initializing);
    initialize(instance).await?;

    instance.advance(LifecycleState::Ready);
    ComponentReady {
        component: &instance.describe(),
    }
    .log();
    Ok(())
}

async fn load_module(
    engine: &Engine,
    parent: &Instance,
    entry: Value,
    index: usize,
) -> Result<Option<Value>, ComposeError> {
    let position = format!("{}[{}]", MODULES_KEY, index);
    let child = load_child(engine, parent, &entry, &position).await?;
    Ok(child.map(Value::Component))
}

async fn load_component(
    engine: &Engine,
    parent: &Instance,
    entry: Value,
    key: String,
) -> Result<Option<Value>, ComposeError> {
    if parent.has(&key) {
        return Err(ComposeError::NameCollision {
            component: parent.describe(),
            property: key,
        });
    }

    let position = format!("{}.{}", COMPONENTS_KEY, key);
    let child = load_child(engine, parent, &entry, &position).await?;
    Ok(child.map(Value::Component))
}

/// Resolve one child entry, wait for it, and publish it.
///
/// Returns `None` when the child failed and the engine continues on error.
async fn load_child(
    engine: &Engine,
    parent: &Instance,
    entry: &Value,
    position: &str,
) -> Result<Option<Instance>, ComposeError> {
    if !matches!(entry, Value::Object(_)) {
        return Err(invalid_shape(parent, position, entry));
    }

    let resolved = resolve(engine, Some(parent), entry)?;
    if let Err(error) = resolved.instance.ready().await {
        return match engine.options().failure_strategy {
            FailureStrategy::FailFast => Err(ComposeError::ChildFailed {
                parent: parent.describe(),
                child: resolved.instance.describe(),
                source: Box::new(error),
            }),
            FailureStrategy::ContinueOnError => {
                ChildSkipped {
                    parent: &parent.describe(),
                    child: &resolved.instance.describe(),
                    position,
                    error: &error,
                }
                .log();
                Ok(None)
            }
        };
    }

    publish(engine, entry, &resolved)?;
    ChildLoaded {
        parent: &parent.describe(),
        child: &resolved.instance.describe(),
        position,
    }
    .log();
    Ok(Some(resolved.instance))
}

/// Turn an entry into an instance: inject it from the scope or construct it.
///
/// An entry without a locator is built from its parent's component type when
/// the engine inherits parent types, and from the resolver's fallback otherwise.
pub(crate) fn resolve(
    engine: &Engine,
    parent: Option<&Instance>,
    entry: &Value,
) -> Result<Resolved, ComposeError> {
    if let Some(reference) = entry.get(INJECT_KEY).filter(|v| is_present(v)) {
        let Value::String(name) = reference else {
            return Err(entry_shape(parent, INJECT_KEY, reference));
        };
        let instance = engine.scope().get(name)?;
        InstanceInjected {
            name,
            component: &instance.describe(),
        }
        .log();
        return Ok(Resolved {
            instance,
            injected: true,
        });
    }

    let component = match (entry.get(LOCATOR_KEY).filter(|v| is_present(v)), parent) {
        (Some(locator), _) => engine.resolver().resolve(locator)?,
        (None, Some(parent)) if engine.options().inherit_parent_type => parent.component().clone(),
        (None, _) => engine.resolver().fallback(),
    };

    Ok(Resolved {
        instance: engine.construct(component, entry.clone()),
        injected: false,
    })
}

/// Publish a resolved instance under its definition name, if it has one.
///
/// The entry's name wins; an instance's own `__define` only counts when the
/// instance was constructed from this entry.
pub(crate) fn publish(
    engine: &Engine,
    entry: &Value,
    resolved: &Resolved,
) -> Result<(), ComposeError> {
    let name = match entry.get(DEFINE_KEY).filter(|v| is_present(v)) {
        Some(name) => Some(name.clone()),
        None if !resolved.injected => resolved
            .instance
            .get(DEFINE_KEY)
            .filter(is_present),
        None => None,
    };

    match name {
        None => Ok(()),
        Some(Value::String(name)) => engine.scope().define(name, resolved.instance.clone()),
        Some(other) => Err(invalid_shape(&resolved.instance, DEFINE_KEY, &other)),
    }
}

async fn initialize(instance: &Instance) -> Result<(), ComposeError> {
    match instance.get(INITIALIZE_KEY) {
        Some(Value::Function(hook)) => {
            let result = hook.bind(instance.clone()).call(&[])?;
            settle(result).await?;
            Ok(())
        }
        _ => instance.component().initialize(instance).await,
    }
}

/// A directive property, if set to anything but undefined or null.
fn directive(instance: &Instance, key: &str) -> Option<Value> {
    instance.get(key).filter(is_present)
}

fn is_present(value: &Value) -> bool {
    !matches!(value, Value::Undefined | Value::Null)
}

fn invalid_shape(instance: &Instance, directive: &str, value: &Value) -> ComposeError {
    ComposeError::InvalidDirectiveShape {
        component: instance.describe(),
        directive: directive.to_string(),
        kind: value.kind(),
    }
}

fn entry_shape(parent: Option<&Instance>, directive: &str, value: &Value) -> ComposeError {
    ComposeError::InvalidDirectiveShape {
        component: parent.map(Instance::describe).unwrap_or_else(|| "root".to_string()),
        directive: directive.to_string(),
        kind: value.kind(),
    }
}

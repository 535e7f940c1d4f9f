// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::future::{BoxFuture, FutureExt, Shared};
use indexmap::map::Entry;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use tokio::sync::oneshot;

use crate::errors::ComposeError;
use crate::observability::messages::lifecycle::StateTransition;
use crate::observability::messages::StructuredLog;
use crate::traits::Component;
use crate::value::{Map, Value};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Where an instance is in its lifecycle.
///
/// States only move forward, in declaration order. `Ready` and `Failed` are
/// terminal; `Failed` can be entered from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LifecycleState {
    Constructed,
    Configuring,
    LoadingChildren,
    Mounting,
    Initializing,
    Ready,
    Failed,
}

impl LifecycleState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ready | Self::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Constructed => "constructed",
            Self::Configuring => "configuring",
            Self::LoadingChildren => "loading children",
            Self::Mounting => "mounting",
            Self::Initializing => "initializing",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) type Outcome = Result<(), ComposeError>;

/// Future that settles once an instance is ready or has failed.
///
/// Cloneable; every clone observes the same outcome, and awaiting an already
/// settled readiness returns immediately.
#[derive(Clone)]
pub struct Readiness(Shared<BoxFuture<'static, Outcome>>);

impl Readiness {
    fn new(component: String, receiver: oneshot::Receiver<Outcome>) -> Self {
        let pending = async move {
            receiver
                .await
                .unwrap_or(Err(ComposeError::Abandoned { component }))
        };
        Self(pending.boxed().shared())
    }

    /// The outcome, if it is already known.
    pub fn peek(&self) -> Option<&Outcome> {
        self.0.peek()
    }
}

impl Future for Readiness {
    type Output = Outcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.0.poll_unpin(cx)
    }
}

impl fmt::Debug for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.peek() {
            None => f.write_str("Readiness(<pending>)"),
            Some(outcome) => f.debug_tuple("Readiness").field(outcome).finish(),
        }
    }
}

struct InstanceInner {
    id: u64,
    component: Arc<dyn Component>,
    properties: RwLock<Map>,
    state: RwLock<LifecycleState>,
    readiness: Readiness,
}

/// A constructed component: its own properties, lifecycle state and
/// readiness, plus the component type it was built from.
///
/// `Instance` is a cheap handle; clones refer to the same instance and
/// compare equal with [`Instance::ptr_eq`].
#[derive(Clone)]
pub struct Instance {
    inner: Arc<InstanceInner>,
}

impl Instance {
    /// A fresh instance in the `Constructed` state, plus the sender that
    /// settles its readiness.
    pub(crate) fn new(component: Arc<dyn Component>) -> (Self, oneshot::Sender<Outcome>) {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = oneshot::channel();
        let readiness = Readiness::new(format!("{}#{}", component.name(), id), receiver);

        let instance = Self {
            inner: Arc::new(InstanceInner {
                id,
                component,
                properties: RwLock::new(Map::new()),
                state: RwLock::new(LifecycleState::Constructed),
                readiness,
            }),
        };
        (instance, sender)
    }

    pub fn id(&self) -> u64 {
        self.inner.id
    }

    pub fn component(&self) -> &Arc<dyn Component> {
        &self.inner.component
    }

    pub fn type_name(&self) -> &'static str {
        self.inner.component.name()
    }

    /// `type#id`, used to name the instance in logs and errors.
    pub fn describe(&self) -> String {
        format!("{}#{}", self.type_name(), self.inner.id)
    }

    pub fn state(&self) -> LifecycleState {
        *self.inner.state.read()
    }

    /// Move to `next` if that is a forward step. Returns whether it moved.
    pub(crate) fn advance(&self, next: LifecycleState) -> bool {
        let previous = {
            let mut state = self.inner.state.write();
            if state.is_terminal() || next <= *state {
                return false;
            }
            std::mem::replace(&mut *state, next)
        };
        StateTransition {
            component: &self.describe(),
            from: previous,
            to: next,
        }
        .log();
        true
    }

    /// Readiness of this instance.
    pub fn ready(&self) -> Readiness {
        self.inner.readiness.clone()
    }

    /// Whether the lifecycle has completed successfully. Does not require
    /// anyone to have awaited [`Instance::ready`].
    pub fn is_ready(&self) -> bool {
        self.state() == LifecycleState::Ready
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.inner.properties.read().get(name).cloned()
    }

    pub fn has(&self, name: &str) -> bool {
        self.inner.properties.read().contains_key(name)
    }

    /// Property names in insertion order.
    pub fn property_names(&self) -> Vec<String> {
        self.inner.properties.read().keys().cloned().collect()
    }

    /// Snapshot of every property.
    pub fn properties(&self) -> Map {
        self.inner.properties.read().clone()
    }

    /// Add a property. Fails with `NameCollision` if the name is taken.
    pub fn define(&self, name: impl Into<String>, value: Value) -> Result<(), ComposeError> {
        let mut properties = self.inner.properties.write();
        match properties.entry(name.into()) {
            Entry::Occupied(occupied) => Err(ComposeError::NameCollision {
                component: self.describe(),
                property: occupied.key().clone(),
            }),
            Entry::Vacant(vacant) => {
                vacant.insert(value);
                Ok(())
            }
        }
    }

    /// Copy configuration onto a freshly constructed instance.
    pub(crate) fn absorb(&self, configuration: Map) {
        self.inner.properties.write().extend(configuration);
    }

    /// Invoke a function property bound to this instance.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, ComposeError> {
        match self.get(name) {
            Some(Value::Function(function)) => function.bind(self.clone()).call(args),
            _ => Err(ComposeError::NotCallable {
                component: self.describe(),
                property: name.to_string(),
            }),
        }
    }

    /// Read the data properties into a typed configuration.
    ///
    /// Functions, promises and child components have no data form and are
    /// skipped, so a struct only needs fields for the plain values it uses.
    ///
    /// # Example
    /// ```
    /// use serde::Deserialize;
    /// use serde_json::json;
    /// use the_assembly::engine::Engine;
    /// use the_assembly::value::Value;
    ///
    /// #[derive(Deserialize)]
    /// struct Listener {
    ///     host: String,
    ///     port: u16,
    /// }
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let engine = Engine::builder().build();
    /// let instance = engine
    ///     .init(Value::from(json!({"host": "localhost", "port": 8080})))
    ///     .unwrap();
    ///
    /// let listener: Listener = instance.config().unwrap();
    /// assert_eq!(listener.port, 8080);
    /// # }
    /// ```
    pub fn config<T: DeserializeOwned>(&self) -> Result<T, ComposeError> {
        let data = Value::Object(self.properties())
            .to_json()
            .unwrap_or(serde_json::Value::Null);
        serde_json::from_value(data).map_err(|e| ComposeError::InvalidConfiguration {
            component: self.describe(),
            reason: e.to_string(),
        })
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("component", &self.describe())
            .field("state", &self.state())
            .field("properties", &self.property_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Module;
    use crate::value::Function;

    fn instance() -> Instance {
        Instance::new(Arc::new(Module)).0
    }

    #[test]
    fn test_define_rejects_existing_names() {
        let instance = instance();
        instance.define("port", Value::Integer(80)).unwrap();

        let error = instance.define("port", Value::Integer(81)).unwrap_err();

        assert_eq!(
            error,
            ComposeError::NameCollision {
                component: instance.describe(),
                property: "port".to_string(),
            }
        );
        assert_eq!(instance.get("port"), Some(Value::Integer(80)));
    }

    #[test]
    fn test_state_only_moves_forward() {
        struct TestCase {
            name: &'static str,
            next: LifecycleState,
            moved: bool,
            expected: LifecycleState,
        }

        let instance = instance();
        let test_cases = vec![
            TestCase {
                name: "forward to configuring",
                next: LifecycleState::Configuring,
                moved: true,
                expected: LifecycleState::Configuring,
            },
            TestCase {
                name: "skip ahead to mounting",
                next: LifecycleState::Mounting,
                moved: true,
                expected: LifecycleState::Mounting,
            },
            TestCase {
                name: "backwards is ignored",
                next: LifecycleState::LoadingChildren,
                moved: false,
                expected: LifecycleState::Mounting,
            },
            TestCase {
                name: "fail from a non-terminal state",
                next: LifecycleState::Failed,
                moved: true,
                expected: LifecycleState::Failed,
            },
            TestCase {
                name: "failed is terminal",
                next: LifecycleState::Ready,
                moved: false,
                expected: LifecycleState::Failed,
            },
        ];

        for test_case in test_cases {
            assert_eq!(
                instance.advance(test_case.next),
                test_case.moved,
                "Failed for test case: {}",
                test_case.name
            );
            assert_eq!(instance.state(), test_case.expected, "Failed for test case: {}", test_case.name);
        }
    }

    #[test]
    fn test_call_binds_receiver() {
        let instance = instance();
        instance.define("name", Value::from("alpha")).unwrap();
        instance
            .define(
                "greet",
                Value::Function(Function::new(|receiver, _| {
                    let name = receiver.and_then(|r| r.get("name")).unwrap_or_default();
                    Ok(name)
                })),
            )
            .unwrap();

        assert_eq!(instance.call("greet", &[]).unwrap(), Value::from("alpha"));
        assert_eq!(
            instance.call("name", &[]).unwrap_err(),
            ComposeError::NotCallable {
                component: instance.describe(),
                property: "name".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_readiness_settles_for_every_clone() {
        let (instance, sender) = Instance::new(Arc::new(Module));
        let first = instance.ready();
        let second = instance.ready();
        assert_eq!(instance.ready().peek(), None);

        sender.send(Ok(())).unwrap();

        assert_eq!(first.await, Ok(()));
        assert_eq!(second.await, Ok(()));
        assert_eq!(instance.ready().peek(), Some(&Ok(())));
        // Readiness settling alone does not move the lifecycle state.
        assert!(!instance.is_ready());
    }

    #[tokio::test]
    async fn test_dropped_sender_abandons_readiness() {
        let (instance, sender) = Instance::new(Arc::new(Module));
        drop(sender);

        assert_eq!(
            instance.ready().await,
            Err(ComposeError::Abandoned {
                component: instance.describe()
            })
        );
    }

    #[test]
    fn test_typed_config_reports_invalid_data() {
        #[derive(Debug, serde::Deserialize)]
        struct Listener {
            #[allow(dead_code)]
            port: u16,
        }

        let instance = instance();
        instance.define("port", Value::from("eighty")).unwrap();

        let error = instance.config::<Listener>().unwrap_err();

        assert!(matches!(error, ComposeError::InvalidConfiguration { .. }));
    }
}

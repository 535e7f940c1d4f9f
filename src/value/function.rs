// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use super::{Deferred, Value};
use crate::engine::Instance;
use crate::errors::ComposeError;

type Body = dyn Fn(Option<&Instance>, &[Value]) -> Result<Value, ComposeError> + Send + Sync;

/// A callable configuration value.
///
/// Functions receive an optional receiver (the instance they are bound to) and
/// positional arguments. Asynchronous work is expressed by returning a
/// `Value::Promise`, which callers inside the engine await.
///
/// Binding never changes the body, so a bound copy compares equal only to
/// copies bound to the same instance. Binding is permanent: a method exposed
/// on another instance still runs against the instance it came from.
#[derive(Clone)]
pub struct Function {
    name: Option<Arc<str>>,
    body: Arc<Body>,
    receiver: Option<Instance>,
}

impl Function {
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(Option<&Instance>, &[Value]) -> Result<Value, ComposeError> + Send + Sync + 'static,
    {
        Self {
            name: None,
            body: Arc::new(body),
            receiver: None,
        }
    }

    /// A function with a name. Named functions can be used directly as a mount
    /// descriptor; the result is installed under the name.
    pub fn named<F>(name: impl Into<Arc<str>>, body: F) -> Self
    where
        F: Fn(Option<&Instance>, &[Value]) -> Result<Value, ComposeError> + Send + Sync + 'static,
    {
        Self {
            name: Some(name.into()),
            ..Self::new(body)
        }
    }

    /// Wrap an async closure. Calling the function starts the future and hands
    /// it back as a promise value.
    pub fn from_async<F, Fut>(body: F) -> Self
    where
        F: Fn(Option<Instance>, Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ComposeError>> + Send + 'static,
    {
        Self::new(move |receiver, args| {
            let pending = body(receiver.cloned(), args.to_vec());
            Ok(Value::Promise(Deferred::new(pending)))
        })
    }

    /// Rename a function, keeping its body and receiver.
    pub fn with_name(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Copy of this function whose receiver is `receiver`. A function that is
    /// already bound keeps its original receiver.
    pub fn bind(&self, receiver: Instance) -> Self {
        if self.receiver.is_some() {
            return self.clone();
        }
        Self {
            receiver: Some(receiver),
            ..self.clone()
        }
    }

    pub fn receiver(&self) -> Option<&Instance> {
        self.receiver.as_ref()
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, ComposeError> {
        (self.body)(self.receiver.as_ref(), args)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        let same_body = std::ptr::eq(
            Arc::as_ptr(&self.body) as *const (),
            Arc::as_ptr(&other.body) as *const (),
        );
        let same_receiver = match (&self.receiver, &other.receiver) {
            (None, None) => true,
            (Some(a), Some(b)) => a.ptr_eq(b),
            _ => false,
        };
        same_body && same_receiver
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name())
            .field("bound", &self.receiver.is_some())
            .finish()
    }
}

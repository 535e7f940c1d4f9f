// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::future::Future;

use futures::future::{BoxFuture, FutureExt, Shared};

use super::Value;
use crate::errors::ComposeError;

/// A promise-like value: a shared future that settles once into a value or an
/// error. Every clone observes the same outcome.
#[derive(Clone)]
pub struct Deferred(Shared<BoxFuture<'static, Result<Value, ComposeError>>>);

impl Deferred {
    pub fn new<F>(pending: F) -> Self
    where
        F: Future<Output = Result<Value, ComposeError>> + Send + 'static,
    {
        Self(pending.boxed().shared())
    }

    pub fn resolved(value: Value) -> Self {
        Self::new(futures::future::ready(Ok(value)))
    }

    pub fn rejected(error: ComposeError) -> Self {
        Self::new(futures::future::ready(Err(error)))
    }

    /// Settles once both inputs settle, with a two element array of their
    /// values. Fails with whichever error is observed first.
    pub fn all(first: Deferred, second: Deferred) -> Self {
        Self::new(async move {
            let (a, b) = futures::future::try_join(first.0, second.0).await?;
            Ok(Value::Array(vec![a, b]))
        })
    }

    /// Wait for the outcome.
    pub async fn settle(&self) -> Result<Value, ComposeError> {
        self.0.clone().await
    }

    /// The outcome, if the value has already settled.
    pub fn peek(&self) -> Option<&Result<Value, ComposeError>> {
        self.0.peek()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.0.ptr_eq(&other.0)
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.peek() {
            None => f.write_str("Deferred(<pending>)"),
            Some(Ok(value)) => f.debug_tuple("Deferred").field(value).finish(),
            Some(Err(error)) => write!(f, "Deferred(<rejected: {error}>)"),
        }
    }
}

/// Resolve a value that may be a promise, following nested promises.
pub(crate) async fn settle(mut value: Value) -> Result<Value, ComposeError> {
    while let Value::Promise(pending) = value {
        value = pending.settle().await?;
    }
    Ok(value)
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::engine::Instance;
use crate::errors::ComposeError;
use crate::traits::Component;
use crate::value::Value;

/// A component whose initialize always fails
pub struct FailingComponent {
    pub reason: String,
}

impl FailingComponent {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl Component for FailingComponent {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn initialize(&self, instance: &Instance) -> Result<(), ComposeError> {
        Err(ComposeError::initialize(instance.describe(), self.reason.clone()))
    }
}

/// A component that sleeps during initialize, then sets `ready` to true
pub struct DelayedComponent {
    pub delay: Duration,
}

impl DelayedComponent {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Component for DelayedComponent {
    fn name(&self) -> &'static str {
        "delayed"
    }

    async fn initialize(&self, instance: &Instance) -> Result<(), ComposeError> {
        tokio::time::sleep(self.delay).await;
        instance.define("ready", Value::Boolean(true))
    }
}

/// A component with type-level defaults
pub struct DefaultsComponent {
    pub defaults: Value,
}

impl DefaultsComponent {
    pub fn new(defaults: Value) -> Self {
        Self { defaults }
    }
}

#[async_trait]
impl Component for DefaultsComponent {
    fn name(&self) -> &'static str {
        "defaults"
    }

    fn defaults(&self) -> Option<Value> {
        Some(self.defaults.clone())
    }
}

/// A component that appends its `label` property to a shared log on initialize
#[derive(Clone, Default)]
pub struct RecordingComponent {
    pub log: Arc<Mutex<Vec<String>>>,
}

impl RecordingComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<String> {
        self.log.lock().clone()
    }
}

#[async_trait]
impl Component for RecordingComponent {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn initialize(&self, instance: &Instance) -> Result<(), ComposeError> {
        let label = instance
            .get("label")
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| instance.describe());
        self.log.lock().push(label);
        Ok(())
    }
}

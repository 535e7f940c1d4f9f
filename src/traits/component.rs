// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::engine::Instance;
use crate::errors::ComposeError;
use crate::value::Value;

/// A component type: the behavior shared by every instance built from it.
///
/// Instances carry their own properties; the type only contributes defaults
/// that configuration is merged over, and the initialize hook that runs once
/// every declared child is ready and mounted.
#[async_trait]
pub trait Component: Send + Sync {
    fn name(&self) -> &'static str;

    /// Type-level configuration merged under the caller's configuration.
    fn defaults(&self) -> Option<Value> {
        None
    }

    /// Runs last in the lifecycle. Overridden per instance by an `initialize`
    /// function in the configuration.
    async fn initialize(&self, _instance: &Instance) -> Result<(), ComposeError> {
        Ok(())
    }
}

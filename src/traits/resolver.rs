// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::components::Module;
use crate::errors::ComposeError;
use crate::traits::Component;
use crate::value::Value;

/// Maps a locator from configuration to a component type.
pub trait Resolver: Send + Sync {
    fn resolve(&self, locator: &Value) -> Result<Arc<dyn Component>, ComposeError>;

    /// Type used for entries without a locator when they do not inherit
    /// their parent's type.
    fn fallback(&self) -> Arc<dyn Component> {
        Arc::new(Module)
    }
}

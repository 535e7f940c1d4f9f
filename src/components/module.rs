// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::config::consts::DEFAULT_LOCATOR;
use crate::traits::Component;

/// The base component type: no defaults and a no-op initialize.
///
/// A module is a plain container. Everything it does comes from its
/// configuration: children under `modules` and `components`, and an optional
/// `initialize` function.
#[derive(Debug, Clone, Copy, Default)]
pub struct Module;

#[async_trait]
impl Component for Module {
    fn name(&self) -> &'static str {
        DEFAULT_LOCATOR
    }
}

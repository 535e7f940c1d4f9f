// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for scope publication and injection.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// An instance was published under a scope name.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_assembly::observability::messages::scope::InstancePublished;
///
/// let msg = InstancePublished {
///     name: "database",
///     component: "pool#4",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct InstancePublished<'a> {
    pub name: &'a str,
    pub component: &'a str,
}

impl Display for InstancePublished<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Published component '{}' as '{}'", self.component, self.name)
    }
}

impl StructuredLog for InstancePublished<'_> {
    fn log(&self) {
        tracing::info!(
            name = self.name,
            component = self.component,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "instance_published",
            span_name = name,
            name = self.name,
            component = self.component,
        )
    }
}

/// A published instance was injected instead of constructing a new one.
///
/// # Log Level
/// `debug!` - Detailed diagnostic information
pub struct InstanceInjected<'a> {
    pub name: &'a str,
    pub component: &'a str,
}

impl Display for InstanceInjected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Injected component '{}' from '{}'", self.component, self.name)
    }
}

impl StructuredLog for InstanceInjected<'_> {
    fn log(&self) {
        tracing::debug!(
            name = self.name,
            component = self.component,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "instance_injected",
            span_name = name,
            name = self.name,
            component = self.component,
        )
    }
}

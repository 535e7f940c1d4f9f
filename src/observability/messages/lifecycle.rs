// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for instance lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Instance construction and state transitions
//! * Loading, skipping and mounting of children
//! * Readiness and failure at an instance's lifecycle boundary

use crate::engine::LifecycleState;
use crate::observability::messages::StructuredLog;
use std::error::Error;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A component instance was created and its configuration applied.
///
/// # Log Level
/// `debug!` - Detailed diagnostic information
///
/// # Example
/// ```
/// use the_assembly::observability::messages::lifecycle::ComponentConstructed;
///
/// let msg = ComponentConstructed {
///     component: "greeter#2",
///     property_count: 3,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct ComponentConstructed<'a> {
    pub component: &'a str,
    pub property_count: usize,
}

impl Display for ComponentConstructed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Constructed component '{}' with {} properties",
            self.component, self.property_count
        )
    }
}

impl StructuredLog for ComponentConstructed<'_> {
    fn log(&self) {
        tracing::debug!(
            component = self.component,
            property_count = self.property_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "component_constructed",
            span_name = name,
            component = self.component,
            property_count = self.property_count,
        )
    }
}

/// An instance moved to its next lifecycle state.
///
/// # Log Level
/// `trace!` - Very detailed diagnostic information
pub struct StateTransition<'a> {
    pub component: &'a str,
    pub from: LifecycleState,
    pub to: LifecycleState,
}

impl Display for StateTransition<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Component '{}': {} -> {}", self.component, self.from, self.to)
    }
}

impl StructuredLog for StateTransition<'_> {
    fn log(&self) {
        tracing::trace!(
            component = self.component,
            from = %self.from,
            to = %self.to,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "state_transition",
            span_name = name,
            component = self.component,
            from = %self.from,
            to = %self.to,
        )
    }
}

/// A declared child reached readiness and was attached to its parent.
///
/// # Log Level
/// `debug!` - Detailed diagnostic information
///
/// # Example
/// ```
/// use the_assembly::observability::messages::lifecycle::ChildLoaded;
///
/// let msg = ChildLoaded {
///     parent: "module#1",
///     child: "greeter#2",
///     position: "modules[0]",
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct ChildLoaded<'a> {
    pub parent: &'a str,
    pub child: &'a str,
    pub position: &'a str,
}

impl Display for ChildLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loaded child '{}' at {} of component '{}'",
            self.child, self.position, self.parent
        )
    }
}

impl StructuredLog for ChildLoaded<'_> {
    fn log(&self) {
        tracing::debug!(
            parent = self.parent,
            child = self.child,
            position = self.position,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "child_loaded",
            span_name = name,
            parent = self.parent,
            child = self.child,
            position = self.position,
        )
    }
}

/// A failed child was left out because the engine continues on error.
///
/// # Log Level
/// `warn!` - Recoverable failure
pub struct ChildSkipped<'a> {
    pub parent: &'a str,
    pub child: &'a str,
    pub position: &'a str,
    pub error: &'a dyn Error,
}

impl Display for ChildSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Skipping child '{}' at {} of component '{}': {}",
            self.child, self.position, self.parent, self.error
        )
    }
}

impl StructuredLog for ChildSkipped<'_> {
    fn log(&self) {
        tracing::warn!(
            parent = self.parent,
            child = self.child,
            position = self.position,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "child_skipped",
            span_name = name,
            parent = self.parent,
            child = self.child,
            position = self.position,
            error = %self.error,
        )
    }
}

/// A child (or one of its properties) was installed on its parent.
///
/// # Log Level
/// `debug!` - Detailed diagnostic information
///
/// # Example
/// ```
/// use the_assembly::observability::messages::lifecycle::ComponentMounted;
///
/// let msg = ComponentMounted {
///     parent: "module#1",
///     child: "store#3",
///     property: "read",
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct ComponentMounted<'a> {
    pub parent: &'a str,
    pub child: &'a str,
    pub property: &'a str,
}

impl Display for ComponentMounted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Mounted '{}' from component '{}' onto '{}'",
            self.property, self.child, self.parent
        )
    }
}

impl StructuredLog for ComponentMounted<'_> {
    fn log(&self) {
        tracing::debug!(
            parent = self.parent,
            child = self.child,
            property = self.property,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "component_mounted",
            span_name = name,
            parent = self.parent,
            child = self.child,
            property = self.property,
        )
    }
}

/// An instance finished initializing and is ready.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ComponentReady<'a> {
    pub component: &'a str,
}

impl Display for ComponentReady<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Component '{}' is ready", self.component)
    }
}

impl StructuredLog for ComponentReady<'_> {
    fn log(&self) {
        tracing::info!(component = self.component, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("component_ready", span_name = name, component = self.component)
    }
}

/// An instance's lifecycle failed; its readiness settles with the error.
///
/// # Log Level
/// `error!` - Failure at the lifecycle boundary
///
/// # Example
/// ```
/// use the_assembly::engine::LifecycleState;
/// use the_assembly::errors::ComposeError;
/// use the_assembly::observability::messages::lifecycle::LifecycleFailed;
///
/// let error = ComposeError::callback("disk full");
/// let msg = LifecycleFailed {
///     component: "store#3",
///     state: LifecycleState::Initializing,
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct LifecycleFailed<'a> {
    pub component: &'a str,
    pub state: LifecycleState,
    pub error: &'a dyn Error,
}

impl Display for LifecycleFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Component '{}' failed while {}: {}",
            self.component, self.state, self.error
        )
    }
}

impl StructuredLog for LifecycleFailed<'_> {
    fn log(&self) {
        tracing::error!(
            component = self.component,
            state = %self.state,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "lifecycle_failed",
            span_name = name,
            component = self.component,
            state = %self.state,
            error = %self.error,
        )
    }
}

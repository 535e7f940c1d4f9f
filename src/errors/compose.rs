// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while composing instances.
//!
//! Every violation is raised synchronously where it happens and then travels
//! up to the lifecycle boundary of the instance being built, where it settles
//! that instance's readiness. The type is `Clone` because a readiness outcome
//! is shared by every observer.

use thiserror::Error;

use crate::value::Kind;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComposeError {
    /// A property is already present on the instance.
    #[error("Property '{property}' is already defined on component '{component}'")]
    NameCollision { component: String, property: String },

    /// A scope name is already bound.
    #[error("Scope name '{name}' is already bound to another instance")]
    DuplicateName { name: String },

    /// Nothing is published under the requested scope name.
    #[error("No instance is published under '{name}' (published: [{}])", .available.join(", "))]
    NotFound { name: String, available: Vec<String> },

    /// Only component instances can be published.
    #[error("Cannot publish '{name}': expected a component, found {kind}")]
    InvalidInstance { name: String, kind: Kind },

    /// A directive key holds a value of the wrong kind.
    #[error("Directive '{directive}' on component '{component}' cannot be a {kind}")]
    InvalidDirectiveShape {
        component: String,
        directive: String,
        kind: Kind,
    },

    /// A mount names a property the child does not have.
    #[error("Component '{component}' has no property '{property}' to expose")]
    MissingExposedProperty { component: String, property: String },

    /// A function used as a mount descriptor must be named.
    #[error("Mount transform for component '{component}' has no name to mount under")]
    AnonymousTransform { component: String },

    /// A property invoked as a method is not a function.
    #[error("Property '{property}' of component '{component}' is not callable")]
    NotCallable { component: String, property: String },

    #[error("Unknown component locator '{locator}' (available: [{}])", .available.join(", "))]
    UnknownLocator {
        locator: String,
        available: Vec<String>,
    },

    #[error("Component locator must be a string, found {kind}")]
    InvalidLocator { kind: Kind },

    #[error("Component locator '{locator}' is already registered")]
    DuplicateLocator { locator: String },

    /// Properties could not be read into a typed configuration.
    #[error("Invalid configuration for component '{component}': {reason}")]
    InvalidConfiguration { component: String, reason: String },

    /// A child's readiness settled with an error.
    #[error("Child '{child}' of component '{parent}' failed")]
    ChildFailed {
        parent: String,
        child: String,
        #[source]
        source: Box<ComposeError>,
    },

    /// A component's initialize hook failed.
    #[error("Component '{component}' failed to initialize: {reason}")]
    Initialize { component: String, reason: String },

    /// Failure raised by a user-supplied function.
    #[error("{reason}")]
    Callback { reason: String },

    /// The lifecycle task ended without reporting an outcome.
    #[error("Lifecycle of component '{component}' ended without an outcome")]
    Abandoned { component: String },
}

impl ComposeError {
    /// Error for user-supplied functions and transforms.
    pub fn callback(reason: impl Into<String>) -> Self {
        Self::Callback {
            reason: reason.into(),
        }
    }

    /// Error for a failing initialize hook.
    pub fn initialize(component: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Initialize {
            component: component.into(),
            reason: reason.into(),
        }
    }

    /// Follow `ChildFailed` wrappers down to the error that started the chain.
    pub fn root_cause(&self) -> &ComposeError {
        match self {
            Self::ChildFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_not_found_lists_available_names() {
        let error = ComposeError::NotFound {
            name: "db".to_string(),
            available: vec!["cache".to_string(), "queue".to_string()],
        };

        assert_eq!(
            error.to_string(),
            "No instance is published under 'db' (published: [cache, queue])"
        );
    }

    #[test]
    fn test_child_failed_exposes_source_and_root_cause() {
        let cause = ComposeError::initialize("leaf#3", "disk full");
        let error = ComposeError::ChildFailed {
            parent: "root#1".to_string(),
            child: "mid#2".to_string(),
            source: Box::new(ComposeError::ChildFailed {
                parent: "mid#2".to_string(),
                child: "leaf#3".to_string(),
                source: Box::new(cause.clone()),
            }),
        };

        assert!(error.source().is_some());
        assert_eq!(error.root_cause(), &cause);
    }
}

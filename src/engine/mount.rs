// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Attaching a ready child to its parent.
//!
//! A mount descriptor takes one of three shapes:
//!
//! - a string: the whole child is installed under that name
//! - a mapping of parent property -> source, where a string source names a
//!   child property (functions come out bound to the child) and a function
//!   source is a transform called with the child
//! - a named function: a transform whose result is installed under the
//!   function's name
//!
//! Every installation goes through [`Instance::define`], so mounting never
//! overwrites an existing parent property.

use crate::config::consts::BASENAME_KEY;
use crate::engine::queue;
use crate::engine::Instance;
use crate::errors::ComposeError;
use crate::observability::messages::lifecycle::ComponentMounted;
use crate::observability::messages::StructuredLog;
use crate::value::{settle, Function, Value};

pub(crate) async fn mount(
    parent: &Instance,
    child: &Instance,
    descriptor: Value,
) -> Result<(), ComposeError> {
    match descriptor {
        Value::Undefined | Value::Null => Ok(()),
        Value::String(name) => install(parent, child, name, Value::Component(child.clone())),
        Value::Object(bindings) => {
            queue(bindings, |source, target| bind(parent, child, source, target)).await?;
            Ok(())
        }
        Value::Function(transform) => {
            let Some(name) = transform.name().map(str::to_string) else {
                return Err(ComposeError::AnonymousTransform {
                    component: child.describe(),
                });
            };
            let value = apply(child, &transform).await?;
            install(parent, child, name, value)
        }
        other => Err(invalid_shape(child, &other)),
    }
}

/// Install `value` on `parent` under `property`.
pub(crate) fn install(
    parent: &Instance,
    child: &Instance,
    property: String,
    value: Value,
) -> Result<(), ComposeError> {
    parent.define(property.clone(), value)?;
    ComponentMounted {
        parent: &parent.describe(),
        child: &child.describe(),
        property: &property,
    }
    .log();
    Ok(())
}

async fn bind(
    parent: &Instance,
    child: &Instance,
    source: Value,
    target: String,
) -> Result<Option<Value>, ComposeError> {
    let value = match source {
        Value::String(property) => match child.get(&property) {
            Some(Value::Function(method)) => Value::Function(method.bind(child.clone())),
            Some(value) => value,
            None => {
                return Err(ComposeError::MissingExposedProperty {
                    component: child.describe(),
                    property,
                })
            }
        },
        Value::Function(transform) => apply(child, &transform).await?,
        other => return Err(invalid_shape(child, &other)),
    };
    install(parent, child, target, value)?;
    Ok(None)
}

async fn apply(child: &Instance, transform: &Function) -> Result<Value, ComposeError> {
    let result = transform.call(&[Value::Component(child.clone())])?;
    settle(result).await
}

fn invalid_shape(child: &Instance, value: &Value) -> ComposeError {
    ComposeError::InvalidDirectiveShape {
        component: child.describe(),
        directive: BASENAME_KEY.to_string(),
        kind: value.kind(),
    }
}

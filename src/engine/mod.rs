// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod factory;
pub mod instance;
pub mod queue;

mod lifecycle;
mod mount;


pub use factory::{Engine, EngineBuilder};
pub use instance::{Instance, LifecycleState, Readiness};
pub use queue::{queue, Sequence};

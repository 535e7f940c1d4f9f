// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod options;
mod registry;

pub mod consts;

pub use options::EngineOptions;
pub use registry::ComponentRegistry;

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod components;  // built-in component types
pub mod config;      // directive keys, options, registry
pub mod engine;      // instances and their lifecycle
pub mod errors;      // error handling
pub mod merge;       // type-directed combine
pub mod observability;
pub mod scope;       // published instances
pub mod traits;      // component and resolver seams
pub mod value;       // configuration values

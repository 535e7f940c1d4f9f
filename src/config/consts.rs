// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Selects the component type of an entry through the resolver
pub const LOCATOR_KEY: &str = "__locator";
/// Reuses an instance already published in the scope
pub const INJECT_KEY: &str = "__inject";
/// Publishes the resolved instance into the scope
pub const DEFINE_KEY: &str = "__define";
/// Mount descriptor: a name, a target -> source mapping, or a named transform
pub const BASENAME_KEY: &str = "__basename";
/// Ordered array of child entries
pub const MODULES_KEY: &str = "modules";
/// Named child entries, each mounted under its key
pub const COMPONENTS_KEY: &str = "components";
/// Per-instance replacement for the component's initialize hook
pub const INITIALIZE_KEY: &str = "initialize";
/// Locator of the base component type every registry starts with
pub const DEFAULT_LOCATOR: &str = "module";

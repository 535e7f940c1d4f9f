// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod module;

#[cfg(test)]
pub mod stub;

pub use module::Module;

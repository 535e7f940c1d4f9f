// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

/// How a parent reacts when a child it awaits settles with an error.
///
/// # Variants
/// * `FailFast` - The parent fails too, wrapping the child's error in `ChildFailed`
/// * `ContinueOnError` - The child is logged and skipped (neither published nor
///   mounted) and the remaining siblings keep loading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStrategy {
    #[default]
    FailFast,
    ContinueOnError,
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod compose;
mod execution;

pub use compose::ComposeError;
pub use execution::FailureStrategy;

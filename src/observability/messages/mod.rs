// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message is a small struct borrowing the data it reports. `Display`
//! renders the human-readable line and [`StructuredLog`] emits it at the
//! message's level with every field attached, so log output stays consistent
//! and free of ad-hoc format strings at call sites.
//!
//! # Organization
//!
//! * `lifecycle` - construction, state transitions, child loading, mounting,
//!   readiness and failure of instances
//! * `scope` - publication and injection of shared instances
//!
//! # Usage Pattern
//!
//! ```rust
//! use the_assembly::observability::messages::lifecycle::ComponentReady;
//! use the_assembly::observability::messages::StructuredLog;
//!
//! let msg = ComponentReady {
//!     component: "module#1",
//! };
//!
//! msg.log();
//! tracing::info!("{}", msg);
//! ```

use tracing::Span;

pub mod lifecycle;
pub mod scope;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a tracing event.
    fn log(&self);

    /// A span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}

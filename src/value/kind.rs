// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Value classification.
//!
//! Every [`Value`] belongs to exactly one [`Kind`]. Kinds double as single bits
//! of a [`KindMask`], so callers can test membership in a set of kinds with one
//! bitwise check:
//!
//! ```rust
//! use the_assembly::value::{Kind, KindMask, Value};
//!
//! let value = Value::from(2.0);
//! assert_eq!(value.kind(), Kind::Integer);
//! assert!(value.is(KindMask::NUMBER));
//! assert!(!value.is(KindMask::STRING | KindMask::NULL));
//! ```

use std::fmt;

use bitflags::bitflags;

use super::Value;

/// The fixed set of shapes a configuration value can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Object,
    Array,
    Null,
    Integer,
    Float,
    Regexp,
    Boolean,
    Function,
    String,
    Undefined,
    Promise,
    Component,
}

impl Kind {
    /// All kinds, in bit order.
    pub const ALL: [Kind; 12] = [
        Kind::Object,
        Kind::Array,
        Kind::Null,
        Kind::Integer,
        Kind::Float,
        Kind::Regexp,
        Kind::Boolean,
        Kind::Function,
        Kind::String,
        Kind::Undefined,
        Kind::Promise,
        Kind::Component,
    ];

    /// Lowercase kind name, also used as the key of combinator overrides in logs.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Object => "object",
            Kind::Array => "array",
            Kind::Null => "null",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::Regexp => "regexp",
            Kind::Boolean => "boolean",
            Kind::Function => "function",
            Kind::String => "string",
            Kind::Undefined => "undefined",
            Kind::Promise => "promise",
            Kind::Component => "component",
        }
    }

    /// The single bit representing this kind.
    pub fn mask(self) -> KindMask {
        match self {
            Kind::Object => KindMask::OBJECT,
            Kind::Array => KindMask::ARRAY,
            Kind::Null => KindMask::NULL,
            Kind::Integer => KindMask::INTEGER,
            Kind::Float => KindMask::FLOAT,
            Kind::Regexp => KindMask::REGEXP,
            Kind::Boolean => KindMask::BOOLEAN,
            Kind::Function => KindMask::FUNCTION,
            Kind::String => KindMask::STRING,
            Kind::Undefined => KindMask::UNDEFINED,
            Kind::Promise => KindMask::PROMISE,
            Kind::Component => KindMask::COMPONENT,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// A set of [`Kind`]s. Masks compose with `|`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct KindMask: u16 {
        const OBJECT    = 1 << 0;
        const ARRAY     = 1 << 1;
        const NULL      = 1 << 2;
        const INTEGER   = 1 << 3;
        const FLOAT     = 1 << 4;
        const REGEXP    = 1 << 5;
        const BOOLEAN   = 1 << 6;
        const FUNCTION  = 1 << 7;
        const STRING    = 1 << 8;
        const UNDEFINED = 1 << 9;
        const PROMISE   = 1 << 10;
        const COMPONENT = 1 << 11;

        const NUMBER = Self::INTEGER.bits() | Self::FLOAT.bits();
    }
}

impl From<Kind> for KindMask {
    fn from(kind: Kind) -> Self {
        kind.mask()
    }
}

impl Value {
    /// Classify this value.
    ///
    /// Numbers are split by their fractional part, so a finite `Float` with no
    /// fractional component is an `Integer`.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Undefined => Kind::Undefined,
            Value::Null => Kind::Null,
            Value::Boolean(_) => Kind::Boolean,
            Value::Integer(_) => Kind::Integer,
            Value::Float(number) if number.is_finite() && number.fract() == 0.0 => Kind::Integer,
            Value::Float(_) => Kind::Float,
            Value::String(_) => Kind::String,
            Value::Regexp(_) => Kind::Regexp,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
            Value::Function(_) => Kind::Function,
            Value::Promise(_) => Kind::Promise,
            Value::Component(_) => Kind::Component,
        }
    }

    /// Whether this value's kind is part of `mask`.
    pub fn is(&self, mask: impl Into<KindMask>) -> bool {
        mask.into().contains(self.kind().mask())
    }
}

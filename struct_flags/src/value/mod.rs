//! The closed set of primitive flag types and their textual decoders.
//!
//! Defaults written in annotations and values supplied on the command line go
//! through the same decoder, so `-num=0x10` and a default of `0x10` agree.

mod duration;
mod integer;
mod slot;

use std::fmt;
use std::time::Duration;

use thiserror::Error;

pub(crate) use slot::FieldSlot;

/// Primitive kinds a flag field may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagKind {
    /// `String`.
    Text,
    /// `bool`; the only kind that may appear without a value.
    Bool,
    /// `isize`.
    Int,
    /// `i64`.
    Int64,
    /// `usize`.
    Uint,
    /// `u64`.
    Uint64,
    /// `f64`.
    Float64,
    /// `std::time::Duration`, written Go-style (`1h30m`, `250ms`).
    Duration,
}

impl FlagKind {
    /// Short type label used in usage text and error messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Text => "string",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int64 => "int64",
            Self::Uint => "uint",
            Self::Uint64 => "uint64",
            Self::Float64 => "float64",
            Self::Duration => "duration",
        }
    }

    /// The value a field of this kind holds before anything is written.
    #[must_use]
    pub const fn zero(self) -> FlagValue {
        match self {
            Self::Text => FlagValue::Text(String::new()),
            Self::Bool => FlagValue::Bool(false),
            Self::Int => FlagValue::Int(0),
            Self::Int64 => FlagValue::Int64(0),
            Self::Uint => FlagValue::Uint(0),
            Self::Uint64 => FlagValue::Uint64(0),
            Self::Float64 => FlagValue::Float64(0.0),
            Self::Duration => FlagValue::Duration(Duration::ZERO),
        }
    }

    /// Decodes `text` as a value of this kind.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] when `text` is not a valid literal of the
    /// kind or does not fit its width.
    pub fn decode(self, text: &str) -> Result<FlagValue, ValueError> {
        let fail = |reason: String| ValueError {
            kind: self,
            text: text.to_owned(),
            reason,
        };
        match self {
            Self::Text => Ok(FlagValue::Text(text.to_owned())),
            Self::Bool => parse_bool(text).map(FlagValue::Bool).ok_or_else(|| {
                fail("expected one of 1, t, true, 0, f, false".to_owned())
            }),
            Self::Int => integer::parse_signed(text)
                .and_then(|v| isize::try_from(v).map_err(|e| e.to_string()))
                .map(FlagValue::Int)
                .map_err(fail),
            Self::Int64 => integer::parse_signed(text)
                .and_then(|v| i64::try_from(v).map_err(|e| e.to_string()))
                .map(FlagValue::Int64)
                .map_err(fail),
            Self::Uint => integer::parse_unsigned(text)
                .and_then(|v| usize::try_from(v).map_err(|e| e.to_string()))
                .map(FlagValue::Uint)
                .map_err(fail),
            Self::Uint64 => integer::parse_unsigned(text)
                .and_then(|v| u64::try_from(v).map_err(|e| e.to_string()))
                .map(FlagValue::Uint64)
                .map_err(fail),
            Self::Float64 => text
                .parse::<f64>()
                .map(FlagValue::Float64)
                .map_err(|e| fail(e.to_string())),
            Self::Duration => duration::parse(text)
                .map(FlagValue::Duration)
                .map_err(fail),
        }
    }

    /// Decodes `text`, treating an empty string as the zero value.
    ///
    /// # Errors
    ///
    /// Propagates [`FlagKind::decode`] failures for non-empty input.
    pub fn decode_default(self, text: &str) -> Result<FlagValue, ValueError> {
        if text.is_empty() {
            Ok(self.zero())
        } else {
            self.decode(text)
        }
    }
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A decoded flag value.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagValue {
    /// Text value.
    Text(String),
    /// Boolean value.
    Bool(bool),
    /// Platform-width signed integer.
    Int(isize),
    /// 64-bit signed integer.
    Int64(i64),
    /// Platform-width unsigned integer.
    Uint(usize),
    /// 64-bit unsigned integer.
    Uint64(u64),
    /// 64-bit float.
    Float64(f64),
    /// Duration.
    Duration(Duration),
}

impl FlagValue {
    /// Kind of this value.
    #[must_use]
    pub const fn kind(&self) -> FlagKind {
        match self {
            Self::Text(_) => FlagKind::Text,
            Self::Bool(_) => FlagKind::Bool,
            Self::Int(_) => FlagKind::Int,
            Self::Int64(_) => FlagKind::Int64,
            Self::Uint(_) => FlagKind::Uint,
            Self::Uint64(_) => FlagKind::Uint64,
            Self::Float64(_) => FlagKind::Float64,
            Self::Duration(_) => FlagKind::Duration,
        }
    }
}

/// A literal that failed to decode as its flag kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} value {text:?}: {reason}")]
pub struct ValueError {
    /// Kind the text was decoded as.
    pub kind: FlagKind,
    /// Offending text.
    pub text: String,
    /// Why decoding failed.
    pub reason: String,
}

fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

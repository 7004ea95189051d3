//! Typed write targets resolved from a field reference.

use std::any::Any;
use std::time::Duration;

use super::{FlagKind, FlagValue};

/// A mutable reference to a field of one of the supported primitive types.
pub(crate) enum FieldSlot<'a> {
    Text(&'a mut String),
    Bool(&'a mut bool),
    Int(&'a mut isize),
    Int64(&'a mut i64),
    Uint(&'a mut usize),
    Uint64(&'a mut u64),
    Float64(&'a mut f64),
    Duration(&'a mut Duration),
}

impl<'a> FieldSlot<'a> {
    /// Resolves `value` to a slot, or `None` when its type is unsupported.
    pub(crate) fn resolve(value: &'a mut (dyn Any + 'static)) -> Option<Self> {
        if value.is::<String>() {
            value.downcast_mut().map(Self::Text)
        } else if value.is::<bool>() {
            value.downcast_mut().map(Self::Bool)
        } else if value.is::<isize>() {
            value.downcast_mut().map(Self::Int)
        } else if value.is::<i64>() {
            value.downcast_mut().map(Self::Int64)
        } else if value.is::<usize>() {
            value.downcast_mut().map(Self::Uint)
        } else if value.is::<u64>() {
            value.downcast_mut().map(Self::Uint64)
        } else if value.is::<f64>() {
            value.downcast_mut().map(Self::Float64)
        } else if value.is::<Duration>() {
            value.downcast_mut().map(Self::Duration)
        } else {
            None
        }
    }

    pub(crate) const fn kind(&self) -> FlagKind {
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

    /// Whether the field still holds its kind's zero value.
    pub(crate) fn is_zero(&self) -> bool {
        match self {
            Self::Text(v) => v.is_empty(),
            Self::Bool(v) => !**v,
            Self::Int(v) => **v == 0,
            Self::Int64(v) => **v == 0,
            Self::Uint(v) => **v == 0,
            Self::Uint64(v) => **v == 0,
            Self::Float64(v) => **v == 0.0,
            Self::Duration(v) => v.is_zero(),
        }
    }

    /// Writes `value` into the field. Returns `false` on a kind mismatch,
    /// leaving the field untouched.
    pub(crate) fn assign(self, value: FlagValue) -> bool {
        match (self, value) {
            (Self::Text(slot), FlagValue::Text(v)) => *slot = v,
            (Self::Bool(slot), FlagValue::Bool(v)) => *slot = v,
            (Self::Int(slot), FlagValue::Int(v)) => *slot = v,
            (Self::Int64(slot), FlagValue::Int64(v)) => *slot = v,
            (Self::Uint(slot), FlagValue::Uint(v)) => *slot = v,
            (Self::Uint64(slot), FlagValue::Uint64(v)) => *slot = v,
            (Self::Float64(slot), FlagValue::Float64(v)) => *slot = v,
            (Self::Duration(slot), FlagValue::Duration(v)) => *slot = v,
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn resolves_every_supported_type() {
        let mut text = String::new();
        let mut flag = false;
        let mut int = 0_isize;
        let mut int64 = 0_i64;
        let mut uint = 0_usize;
        let mut uint64 = 0_u64;
        let mut float = 0.0_f64;
        let mut duration = Duration::ZERO;
        let kinds: Vec<Option<FlagKind>> = vec![
            FieldSlot::resolve(&mut text).map(|s| s.kind()),
            FieldSlot::resolve(&mut flag).map(|s| s.kind()),
            FieldSlot::resolve(&mut int).map(|s| s.kind()),
            FieldSlot::resolve(&mut int64).map(|s| s.kind()),
            FieldSlot::resolve(&mut uint).map(|s| s.kind()),
            FieldSlot::resolve(&mut uint64).map(|s| s.kind()),
            FieldSlot::resolve(&mut float).map(|s| s.kind()),
            FieldSlot::resolve(&mut duration).map(|s| s.kind()),
        ];
        assert_eq!(
            kinds,
            [
                FlagKind::Text,
                FlagKind::Bool,
                FlagKind::Int,
                FlagKind::Int64,
                FlagKind::Uint,
                FlagKind::Uint64,
                FlagKind::Float64,
                FlagKind::Duration,
            ]
            .map(Some)
        );
    }

    #[rstest]
    fn unsupported_types_do_not_resolve() {
        let mut list: Vec<String> = Vec::new();
        let mut small = 0_u8;
        assert!(FieldSlot::resolve(&mut list).is_none());
        assert!(FieldSlot::resolve(&mut small).is_none());
    }

    #[rstest]
    fn assign_then_zero_check() {
        let mut port = 0_isize;
        assert!(FieldSlot::resolve(&mut port).is_some_and(|s| s.is_zero()));
        let written =
            FieldSlot::resolve(&mut port).is_some_and(|s| s.assign(FlagValue::Int(8080)));
        assert!(written);
        assert_eq!(port, 8080);
        assert!(FieldSlot::resolve(&mut port).is_some_and(|s| !s.is_zero()));
    }

    #[rstest]
    fn assign_rejects_mismatched_kind() {
        let mut name = String::from("kept");
        let written =
            FieldSlot::resolve(&mut name).is_some_and(|s| s.assign(FlagValue::Bool(true)));
        assert!(!written);
        assert_eq!(name, "kept");
    }
}

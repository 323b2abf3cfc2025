//! Host-level comparison between values.
//!
//! `bool`, `int` and `float` compare numerically and exactly with each other,
//! sequences compare lexicographically, sets compare by inclusion. A `None`
//! result from `try_order` means the pair does not support ordering.
//!
//! `Number` is shared with `PartialEq`/`Hash` on `Value`, so dict keys and set
//! members that are numerically equal collide.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use super::{Heap, Value};

/// Numeric view of a value, if it has one.
#[derive(Clone, Copy)]
pub(super) enum Number {
    Int(i64),
    Float(f64),
}

// 2^63, exactly representable as f64.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

impl Number {
    pub(super) fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Number::Int(i64::from(*b))),
            Value::Int(n) => Some(Number::Int(*n)),
            Value::Float(x) => Some(Number::Float(*x)),
            _ => None,
        }
    }

    /// Exact comparison; `None` only when a NaN is involved.
    pub(super) fn partial_cmp(self, other: Self) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
            (Number::Int(a), Number::Float(b)) => cmp_int_float(a, b),
            (Number::Float(a), Number::Int(b)) => cmp_int_float(b, a).map(Ordering::reverse),
            (Number::Float(a), Number::Float(b)) => a.partial_cmp(&b),
        }
    }

    /// Equality for `PartialEq`: numeric, except that NaN equals NaN so the
    /// relation stays reflexive.
    pub(super) fn same(self, other: Self) -> bool {
        match (self, other) {
            (Number::Float(a), Number::Float(b)) if a.is_nan() => b.is_nan(),
            _ => self.partial_cmp(other) == Some(Ordering::Equal),
        }
    }

    /// Hash consistent with `same`: integral floats and bools hash as the
    /// equal `i64`.
    pub(super) fn hash<H: Hasher>(self, state: &mut H) {
        match self {
            Number::Int(n) => n.hash(state),
            Number::Float(x) => match integral(x) {
                Some(n) => n.hash(state),
                None if x.is_nan() => f64::NAN.to_bits().hash(state),
                None => x.to_bits().hash(state),
            },
        }
    }
}

/// `x` as an `i64` when it is integral and in range.
#[expect(
    clippy::cast_possible_truncation,
    reason = "range and integrality are checked before the cast"
)]
fn integral(x: f64) -> Option<i64> {
    (x.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&x)).then(|| x as i64)
}

// Compares without rounding `a` to f64: the float is split into its integer
// part, compared as `i64`, and its fractional part, which breaks ties.
#[expect(
    clippy::cast_possible_truncation,
    reason = "the truncated value is in i64 range"
)]
fn cmp_int_float(a: i64, b: f64) -> Option<Ordering> {
    if b.is_nan() {
        return None;
    }
    if b >= I64_BOUND {
        return Some(Ordering::Less);
    }
    if b < -I64_BOUND {
        return Some(Ordering::Greater);
    }
    let whole = b.trunc();
    let ordering = a.cmp(&(whole as i64)).then_with(|| {
        if b > whole {
            Ordering::Less
        } else if b < whole {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    });
    Some(ordering)
}

impl Value {
    /// Host-level equality. Never fails: values of unrelated kinds are unequal.
    pub fn loose_eq(&self, other: &Value) -> bool {
        if let (Some(a), Some(b)) = (Number::of(self), Number::of(other)) {
            return a.partial_cmp(b) == Some(Ordering::Equal);
        }
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.loose_eq(y))
            }
            (Value::Dict(a), Value::Dict(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(key, x)| b.get(key).is_some_and(|y| x.loose_eq(y)))
            }
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Heap::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Host-level ordering, or `None` when the pair is not orderable.
    ///
    /// Sets are partially ordered by inclusion: `Less` means proper subset,
    /// and two sets where neither contains the other yield `None`.
    pub fn try_order(&self, other: &Value) -> Option<Ordering> {
        if let (Some(a), Some(b)) = (Number::of(self), Number::of(other)) {
            return a.partial_cmp(b);
        }
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => Some(a.as_str().cmp(b.as_str())),
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => {
                order_sequences(a, b)
            }
            (Value::Set(a), Value::Set(b)) => match (a.is_subset(b), b.is_subset(a)) {
                (true, true) => Some(Ordering::Equal),
                (true, false) => Some(Ordering::Less),
                (false, true) => Some(Ordering::Greater),
                (false, false) => None,
            },
            _ => None,
        }
    }
}

// The first unequal pair decides; a common prefix defers to length.
fn order_sequences(a: &[Value], b: &[Value]) -> Option<Ordering> {
    match a.iter().zip(b).find(|(x, y)| !x.loose_eq(y)) {
        Some((x, y)) => x.try_order(y),
        None => Some(a.len().cmp(&b.len())),
    }
}

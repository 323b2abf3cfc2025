//! Comparison predicates over extracted values.

use std::cmp::Ordering;
use std::fmt;

use matchable_types::Value;

/// Comparison operator of a predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl CompareOp {
    pub const ALL: [CompareOp; 6] = [
        CompareOp::Lt,
        CompareOp::Le,
        CompareOp::Gt,
        CompareOp::Ge,
        CompareOp::Eq,
        CompareOp::Ne,
    ];

    pub const fn symbol(self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
        }
    }

    /// Apply the operator as `lhs op rhs`.
    ///
    /// Equality is defined for every pair. Ordering operators on a pair that
    /// does not support ordering evaluate to `false`.
    pub fn apply(self, lhs: &Value, rhs: &Value) -> bool {
        match self {
            CompareOp::Eq => lhs.loose_eq(rhs),
            CompareOp::Ne => !lhs.loose_eq(rhs),
            CompareOp::Lt => lhs.try_order(rhs).is_some_and(Ordering::is_lt),
            CompareOp::Le => lhs.try_order(rhs).is_some_and(Ordering::is_le),
            CompareOp::Gt => lhs.try_order(rhs).is_some_and(Ordering::is_gt),
            CompareOp::Ge => lhs.try_order(rhs).is_some_and(Ordering::is_ge),
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Immutable test `extracted op operand`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Predicate {
    op: CompareOp,
    operand: Value,
}

impl Predicate {
    pub fn new(op: CompareOp, operand: impl Into<Value>) -> Self {
        Predicate {
            op,
            operand: operand.into(),
        }
    }

    #[inline]
    pub fn op(&self) -> CompareOp {
        self.op
    }

    #[inline]
    pub fn operand(&self) -> &Value {
        &self.operand
    }

    /// Evaluate against an extracted value. Never fails.
    pub fn eval(&self, actual: &Value) -> bool {
        self.op.apply(actual, &self.operand)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op, self.operand)
    }
}

#[cfg(test)]
mod tests;

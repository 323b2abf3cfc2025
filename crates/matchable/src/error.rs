//! Error taxonomy of the engine.
//!
//! Construction errors (`PatternError`, `SpecError`) are caller bugs and
//! surface at build time. `MatchError::NoMatch` is the only error a normal
//! `match` caller is expected to handle. Accessor failures and unsupported
//! comparisons are never errors: the pattern simply does not apply.

use matchable_types::{TypeId, Value};
use thiserror::Error;

use crate::{CompareOp, PatternId};

/// Malformed pattern construction.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PatternError {
    /// A comparison was requested on a pattern with no attribute or item
    /// selected: there is nothing to compare.
    #[error(
        "cannot apply `{op}` to a type pattern for {target:?}: select an attribute or item first"
    )]
    MissingAccessor { target: TypeId, op: CompareOp },
}

/// Invalid set of bindings.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("pattern {id:?} is bound more than once")]
    DuplicatePattern { id: PatternId },
}

/// Failure to match an object.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MatchError {
    /// No pattern applied; carries the object for diagnostics.
    #[error("no matching patterns found for object {object}")]
    NoMatch { object: Value },

    /// The object's runtime type is not in the type registry.
    #[error("object type {0:?} is not registered")]
    UnknownType(TypeId),
}

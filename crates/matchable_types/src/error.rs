//! Errors raised while building the type hierarchy.

use thiserror::Error;

use crate::TypeId;

/// Failure to define or modify a type.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("type '{name}' is already defined")]
    DuplicateName { name: String },

    #[error("type '{name}' names unknown base {base:?}")]
    UnknownBase { name: String, base: TypeId },

    #[error("duplicate base class '{duplicate}' in type '{name}'")]
    DuplicateBase { name: String, duplicate: String },

    #[error(
        "cannot create a consistent method resolution order for type '{name}' \
         (conflicting bases: {conflicting:?})"
    )]
    InconsistentMro {
        name: String,
        conflicting: Vec<String>,
    },

    #[error("unknown type {0:?}")]
    UnknownType(TypeId),
}

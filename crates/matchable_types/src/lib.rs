//! Matchable Types - runtime type hierarchy and value model.
//!
//! This crate provides the host-side collaborators of the matching engine:
//! - `TypeRegistry`: built-in and user-defined types with cached C3 ancestry
//! - `Value`: dynamic runtime values with attribute/item access
//! - Host-level comparison (`Value::loose_eq`, `Value::try_order`)
//!
//! # Ancestry
//!
//! Every type's linearization is computed once, when the type is defined.
//! `TypeRegistry::ancestry` hands out a borrowed view, most general type
//! first, so lookups during matching never allocate.

mod error;
pub mod mro;
mod registry;
mod value;

pub use error::TypeError;
pub use mro::Mro;
pub use registry::{Ancestry, SharedTypeRegistry, TypeDef, TypeEntry, TypeId, TypeRegistry};
pub use value::{DictValue, Heap, ObjectValue, SetValue, Value};

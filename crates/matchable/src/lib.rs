//! Matchable - declarative object classification.
//!
//! This crate provides:
//! - Typed patterns (`Pattern`, `PatternBuilder`) over a type hierarchy
//! - Immutable specifications binding patterns to values (`Spec`)
//! - Precedence-ordered matching driven by the object's ancestry
//! - Pluggable merge strategies for combining matched values (`Wrapper`)
//!
//! # Matching
//!
//! `Spec::match_value` selects every pattern that applies to an object,
//! orders them from least to most specific, and folds their values left to
//! right. Later values refine earlier ones: replace by default, key-wise
//! update for dicts, union for sets.
//!
//! ```text
//! let spec = Spec::builder(&types)
//!     .bind(plant, Value::dict([("color", "green")]))
//!     .bind(Pattern::for_type(flower).attr("petals").gt(5)?, Value::dict([("color", "red")]))
//!     .build()?;
//! spec.match_value(&types, &rose)?  // {"color": "red"}
//! ```
//!
//! The type hierarchy and runtime values come from `matchable_types`, which
//! this crate re-exports.

mod error;
mod pattern;
mod predicate;
mod spec;
mod wrapper;

pub use error::{MatchError, PatternError, SpecError};
pub use pattern::{Accessor, Pattern, PatternBuilder, PatternId};
pub use predicate::{CompareOp, Predicate};
pub use spec::{Binding, Precedence, Spec, SpecBuilder};
pub use wrapper::{CombineFn, CustomWrapper, Wrapped, Wrapper, WrapperRegistry};

pub use matchable_types::{
    Ancestry, DictValue, ObjectValue, SetValue, SharedTypeRegistry, TypeDef, TypeError, TypeId,
    TypeRegistry, Value,
};

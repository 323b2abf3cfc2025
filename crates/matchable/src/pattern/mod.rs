//! Typed patterns and the fluent builder that produces them.
//!
//! A pattern pairs a target type with an optional accessor and predicate:
//!
//! ```text
//! Pattern::for_type(point).build()                  // every Point
//! Pattern::for_type(point).attr("x").gt(0)?         // Points with x > 0
//! Pattern::for_type(TypeId::DICT).item("key").eq(0)? // dicts with d["key"] == 0
//! Pattern::for_type(point).attr("label").build()    // Points that have a label
//! ```
//!
//! # Identity
//!
//! Each built pattern receives a fresh `PatternId`. Two structurally
//! identical patterns stay distinct; a clone shares its original's id.
//! `PartialEq`/`Hash` follow the id, `same_shape` compares structure.

use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use matchable_types::{TypeId, TypeRegistry, Value};

use crate::{CompareOp, PatternError, Predicate};

static NEXT_PATTERN_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of a pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatternId(u64);

impl PatternId {
    fn fresh() -> Self {
        PatternId(NEXT_PATTERN_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// How a pattern extracts the value its predicate looks at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Accessor {
    /// The candidate itself; type-only patterns.
    Object,
    /// Attribute lookup by name.
    Attr(String),
    /// Item lookup by key or index.
    Item(Value),
}

impl Accessor {
    /// Extract the accessed value, or `None` when the attribute or item is
    /// missing.
    pub fn resolve(&self, types: &TypeRegistry, obj: &Value) -> Option<Value> {
        match self {
            Accessor::Object => Some(obj.clone()),
            Accessor::Attr(name) => obj.attr(types, name),
            Accessor::Item(key) => obj.item(key),
        }
    }
}

/// A typed matcher. Immutable once built.
#[derive(Clone, Debug)]
pub struct Pattern {
    id: PatternId,
    target: TypeId,
    accessor: Accessor,
    predicate: Option<Predicate>,
}

impl Pattern {
    /// Start building a pattern for `target`.
    pub fn for_type(target: TypeId) -> PatternBuilder {
        PatternBuilder {
            target,
            accessor: Accessor::Object,
        }
    }

    /// Assemble a pattern from its parts.
    ///
    /// A predicate requires an attribute or item accessor.
    pub fn new(
        target: TypeId,
        accessor: Accessor,
        predicate: Option<Predicate>,
    ) -> Result<Self, PatternError> {
        if let (Accessor::Object, Some(predicate)) = (&accessor, &predicate) {
            return Err(PatternError::MissingAccessor {
                target,
                op: predicate.op(),
            });
        }
        Ok(Pattern {
            id: PatternId::fresh(),
            target,
            accessor,
            predicate,
        })
    }

    #[inline]
    pub fn id(&self) -> PatternId {
        self.id
    }

    #[inline]
    pub fn target(&self) -> TypeId {
        self.target
    }

    pub fn accessor(&self) -> &Accessor {
        &self.accessor
    }

    pub fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    /// Type-based patterns test the candidate's type only.
    #[inline]
    pub fn is_type_based(&self) -> bool {
        matches!(self.accessor, Accessor::Object)
    }

    /// Structural equality, ignoring identity.
    pub fn same_shape(&self, other: &Pattern) -> bool {
        self.target == other.target
            && self.accessor == other.accessor
            && self.predicate == other.predicate
    }

    /// Whether the pattern applies to `obj`, type check included.
    #[cfg(test)]
    fn matches(&self, types: &TypeRegistry, obj: &Value) -> bool {
        types.is_subtype(obj.type_id(), self.target) && self.test(types, obj)
    }

    /// Accessor and predicate check; the caller has established the type.
    pub(crate) fn test(&self, types: &TypeRegistry, obj: &Value) -> bool {
        if self.is_type_based() {
            return true;
        }
        let Some(actual) = self.accessor.resolve(types, obj) else {
            return false;
        };
        self.predicate
            .as_ref()
            .is_none_or(|predicate| predicate.eval(&actual))
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Pattern {}

impl Hash for Pattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Bare type shorthand: a type-based pattern for `target`.
impl From<TypeId> for Pattern {
    fn from(target: TypeId) -> Self {
        Pattern::for_type(target).build()
    }
}

impl From<PatternBuilder> for Pattern {
    fn from(builder: PatternBuilder) -> Self {
        builder.build()
    }
}

/// Fluent builder returned by `Pattern::for_type`.
///
/// Usable as-is for a type pattern. `attr`/`item` select what the
/// comparison methods look at; without a comparison, the selection becomes a
/// presence test.
#[derive(Clone, Debug)]
#[must_use]
pub struct PatternBuilder {
    target: TypeId,
    accessor: Accessor,
}

impl PatternBuilder {
    pub fn attr(mut self, name: impl Into<String>) -> Self {
        self.accessor = Accessor::Attr(name.into());
        self
    }

    pub fn item(mut self, key: impl Into<Value>) -> Self {
        self.accessor = Accessor::Item(key.into());
        self
    }

    /// Finalize with a comparison against `operand`.
    pub fn compare(self, op: CompareOp, operand: impl Into<Value>) -> Result<Pattern, PatternError> {
        Pattern::new(
            self.target,
            self.accessor,
            Some(Predicate::new(op, operand)),
        )
    }

    pub fn lt(self, operand: impl Into<Value>) -> Result<Pattern, PatternError> {
        self.compare(CompareOp::Lt, operand)
    }

    pub fn le(self, operand: impl Into<Value>) -> Result<Pattern, PatternError> {
        self.compare(CompareOp::Le, operand)
    }

    pub fn gt(self, operand: impl Into<Value>) -> Result<Pattern, PatternError> {
        self.compare(CompareOp::Gt, operand)
    }

    pub fn ge(self, operand: impl Into<Value>) -> Result<Pattern, PatternError> {
        self.compare(CompareOp::Ge, operand)
    }

    pub fn eq(self, operand: impl Into<Value>) -> Result<Pattern, PatternError> {
        self.compare(CompareOp::Eq, operand)
    }

    pub fn ne(self, operand: impl Into<Value>) -> Result<Pattern, PatternError> {
        self.compare(CompareOp::Ne, operand)
    }

    /// Finalize without a predicate.
    pub fn build(self) -> Pattern {
        Pattern {
            id: PatternId::fresh(),
            target: self.target,
            accessor: self.accessor,
            predicate: None,
        }
    }
}

//! Matching specifications: ordered pattern-to-value bindings.
//!
//! A `Spec` is built once from its bindings and is immutable afterwards,
//! so it can serve any number of concurrent `match_value` calls.
//!
//! # Wrapper snapshot
//!
//! The merge strategy of each bound value is resolved while the spec is
//! built, from the injected `WrapperRegistry` (or the global one). Later
//! registrations never affect a spec that already exists.

mod matching;

use matchable_types::{TypeId, TypeRegistry, Value};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

pub use matching::Precedence;

use crate::{Pattern, PatternId, SpecError, Wrapped, Wrapper, WrapperRegistry};

/// A pattern paired with its payload.
#[derive(Clone, Debug)]
pub struct Binding {
    pattern: Pattern,
    value: Value,
    wrapper: Option<Wrapper>,
}

impl Binding {
    pub fn new(pattern: impl Into<Pattern>, value: impl Into<Value>) -> Self {
        Binding {
            pattern: pattern.into(),
            value: value.into(),
            wrapper: None,
        }
    }

    /// Use `wrapper` for this value instead of resolving one from the registry.
    #[must_use]
    pub fn with_wrapper(mut self, wrapper: Wrapper) -> Self {
        self.wrapper = Some(wrapper);
        self
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl<P: Into<Pattern>, V: Into<Value>> From<(P, V)> for Binding {
    fn from((pattern, value): (P, V)) -> Self {
        Binding::new(pattern, value)
    }
}

struct Entry {
    pattern: Pattern,
    value: Wrapped,
}

/// Bindings whose pattern targets one type, as indices into `Spec::entries`.
#[derive(Default)]
struct TypeGroup {
    type_based: SmallVec<[usize; 2]>,
    attribute_based: SmallVec<[usize; 4]>,
}

/// Immutable, ordered collection of bindings supporting `match_value`.
pub struct Spec {
    entries: Vec<Entry>,
    groups: FxHashMap<TypeId, TypeGroup>,
    /// Attribute-based entries in insertion order.
    attribute_order: Vec<usize>,
    by_id: FxHashMap<PatternId, usize>,
}

impl Spec {
    /// Build from `bindings`, resolving merge strategies from the global
    /// wrapper registry.
    pub fn from_bindings<I, B>(types: &TypeRegistry, bindings: I) -> Result<Spec, SpecError>
    where
        I: IntoIterator<Item = B>,
        B: Into<Binding>,
    {
        Spec::builder(types).extend(bindings).build()
    }

    pub fn builder(types: &TypeRegistry) -> SpecBuilder<'_> {
        SpecBuilder {
            types,
            wrappers: None,
            bindings: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value bound to `pattern` (by identity).
    pub fn get(&self, pattern: &Pattern) -> Option<&Value> {
        self.entry(pattern).map(|entry| entry.value.value())
    }

    /// Merge strategy captured for `pattern`'s value.
    pub fn wrapper(&self, pattern: &Pattern) -> Option<&Wrapper> {
        self.entry(pattern).map(|entry| entry.value.wrapper())
    }

    fn entry(&self, pattern: &Pattern) -> Option<&Entry> {
        self.by_id
            .get(&pattern.id())
            .map(|&slot| &self.entries[slot])
    }

    /// Bindings in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&Pattern, &Value)> {
        self.entries
            .iter()
            .map(|entry| (&entry.pattern, entry.value.value()))
    }
}

impl std::fmt::Debug for Spec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Accumulates bindings for a `Spec`.
#[must_use]
pub struct SpecBuilder<'a> {
    types: &'a TypeRegistry,
    wrappers: Option<&'a WrapperRegistry>,
    bindings: Vec<Binding>,
}

impl<'a> SpecBuilder<'a> {
    /// Resolve merge strategies from `wrappers` instead of the global registry.
    pub fn wrappers(mut self, wrappers: &'a WrapperRegistry) -> Self {
        self.wrappers = Some(wrappers);
        self
    }

    pub fn bind(self, pattern: impl Into<Pattern>, value: impl Into<Value>) -> Self {
        self.binding(Binding::new(pattern, value))
    }

    pub fn binding(mut self, binding: Binding) -> Self {
        self.bindings.push(binding);
        self
    }

    pub fn extend<I, B>(mut self, bindings: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Binding>,
    {
        self.bindings.extend(bindings.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Result<Spec, SpecError> {
        match self.wrappers {
            Some(wrappers) => assemble(self.types, wrappers, self.bindings),
            None => {
                let global = WrapperRegistry::global().read();
                assemble(self.types, &global, self.bindings)
            }
        }
    }
}

#[tracing::instrument(level = "debug", skip_all, fields(bindings = bindings.len()))]
fn assemble(
    types: &TypeRegistry,
    wrappers: &WrapperRegistry,
    bindings: Vec<Binding>,
) -> Result<Spec, SpecError> {
    let mut spec = Spec {
        entries: Vec::with_capacity(bindings.len()),
        groups: FxHashMap::default(),
        attribute_order: Vec::new(),
        by_id: FxHashMap::default(),
    };

    for (slot, binding) in bindings.into_iter().enumerate() {
        let Binding {
            pattern,
            value,
            wrapper,
        } = binding;

        if spec.by_id.insert(pattern.id(), slot).is_some() {
            return Err(SpecError::DuplicatePattern { id: pattern.id() });
        }

        let group = spec.groups.entry(pattern.target()).or_default();
        if pattern.is_type_based() {
            group.type_based.push(slot);
        } else {
            group.attribute_based.push(slot);
            spec.attribute_order.push(slot);
        }

        let wrapper = wrapper.unwrap_or_else(|| wrappers.resolve(types, &value));
        spec.entries.push(Entry {
            pattern,
            value: wrapper.wrap(value),
        });
    }

    tracing::debug!(
        types = spec.groups.len(),
        attribute_based = spec.attribute_order.len(),
        "spec built"
    );
    Ok(spec)
}

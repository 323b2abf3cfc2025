//! Merge strategies for combining the values of matched patterns.
//!
//! Every bound value is paired with a `Wrapper` when its `Spec` is built.
//! Folding runs left to right, and the accumulated value's wrapper decides
//! how the next value is merged in:
//!
//! - `Replace`: the right-hand side wins (the default for every type)
//! - `Update`: key-wise update for dicts, union for sets
//! - `Custom`: a caller-supplied combine function
//!
//! `Update` and `Custom` fall back to the right-hand side when the pair
//! cannot be merged, so a fold never fails.
//!
//! # Registry
//!
//! `WrapperRegistry` maps types to wrappers. Resolution walks the value's
//! MRO, so subtypes inherit their ancestor's strategy. A process-wide
//! instance is available through `WrapperRegistry::global()`; isolated
//! registries can be injected through `SpecBuilder::wrappers`.

use std::fmt;
use std::sync::{Arc, LazyLock};

use matchable_types::{DictValue, SetValue, TypeId, TypeRegistry, Value};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Signature of a custom combine function. `None` means the pair cannot be
/// combined and the right-hand side wins.
pub type CombineFn = dyn Fn(&Value, &Value) -> Option<Value> + Send + Sync;

/// A named, caller-supplied merge strategy.
#[derive(Clone)]
pub struct CustomWrapper {
    name: Arc<str>,
    combine: Arc<CombineFn>,
}

impl CustomWrapper {
    pub fn new<F>(name: &str, combine: F) -> Self
    where
        F: Fn(&Value, &Value) -> Option<Value> + Send + Sync + 'static,
    {
        CustomWrapper {
            name: Arc::from(name),
            combine: Arc::new(combine),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for CustomWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Custom({})", self.name)
    }
}

/// Two custom wrappers are equal when they share the same function.
impl PartialEq for CustomWrapper {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.combine, &other.combine)
    }
}

/// Merge strategy attached to a value.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Wrapper {
    /// Discard the left-hand side.
    #[default]
    Replace,
    /// Copy the left-hand side, then update (dict) or union (set) with the right.
    Update,
    Custom(CustomWrapper),
}

impl Wrapper {
    pub fn custom<F>(name: &str, combine: F) -> Self
    where
        F: Fn(&Value, &Value) -> Option<Value> + Send + Sync + 'static,
    {
        Wrapper::Custom(CustomWrapper::new(name, combine))
    }

    /// Pair `value` with this strategy.
    pub fn wrap(&self, value: Value) -> Wrapped {
        Wrapped {
            value,
            wrapper: self.clone(),
        }
    }
}

/// A value together with the strategy that merges into it.
#[derive(Clone, Debug, PartialEq)]
pub struct Wrapped {
    value: Value,
    wrapper: Wrapper,
}

impl Wrapped {
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn wrapper(&self) -> &Wrapper {
        &self.wrapper
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Merge `rhs` into `self` using `self`'s wrapper.
    ///
    /// The result keeps `self`'s wrapper when a merge happened, and is `rhs`
    /// itself whenever the right-hand side wins.
    #[must_use]
    pub fn combine(&self, rhs: &Wrapped) -> Wrapped {
        let merged = match &self.wrapper {
            Wrapper::Replace => None,
            // An explicit replace on the right always wins.
            Wrapper::Update if matches!(rhs.wrapper, Wrapper::Replace) => None,
            Wrapper::Update => update(&self.value, &rhs.value),
            Wrapper::Custom(custom) => (custom.combine)(&self.value, &rhs.value),
        };
        match merged {
            Some(value) => self.wrapper.wrap(value),
            None => rhs.clone(),
        }
    }
}

// Dict-subtype and set-subtype instances merge through their payload.
fn as_dict(value: &Value) -> Option<&DictValue> {
    match value {
        Value::Object(object) => object.payload().and_then(Value::as_dict),
        _ => value.as_dict(),
    }
}

fn as_set(value: &Value) -> Option<&SetValue> {
    match value {
        Value::Object(object) => object.payload().and_then(Value::as_set),
        _ => value.as_set(),
    }
}

fn update(lhs: &Value, rhs: &Value) -> Option<Value> {
    if let Some(dict) = as_dict(lhs) {
        let mut merged = dict.clone();
        merged.update(as_dict(rhs)?);
        return Some(merged.into());
    }
    if let Some(set) = as_set(lhs) {
        let mut merged = set.clone();
        merged.extend(as_set(rhs)?.iter());
        return Some(merged.into());
    }
    None
}

static GLOBAL: LazyLock<RwLock<WrapperRegistry>> =
    LazyLock::new(|| RwLock::new(WrapperRegistry::new()));

/// Type-keyed registry of merge strategies.
#[derive(Clone, Debug)]
pub struct WrapperRegistry {
    entries: FxHashMap<TypeId, Wrapper>,
}

impl WrapperRegistry {
    /// Registry with the built-in entries: `object` replaces, `dict` and
    /// `set` update.
    pub fn new() -> Self {
        let mut entries = FxHashMap::default();
        entries.insert(TypeId::OBJECT, Wrapper::Replace);
        entries.insert(TypeId::DICT, Wrapper::Update);
        entries.insert(TypeId::SET, Wrapper::Update);
        WrapperRegistry { entries }
    }

    /// The process-wide registry used by `Spec::from_bindings`.
    ///
    /// Registration must happen before the specs that depend on it are built.
    pub fn global() -> &'static RwLock<WrapperRegistry> {
        &GLOBAL
    }

    /// Set the strategy for `ty`, returning the one it replaces.
    pub fn register(&mut self, ty: TypeId, wrapper: Wrapper) -> Option<Wrapper> {
        tracing::debug!(?ty, ?wrapper, "registering wrapper");
        self.entries.insert(ty, wrapper)
    }

    pub fn unregister(&mut self, ty: TypeId) -> Option<Wrapper> {
        tracing::debug!(?ty, "unregistering wrapper");
        self.entries.remove(&ty)
    }

    /// Strategy registered for exactly `ty`.
    pub fn get(&self, ty: TypeId) -> Option<&Wrapper> {
        self.entries.get(&ty)
    }

    /// Strategy for `value`: the entry of the most-derived registered type
    /// in its MRO, `Replace` when none is registered.
    pub fn resolve(&self, types: &TypeRegistry, value: &Value) -> Wrapper {
        types
            .mro(value.type_id())
            .and_then(|mro| mro.iter().find_map(|ty| self.entries.get(ty)))
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for WrapperRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

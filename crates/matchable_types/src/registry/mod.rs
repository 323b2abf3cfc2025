//! Registry of runtime types and their ancestry.
//!
//! The `TypeRegistry` owns every type a `Value` can carry: the built-in kinds
//! and user-defined types with (possibly multiple) bases. Each type's MRO is
//! linearized once when the type is defined and cached in its entry.
//!
//! # Design
//!
//! - Dense `Vec` storage: a `TypeId` is an index into the entry table
//! - Built-ins occupy the first slots so their ids are constants
//! - Name index via `FxHashMap` for O(1) lookup by name

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::mro::{linearize, Mro};
use crate::{TypeError, Value};

/// Handle to a type stored in a `TypeRegistry`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    /// Root of every hierarchy.
    pub const OBJECT: TypeId = TypeId(0);
    pub const NONE: TypeId = TypeId(1);
    pub const INT: TypeId = TypeId(2);
    /// Derives from `INT`.
    pub const BOOL: TypeId = TypeId(3);
    pub const FLOAT: TypeId = TypeId(4);
    pub const STR: TypeId = TypeId(5);
    pub const LIST: TypeId = TypeId(6);
    pub const TUPLE: TypeId = TypeId(7);
    pub const DICT: TypeId = TypeId(8);
    pub const SET: TypeId = TypeId(9);

    /// Number of built-in types pre-registered by `TypeRegistry::new`.
    pub const BUILTIN_COUNT: usize = 10;

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        TypeId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Description of a user-defined type, consumed by `TypeRegistry::define`.
#[derive(Clone, Debug)]
pub struct TypeDef {
    name: String,
    bases: SmallVec<[TypeId; 2]>,
    attrs: Vec<(String, Value)>,
}

impl TypeDef {
    /// Start a definition. Without explicit bases the type derives from `object`.
    pub fn new(name: impl Into<String>) -> Self {
        TypeDef {
            name: name.into(),
            bases: SmallVec::new(),
            attrs: Vec::new(),
        }
    }

    /// Append a direct base. Declaration order is significant for the MRO.
    #[must_use]
    pub fn base(mut self, ty: TypeId) -> Self {
        self.bases.push(ty);
        self
    }

    /// Add a class-level attribute default, visible on every instance.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }
}

/// A registered type.
#[derive(Clone, Debug)]
pub struct TypeEntry {
    pub name: String,
    pub bases: SmallVec<[TypeId; 2]>,
    /// Linearization, most-derived first.
    pub mro: Mro,
    /// Class-level attribute defaults.
    pub attrs: BTreeMap<String, Value>,
}

/// Ancestry chain of a type, most general first, the type itself last.
///
/// A view over the cached MRO read back to front.
#[derive(Clone, Copy, Debug)]
pub struct Ancestry<'a> {
    mro: &'a [TypeId],
}

impl<'a> Ancestry<'a> {
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = TypeId> + ExactSizeIterator + 'a {
        self.mro.iter().rev().copied()
    }

    #[inline]
    pub fn contains(&self, ty: TypeId) -> bool {
        self.mro.contains(&ty)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.mro.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mro.is_empty()
    }

    /// The type the chain was computed for.
    pub fn most_derived(&self) -> Option<TypeId> {
        self.mro.first().copied()
    }

    pub fn to_vec(&self) -> Vec<TypeId> {
        self.iter().collect()
    }
}

/// Registry of runtime types.
#[derive(Clone, Debug)]
pub struct TypeRegistry {
    entries: Vec<TypeEntry>,
    by_name: FxHashMap<String, TypeId>,
}

impl TypeRegistry {
    /// Create a registry holding the built-in types.
    pub fn new() -> Self {
        let mut registry = TypeRegistry {
            entries: Vec::with_capacity(TypeId::BUILTIN_COUNT * 2),
            by_name: FxHashMap::default(),
        };
        registry.push_builtin("object", None);
        registry.push_builtin("NoneType", Some(TypeId::OBJECT));
        registry.push_builtin("int", Some(TypeId::OBJECT));
        registry.push_builtin("bool", Some(TypeId::INT));
        registry.push_builtin("float", Some(TypeId::OBJECT));
        registry.push_builtin("str", Some(TypeId::OBJECT));
        registry.push_builtin("list", Some(TypeId::OBJECT));
        registry.push_builtin("tuple", Some(TypeId::OBJECT));
        registry.push_builtin("dict", Some(TypeId::OBJECT));
        registry.push_builtin("set", Some(TypeId::OBJECT));
        debug_assert_eq!(registry.entries.len(), TypeId::BUILTIN_COUNT);
        registry
    }

    // Built-ins use single inheritance, so the MRO is the base's MRO prefixed
    // with the type itself.
    fn push_builtin(&mut self, name: &str, base: Option<TypeId>) {
        let ty = self.next_id();
        let mut mro = Mro::new();
        mro.push(ty);
        let mut bases = SmallVec::new();
        if let Some(base) = base {
            mro.extend_from_slice(&self.entries[base.index()].mro);
            bases.push(base);
        }
        self.by_name.insert(name.to_owned(), ty);
        self.entries.push(TypeEntry {
            name: name.to_owned(),
            bases,
            mro,
            attrs: BTreeMap::new(),
        });
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "registries never approach u32::MAX types"
    )]
    fn next_id(&self) -> TypeId {
        TypeId(self.entries.len() as u32)
    }

    /// Define a new type, linearizing its ancestry.
    #[tracing::instrument(level = "debug", skip_all, fields(name = %def.name))]
    pub fn define(&mut self, def: TypeDef) -> Result<TypeId, TypeError> {
        let TypeDef {
            name,
            mut bases,
            attrs,
        } = def;

        if self.by_name.contains_key(&name) {
            return Err(TypeError::DuplicateName { name });
        }
        if bases.is_empty() {
            bases.push(TypeId::OBJECT);
        }
        for (i, base) in bases.iter().enumerate() {
            if self.entry(*base).is_none() {
                return Err(TypeError::UnknownBase { name, base: *base });
            }
            if bases[i + 1..].contains(base) {
                let duplicate = self.display_name(*base);
                return Err(TypeError::DuplicateBase { name, duplicate });
            }
        }

        let ty = self.next_id();
        let mro = linearize(ty, &bases, |base| self.mro(base).map(Mro::from_slice))
            .map_err(|conflict| TypeError::InconsistentMro {
                name: name.clone(),
                conflicting: conflict
                    .heads
                    .iter()
                    .map(|&head| self.display_name(head))
                    .collect(),
            })?;

        tracing::debug!(?ty, mro_len = mro.len(), "defined type");
        self.by_name.insert(name.clone(), ty);
        self.entries.push(TypeEntry {
            name,
            bases,
            mro,
            attrs: attrs.into_iter().collect(),
        });
        Ok(ty)
    }

    /// Set or replace a class-level attribute on an existing type.
    pub fn set_class_attr(
        &mut self,
        ty: TypeId,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), TypeError> {
        let entry = self
            .entries
            .get_mut(ty.index())
            .ok_or(TypeError::UnknownType(ty))?;
        entry.attrs.insert(name.into(), value.into());
        Ok(())
    }

    pub fn entry(&self, ty: TypeId) -> Option<&TypeEntry> {
        self.entries.get(ty.index())
    }

    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, ty: TypeId) -> Option<&str> {
        self.entry(ty).map(|entry| entry.name.as_str())
    }

    fn display_name(&self, ty: TypeId) -> String {
        match self.name(ty) {
            Some(name) => name.to_owned(),
            None => format!("{ty:?}"),
        }
    }

    /// Linearization, most-derived first.
    pub fn mro(&self, ty: TypeId) -> Option<&[TypeId]> {
        self.entry(ty).map(|entry| entry.mro.as_slice())
    }

    /// Ancestry chain, most general first.
    pub fn ancestry(&self, ty: TypeId) -> Option<Ancestry<'_>> {
        self.mro(ty).map(|mro| Ancestry { mro })
    }

    /// Whether `sub` is `sup` or derives from it.
    pub fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool {
        self.mro(sub).is_some_and(|mro| mro.contains(&sup))
    }

    /// Look up a class-level attribute along the MRO of `ty`.
    pub fn class_attr(&self, ty: TypeId, name: &str) -> Option<&Value> {
        self.mro(ty)?
            .iter()
            .find_map(|&ancestor| self.entries[ancestor.index()].attrs.get(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the built-ins are present from construction.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe handle for hosts that define types from several places.
///
/// Matching only needs `&TypeRegistry`: take a read guard for the duration
/// of a batch of calls.
#[derive(Clone, Default)]
pub struct SharedTypeRegistry(Arc<RwLock<TypeRegistry>>);

impl SharedTypeRegistry {
    pub fn new(registry: TypeRegistry) -> Self {
        SharedTypeRegistry(Arc::new(RwLock::new(registry)))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.0.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.0.write()
    }

    /// Define a type under the write lock.
    pub fn define(&self, def: TypeDef) -> Result<TypeId, TypeError> {
        self.0.write().define(def)
    }
}

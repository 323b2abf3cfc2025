//! Instances of registered types.

use std::collections::BTreeMap;

use super::Value;
use crate::TypeId;

/// An instance of a registered type.
///
/// Instance attributes shadow class-level defaults. An instance of a type
/// that extends a built-in container carries the container in `payload`,
/// which serves item access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectValue {
    ty: TypeId,
    attrs: BTreeMap<String, Value>,
    payload: Option<Value>,
}

impl ObjectValue {
    pub fn new(ty: TypeId) -> Self {
        ObjectValue {
            ty,
            attrs: BTreeMap::new(),
            payload: None,
        }
    }

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_payload(mut self, payload: impl Into<Value>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    #[inline]
    pub fn ty(&self) -> TypeId {
        self.ty
    }

    /// Instance attribute only; class defaults are resolved by `Value::attr`.
    pub fn own_attr(&self, name: &str) -> Option<&Value> {
        self.attrs.get(name)
    }

    pub fn attrs(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> {
        self.attrs.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }
}

//! Runtime values: the objects being classified and the payloads bound to
//! patterns.
//!
//! # Arc Enforcement
//!
//! Heap-backed variants hold a `Heap<T>`, whose constructor is private to
//! this module. All allocation goes through the factory methods:
//!
//! ```text
//! let s = Value::string("hello");
//! let d = Value::dict([("a", 1), ("b", 2)]);
//! let o = Value::object(ObjectValue::new(point).with_attr("x", 1));
//! ```
//!
//! Cloning a `Value` is therefore cheap, and values can be shared freely
//! across threads.
//!
//! # Equality
//!
//! `PartialEq`/`Hash` are lawful so values can key dicts and sets. Numbers
//! compare by numeric value across `bool`, `int` and `float` (`1`, `1.0` and
//! `True` are the same key), NaN equals itself, objects compare by identity.
//! The host-level comparison used by predicates lives in `compare`.

mod collections;
mod compare;
mod heap;
mod object;

use std::fmt;
use std::hash::{Hash, Hasher};

pub use collections::{DictValue, SetValue};
pub use heap::Heap;
pub use object::ObjectValue;

use compare::Number;

use crate::{TypeId, TypeRegistry};

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Heap<String>),
    List(Heap<Vec<Value>>),
    Tuple(Heap<Vec<Value>>),
    Dict(Heap<DictValue>),
    Set(Heap<SetValue>),
    /// Instance of a registered type.
    Object(Heap<ObjectValue>),
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn float(x: f64) -> Self {
        Value::Float(x)
    }

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    pub fn list<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::List(Heap::new(items.into_iter().map(Into::into).collect()))
    }

    pub fn tuple<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::Tuple(Heap::new(items.into_iter().map(Into::into).collect()))
    }

    /// Create a dict from key/value pairs; later duplicates overwrite earlier ones.
    ///
    /// ```text
    /// let style = Value::dict([("color", "red")]);
    /// ```
    pub fn dict<K: Into<Value>, V: Into<Value>>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        Value::Dict(Heap::new(entries.into_iter().collect()))
    }

    pub fn set<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::Set(Heap::new(items.into_iter().collect()))
    }

    #[inline]
    pub fn object(object: ObjectValue) -> Self {
        Value::Object(Heap::new(object))
    }
}

impl Value {
    /// Runtime type of this value.
    pub fn type_id(&self) -> TypeId {
        match self {
            Value::None => TypeId::NONE,
            Value::Bool(_) => TypeId::BOOL,
            Value::Int(_) => TypeId::INT,
            Value::Float(_) => TypeId::FLOAT,
            Value::Str(_) => TypeId::STR,
            Value::List(_) => TypeId::LIST,
            Value::Tuple(_) => TypeId::TUPLE,
            Value::Dict(_) => TypeId::DICT,
            Value::Set(_) => TypeId::SET,
            Value::Object(object) => object.ty(),
        }
    }

    /// Resolve attribute `name`: instance attributes first, then class-level
    /// defaults along the MRO.
    pub fn attr(&self, types: &TypeRegistry, name: &str) -> Option<Value> {
        if let Value::Object(object) = self {
            if let Some(value) = object.own_attr(name) {
                return Some(value.clone());
            }
        }
        types.class_attr(self.type_id(), name).cloned()
    }

    /// Resolve item `key`.
    ///
    /// Dicts look up the key; lists, tuples and strings take an integer index
    /// where negative indices count from the end. Objects delegate to their
    /// built-in payload.
    pub fn item(&self, key: &Value) -> Option<Value> {
        match self {
            Value::Dict(dict) => dict.get(key).cloned(),
            Value::List(items) | Value::Tuple(items) => {
                let slot = sequence_slot(key, items.len())?;
                items.get(slot).cloned()
            }
            Value::Str(s) => {
                let slot = sequence_slot(key, s.chars().count())?;
                s.chars().nth(slot).map(Value::from)
            }
            Value::Object(object) => object.payload()?.item(key),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&DictValue> {
        match self {
            Value::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&SetValue> {
        match self {
            Value::Set(set) => Some(set),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }
}

fn sequence_slot(key: &Value, len: usize) -> Option<usize> {
    let index = match key {
        Value::Int(n) => *n,
        Value::Bool(b) => i64::from(*b),
        _ => return None,
    };
    let len = i64::try_from(len).ok()?;
    let slot = if index < 0 { index.checked_add(len)? } else { index };
    if slot < len {
        usize::try_from(slot).ok()
    } else {
        None
    }
}

impl From<DictValue> for Value {
    fn from(dict: DictValue) -> Self {
        Value::Dict(Heap::new(dict))
    }
}

impl From<SetValue> for Value {
    fn from(set: SetValue) -> Self {
        Value::Set(Heap::new(set))
    }
}

impl From<ObjectValue> for Value {
    fn from(object: ObjectValue) -> Self {
        Value::object(object)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::string(c)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::None
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (Number::of(self), Number::of(other)) {
            return a.same(b);
        }
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Dict(a), Value::Dict(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Heap::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if let Some(number) = Number::of(self) {
            return number.hash(state);
        }
        std::mem::discriminant(self).hash(state);
        match self {
            Value::None | Value::Bool(_) | Value::Int(_) | Value::Float(_) => {}
            Value::Str(s) => s.hash(state),
            Value::List(items) | Value::Tuple(items) => items.hash(state),
            Value::Dict(dict) => dict.hash(state),
            Value::Set(set) => set.hash(state),
            Value::Object(object) => Heap::hash_ptr(object, state),
        }
    }
}

fn write_seq<'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = &'a Value>,
) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Str(s) => write!(f, "{:?}", s.as_str()),
            Value::List(items) => {
                write!(f, "[")?;
                write_seq(f, items.iter())?;
                write!(f, "]")
            }
            Value::Tuple(items) => {
                write!(f, "(")?;
                write_seq(f, items.iter())?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Value::Dict(dict) => {
                write!(f, "{{")?;
                for (i, (key, value)) in dict.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
            Value::Set(set) if set.is_empty() => write!(f, "set()"),
            Value::Set(set) => {
                write!(f, "{{")?;
                write_seq(f, set.iter())?;
                write!(f, "}}")
            }
            Value::Object(object) => {
                write!(f, "<object of type {}", object.ty().raw())?;
                for (name, value) in object.attrs() {
                    write!(f, " {name}={value}")?;
                }
                if let Some(payload) = object.payload() {
                    write!(f, " {payload}")?;
                }
                write!(f, ">")
            }
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

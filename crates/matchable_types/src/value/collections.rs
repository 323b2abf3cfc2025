//! Insertion-ordered dict and set payloads.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHashMap;

use super::Value;

/// Mapping from values to values that remembers insertion order.
///
/// Updating an existing key keeps its original position.
#[derive(Clone, Debug, Default)]
pub struct DictValue {
    entries: Vec<(Value, Value)>,
    index: FxHashMap<Value, usize>,
}

impl DictValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite, returning the previous value for `key`.
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        if let Some(&slot) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[slot].1, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.index.contains_key(key)
    }

    /// Key-wise update: keys of `other` overwrite or extend `self`.
    pub fn update(&mut self, other: &DictValue) {
        for (key, value) in other.iter() {
            self.insert(key.clone(), value.clone());
        }
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &Value> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<Value>, V: Into<Value>> FromIterator<(K, V)> for DictValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = DictValue::new();
        for (key, value) in iter {
            dict.insert(key.into(), value.into());
        }
        dict
    }
}

/// Equality ignores insertion order.
impl PartialEq for DictValue {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl Eq for DictValue {}

// Order-insensitive equality: only the size is stable across equal dicts.
impl Hash for DictValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
    }
}

/// Set of values that remembers insertion order.
#[derive(Clone, Debug, Default)]
pub struct SetValue {
    items: Vec<Value>,
    index: FxHashMap<Value, usize>,
}

impl SetValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `item`, returning whether it was new.
    pub fn insert(&mut self, item: Value) -> bool {
        if self.index.contains_key(&item) {
            return false;
        }
        self.index.insert(item.clone(), self.items.len());
        self.items.push(item);
        true
    }

    pub fn contains(&self, item: &Value) -> bool {
        self.index.contains_key(item)
    }

    /// Union in place with every element yielded by `items`.
    pub fn extend<'a>(&mut self, items: impl IntoIterator<Item = &'a Value>) {
        for item in items {
            self.insert(item.clone());
        }
    }

    pub fn is_subset(&self, other: &SetValue) -> bool {
        self.len() <= other.len() && self.iter().all(|item| other.contains(item))
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Value> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Into<Value>> FromIterator<T> for SetValue {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = SetValue::new();
        for item in iter {
            set.insert(item.into());
        }
        set
    }
}

impl PartialEq for SetValue {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl Eq for SetValue {}

impl Hash for SetValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
    }
}

//! Attribute records
//!
//! An attribute record is the private state behind one instance. Its key
//! set is decided while the record is built and frozen once it is
//! installed in a [`ContextStore`](crate::ContextStore).

use std::collections::BTreeMap;
use std::fmt;

/// Key of an attribute record
///
/// Implemented by one enum per interface family so records of different
/// families can never be mixed up.
pub trait AttributeKey: Copy + Ord + fmt::Debug {
    /// Script-visible name of the attribute
    fn name(self) -> &'static str;
}

/// Fixed-shape attribute record
#[derive(Debug, Clone)]
pub struct AttributeRecord<K, V> {
    entries: BTreeMap<K, V>,
}

impl<K: AttributeKey, V> AttributeRecord<K, V> {
    /// Create an empty record
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add an attribute while building the record
    ///
    /// A repeated key overwrites the earlier initial value.
    pub fn with(mut self, key: K, value: V) -> Self {
        self.entries.insert(key, value);
        self
    }

    /// Get an attribute value
    pub fn get(&self, key: K) -> Option<&V> {
        self.entries.get(&key)
    }

    /// Check whether the key is part of the record
    pub fn contains(&self, key: K) -> bool {
        self.entries.contains_key(&key)
    }

    /// Replace the value of an existing key.
    ///
    /// Returns the displaced value, or hands `value` back if `key` was never
    /// part of the record.
    pub(crate) fn replace(&mut self, key: K, value: V) -> Result<V, V> {
        match self.entries.get_mut(&key) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => Err(value),
        }
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: AttributeKey, V> Default for AttributeRecord<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: AttributeKey, V> FromIterator<(K, V)> for AttributeRecord<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

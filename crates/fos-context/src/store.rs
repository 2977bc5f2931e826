//! Context store
//!
//! Maps instance identity to its attribute record. The store never owns
//! the instance: the instance owns a handle whose drop releases the entry,
//! so an unreachable instance never leaves state behind.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{DomResult, InternalError};
use crate::guard::{Receiver, guard};
use crate::record::{AttributeKey, AttributeRecord};

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Process-unique instance identity. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct InstanceId(u64);

impl InstanceId {
    /// Mint a fresh identity
    pub fn next() -> Self {
        InstanceId(NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw value
    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Store shared by every instance of an interface family
pub type SharedStore<K, V> = Rc<RefCell<ContextStore<K, V>>>;

/// Side table of attribute records
pub struct ContextStore<K, V> {
    /// Interface family name, used in error messages
    family: &'static str,
    records: HashMap<InstanceId, AttributeRecord<K, V>>,
}

impl<K: AttributeKey, V> ContextStore<K, V> {
    /// Create an empty store
    pub fn new(family: &'static str) -> Self {
        Self {
            family,
            records: HashMap::new(),
        }
    }

    /// Create an empty store ready to be shared between handles
    pub fn shared(family: &'static str) -> SharedStore<K, V> {
        Rc::new(RefCell::new(Self::new(family)))
    }

    /// Install the record for `id`. Each identity gets exactly one record.
    pub fn create(&mut self, id: InstanceId, record: AttributeRecord<K, V>) -> DomResult<()> {
        if self.records.contains_key(&id) {
            return Err(InternalError::DuplicateRecord {
                interface: self.family,
                instance: id.value(),
            }
            .into());
        }
        self.records.insert(id, record);
        Ok(())
    }

    /// Read an attribute of the receiver's record
    pub fn get(&self, receiver: &Receiver, key: K) -> DomResult<&V> {
        let id = guard(receiver)?;
        let record = self.records.get(&id).ok_or(InternalError::MissingRecord {
            interface: receiver.interface(),
            attribute: key.name(),
        })?;
        record.get(key).ok_or_else(|| {
            InternalError::UnknownAttribute {
                interface: receiver.interface(),
                attribute: key.name(),
            }
            .into()
        })
    }

    /// Write an attribute of the receiver's record, returning the displaced value.
    ///
    /// The key must already be part of the record.
    pub fn set(&mut self, receiver: &Receiver, key: K, value: V) -> DomResult<V> {
        let id = guard(receiver)?;
        let record = self
            .records
            .get_mut(&id)
            .ok_or(InternalError::MissingRecord {
                interface: receiver.interface(),
                attribute: key.name(),
            })?;
        record.replace(key, value).map_err(|_rejected| {
            InternalError::UnknownAttribute {
                interface: receiver.interface(),
                attribute: key.name(),
            }
            .into()
        })
    }

    /// Remove the record for `id`
    pub fn release(&mut self, id: InstanceId) -> Option<AttributeRecord<K, V>> {
        self.records.remove(&id)
    }

    /// Check whether `id` has a record
    pub fn contains(&self, id: InstanceId) -> bool {
        self.records.contains_key(&id)
    }

    /// Number of live records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<K, V> fmt::Debug for ContextStore<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Records stay opaque.
        f.debug_struct("ContextStore")
            .field("family", &self.family)
            .field("records", &self.records.len())
            .finish()
    }
}

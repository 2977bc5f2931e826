//! Owning instance handle
//!
//! Every interface instance embeds one [`ContextHandle`]. Constructing the
//! handle installs the instance's record; dropping it releases the record.

use std::fmt;
use std::rc::Rc;

use crate::error::{DomResult, InternalError};
use crate::guard::Receiver;
use crate::record::{AttributeKey, AttributeRecord};
use crate::store::{InstanceId, SharedStore};

/// Typed view of a record value
pub trait FromSlot<V>: Sized {
    fn from_slot(value: V) -> Option<Self>;
}

/// Handle tying an instance to its record
pub struct ContextHandle<K: AttributeKey, V> {
    receiver: Receiver,
    store: SharedStore<K, V>,
}

impl<K: AttributeKey, V: Clone> ContextHandle<K, V> {
    /// Mint an identity and install `record` for it
    pub fn install(
        store: &SharedStore<K, V>,
        interface: &'static str,
        record: AttributeRecord<K, V>,
    ) -> DomResult<Self> {
        let id = InstanceId::next();
        store.borrow_mut().create(id, record)?;
        Ok(Self {
            receiver: Receiver::Instance { id, interface },
            store: Rc::clone(store),
        })
    }

    /// Handle for an interface's shared behavior object. It has no record.
    pub fn interface_object(store: &SharedStore<K, V>, interface: &'static str) -> Self {
        Self {
            receiver: Receiver::Interface(interface),
            store: Rc::clone(store),
        }
    }

    /// The receiver accessors run against
    pub fn receiver(&self) -> &Receiver {
        &self.receiver
    }

    /// Instance identity, `None` for interface objects
    pub fn id(&self) -> Option<InstanceId> {
        self.receiver.instance_id()
    }

    /// Interface name of the instance
    pub fn interface(&self) -> &'static str {
        self.receiver.interface()
    }

    /// Read an attribute
    pub fn get(&self, key: K) -> DomResult<V> {
        let store = self.store.borrow();
        store.get(&self.receiver, key).cloned()
    }

    /// Read an attribute as `T`
    pub fn read<T: FromSlot<V>>(&self, key: K) -> DomResult<T> {
        let value = self.get(key)?;
        T::from_slot(value).ok_or_else(|| {
            InternalError::UnexpectedValue {
                interface: self.interface(),
                attribute: key.name(),
            }
            .into()
        })
    }

    /// Write an attribute that is already part of the record
    pub fn set(&self, key: K, value: impl Into<V>) -> DomResult<()> {
        // The displaced value may own other instances; drop it only after
        // the store borrow has ended.
        let displaced = self.store.borrow_mut().set(&self.receiver, key, value.into())?;
        drop(displaced);
        Ok(())
    }
}

impl<K: AttributeKey, V> Drop for ContextHandle<K, V> {
    fn drop(&mut self) {
        let Receiver::Instance { id, interface } = self.receiver else {
            return;
        };
        let released = match self.store.try_borrow_mut() {
            Ok(mut store) => store.release(id),
            Err(_) => {
                tracing::warn!("Cannot release {} {}: context store is borrowed", interface, id);
                None
            }
        };
        drop(released);
    }
}

impl<K: AttributeKey, V> fmt::Debug for ContextHandle<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ContextHandle").field(&self.receiver).finish()
    }
}

//! Invocation guard
//!
//! Binding layers can hold an interface's shared behavior object (the thing
//! every instance delegates method lookup to) just like a real instance.
//! Accessors must reject it before touching any private state.

use crate::error::{DomError, DomResult};
use crate::store::InstanceId;

/// The object an accessor is invoked on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Receiver {
    /// A constructed instance of `interface`
    Instance {
        id: InstanceId,
        interface: &'static str,
    },
    /// The shared behavior object of an interface
    Interface(&'static str),
    /// The universal root every interface object delegates to
    Root,
}

impl Receiver {
    /// The receiver method lookup is delegated to
    pub fn delegate(&self) -> Option<Receiver> {
        match *self {
            Receiver::Instance { interface, .. } => Some(Receiver::Interface(interface)),
            Receiver::Interface(_) => Some(Receiver::Root),
            Receiver::Root => None,
        }
    }

    /// Interface name of the receiver
    pub fn interface(&self) -> &'static str {
        match *self {
            Receiver::Instance { interface, .. } | Receiver::Interface(interface) => interface,
            Receiver::Root => "Object",
        }
    }

    /// Instance identity, if this is a genuine instance
    pub fn instance_id(&self) -> Option<InstanceId> {
        match *self {
            Receiver::Instance { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// Reject receivers that are not genuine instances.
///
/// Two delegation steps from an instance land on the universal root; two
/// steps from an interface object run off the end of the chain.
pub fn guard(receiver: &Receiver) -> DomResult<InstanceId> {
    let grandparent = receiver.delegate().and_then(|parent| parent.delegate());
    match (grandparent, receiver.instance_id()) {
        (Some(_), Some(id)) => Ok(id),
        _ => Err(DomError::IllegalInvocation),
    }
}

//! fOS Context - private instance state
//!
//! DOM interfaces expose a fixed public surface while their mutable state
//! lives in a side table keyed by instance identity. This crate provides
//! that table, the receiver guard every accessor runs first, and the error
//! types shared by all interfaces built on top of it.

mod coerce;
mod error;
mod guard;
mod handle;
mod record;
mod store;

pub use coerce::{number_to_string, to_boolean, to_dom_string, to_nullable_dom_string};
pub use error::{DomError, DomResult, ErrorKind, InternalError, REPORT_URL};
pub use guard::{Receiver, guard};
pub use handle::{ContextHandle, FromSlot};
pub use record::{AttributeKey, AttributeRecord};
pub use store::{ContextStore, InstanceId, SharedStore};

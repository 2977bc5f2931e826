//! Event object model
//!
//! [`Event`] and [`CustomEvent`] keep their state in a per-thread context
//! store. Dispatch itself is delegated to an [`EventDispatcher`].

mod custom_event;
mod dispatch;
mod event;
mod phase;
mod record;
mod target;

pub use custom_event::CustomEvent;
pub use dispatch::{DispatchScope, EventDispatcher};
pub use event::{Event, EventInit};
pub use phase::EventPhase;
pub use target::EventTarget;

//! EventTarget

use fos_context::{DomError, DomResult};

/// Abstract capability every node delegates from. It cannot be constructed.
#[derive(Debug)]
pub struct EventTarget {
    _private: (),
}

impl EventTarget {
    pub const INTERFACE: &'static str = "EventTarget";

    /// `new EventTarget()`
    pub fn construct() -> DomResult<EventTarget> {
        Err(DomError::IllegalConstructor)
    }
}

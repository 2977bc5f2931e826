//! CustomEvent

use std::fmt;
use std::ops::Deref;

use fos_context::DomResult;
use serde::Serialize;
use serde_json::Value;

use super::event::{Event, EventInit};
use super::record::EventKey;

/// Event carrying an application-defined `detail`
#[derive(Clone, PartialEq, Serialize)]
pub struct CustomEvent {
    #[serde(flatten)]
    event: Event,
}

impl CustomEvent {
    pub const INTERFACE: &'static str = "CustomEvent";

    /// `new CustomEvent(type, eventInitDict)`
    pub fn new(event_type: &str, init: EventInit) -> DomResult<CustomEvent> {
        let event = Event::create(Self::INTERFACE, event_type.to_string(), init)?;
        Ok(CustomEvent { event })
    }

    /// `new CustomEvent(...args)` with script arguments
    pub fn construct(args: &[Value]) -> DomResult<CustomEvent> {
        let event = Event::construct_as(Self::INTERFACE, "CustomEventInit", args)?;
        Ok(CustomEvent { event })
    }

    pub fn interface_object() -> CustomEvent {
        CustomEvent {
            event: Event::interface_object_of(Self::INTERFACE),
        }
    }

    /// `detail`; `None` when none was supplied
    pub fn detail(&self) -> DomResult<Option<Value>> {
        self.event.read(EventKey::Detail)
    }

    /// Legacy `initCustomEvent(type, bubbles, cancelable, detail)`
    pub fn init_custom_event(
        &self,
        event_type: &str,
        bubbles: bool,
        cancelable: bool,
        detail: Option<Value>,
    ) -> DomResult<()> {
        if self.event.is_dispatching()? {
            return Ok(());
        }
        self.event.write(EventKey::Type, event_type.to_string())?;
        self.event.write(EventKey::Bubbles, bubbles)?;
        self.event.write(EventKey::Cancelable, cancelable)?;
        self.event.write(EventKey::Detail, detail)
    }

    pub fn as_event(&self) -> &Event {
        &self.event
    }
}

impl Deref for CustomEvent {
    type Target = Event;

    fn deref(&self) -> &Event {
        &self.event
    }
}

impl From<CustomEvent> for Event {
    fn from(event: CustomEvent) -> Event {
        event.event
    }
}

impl fmt::Debug for CustomEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CustomEvent").field(&self.event).finish()
    }
}

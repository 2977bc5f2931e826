//! Event
//!
//! An `Event` carries a single public field, `is_trusted`. Everything else
//! lives in the thread's event store and is only reachable through the
//! accessors below, each of which rejects the interface object first.

use std::fmt;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use fos_context::{
    ContextHandle, ContextStore, DomError, DomResult, FromSlot, SharedStore, to_boolean,
    to_dom_string,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::custom_event::CustomEvent;
use super::phase::EventPhase;
use super::record::{EventKey, EventSlot, InitialState, initial_record};
use crate::nodes::{Node, WeakNode};

thread_local! {
    static EVENT_STORE: SharedStore<EventKey, EventSlot> = ContextStore::shared("Event");
}

/// `EventInit` dictionary
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventInit {
    #[serde(deserialize_with = "truthy")]
    pub bubbles: bool,
    #[serde(deserialize_with = "truthy")]
    pub cancelable: bool,
    #[serde(deserialize_with = "truthy")]
    pub composed: bool,
    /// Only kept by CustomEvent. An explicit `null` is `Some(Value::Null)`.
    #[serde(deserialize_with = "present")]
    pub detail: Option<Value>,
}

/// Dictionary booleans accept any value and test its truthiness
fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Value::deserialize(deserializer).map(|value| to_boolean(&value))
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

/// DOM event
#[derive(Clone, Serialize)]
pub struct Event {
    #[serde(rename = "isTrusted")]
    pub is_trusted: bool,
    #[serde(skip)]
    handle: Rc<ContextHandle<EventKey, EventSlot>>,
}

impl Event {
    pub const INTERFACE: &'static str = "Event";

    pub const NONE: u16 = EventPhase::None.value();
    pub const CAPTURING_PHASE: u16 = EventPhase::Capturing.value();
    pub const AT_TARGET: u16 = EventPhase::AtTarget.value();
    pub const BUBBLING_PHASE: u16 = EventPhase::Bubbling.value();

    /// `new Event(type, eventInitDict)`
    pub fn new(event_type: &str, init: EventInit) -> DomResult<Event> {
        Self::create(Self::INTERFACE, event_type.to_string(), init)
    }

    /// `new Event(...args)` with script arguments
    pub fn construct(args: &[Value]) -> DomResult<Event> {
        Self::construct_as(Self::INTERFACE, "EventInit", args)
    }

    pub(crate) fn construct_as(
        interface: &'static str,
        dictionary: &'static str,
        args: &[Value],
    ) -> DomResult<Event> {
        let Some(event_type) = args.first() else {
            return Err(DomError::ArgumentCount {
                interface,
                required: 1,
                present: 0,
            });
        };
        let init = match args.get(1) {
            None | Some(Value::Null) => EventInit::default(),
            Some(value) => EventInit::deserialize(value).map_err(|err| {
                tracing::debug!("Rejected {} dictionary: {}", interface, err);
                DomError::ConstructParameter {
                    interface,
                    index: 2,
                    expected: dictionary,
                }
            })?,
        };
        Self::create(interface, to_dom_string(event_type), init)
    }

    /// Install the record of a new event of `interface`
    pub(crate) fn create(
        interface: &'static str,
        event_type: String,
        init: EventInit,
    ) -> DomResult<Event> {
        let detail = match init.detail {
            Some(_) if interface != CustomEvent::INTERFACE => {
                tracing::warn!(
                    "The 'detail' option is meant only for CustomEvent, not {}; ignoring it",
                    interface
                );
                None
            }
            detail => detail,
        };
        let record = initial_record(InitialState {
            event_type,
            bubbles: init.bubbles,
            cancelable: init.cancelable,
            composed: init.composed,
            detail,
            time_stamp: now_millis(),
        });
        let handle = EVENT_STORE.with(|store| ContextHandle::install(store, interface, record))?;
        Ok(Event {
            is_trusted: true,
            handle: Rc::new(handle),
        })
    }

    /// The shared behavior object of the Event interface.
    ///
    /// Every accessor on it fails with `Illegal invocation`.
    pub fn interface_object() -> Event {
        Self::interface_object_of(Self::INTERFACE)
    }

    pub(crate) fn interface_object_of(interface: &'static str) -> Event {
        let handle = EVENT_STORE.with(|store| ContextHandle::interface_object(store, interface));
        Event {
            is_trusted: false,
            handle: Rc::new(handle),
        }
    }

    /// Number of event records alive on this thread
    pub fn live_records() -> usize {
        EVENT_STORE.with(|store| store.borrow().len())
    }

    /// Interface the event was constructed as
    pub fn interface(&self) -> &'static str {
        self.handle.interface()
    }

    pub(crate) fn read<T: FromSlot<EventSlot>>(&self, key: EventKey) -> DomResult<T> {
        self.handle.read(key)
    }

    pub(crate) fn write(&self, key: EventKey, value: impl Into<EventSlot>) -> DomResult<()> {
        self.handle.set(key, value)
    }

    fn read_target(&self, key: EventKey) -> DomResult<Option<Node>> {
        let target: Option<WeakNode> = self.read(key)?;
        Ok(target.and_then(|weak| weak.upgrade()))
    }

    // ---- Attributes ----

    /// `type`
    pub fn event_type(&self) -> DomResult<String> {
        self.read(EventKey::Type)
    }

    pub fn target(&self) -> DomResult<Option<Node>> {
        self.read_target(EventKey::Target)
    }

    pub fn current_target(&self) -> DomResult<Option<Node>> {
        self.read_target(EventKey::CurrentTarget)
    }

    pub fn event_phase(&self) -> DomResult<EventPhase> {
        self.read(EventKey::EventPhase)
    }

    /// Historical alias of the stop propagation flag
    pub fn cancel_bubble(&self) -> DomResult<bool> {
        self.read(EventKey::PropagationStopped)
    }

    pub fn set_cancel_bubble(&self, value: bool) -> DomResult<()> {
        self.write(EventKey::PropagationStopped, value)
    }

    /// `cancelBubble = value` with a script value, coerced by truthiness
    pub fn set_cancel_bubble_value(&self, value: &Value) -> DomResult<()> {
        self.set_cancel_bubble(to_boolean(value))
    }

    pub fn bubbles(&self) -> DomResult<bool> {
        self.read(EventKey::Bubbles)
    }

    pub fn cancelable(&self) -> DomResult<bool> {
        self.read(EventKey::Cancelable)
    }

    pub fn composed(&self) -> DomResult<bool> {
        self.read(EventKey::Composed)
    }

    /// Milliseconds since the Unix epoch at creation
    pub fn time_stamp(&self) -> DomResult<u64> {
        self.read(EventKey::TimeStamp)
    }

    pub fn default_prevented(&self) -> DomResult<bool> {
        self.read(EventKey::Canceled)
    }

    pub(crate) fn is_dispatching(&self) -> DomResult<bool> {
        self.read(EventKey::Dispatch)
    }

    // ---- Controls ----

    pub fn stop_propagation(&self) -> DomResult<()> {
        self.write(EventKey::PropagationStopped, true)
    }

    pub fn stop_immediate_propagation(&self) -> DomResult<()> {
        self.write(EventKey::PropagationStopped, true)?;
        self.write(EventKey::ImmediatePropagationStopped, true)
    }

    /// Cancel the event if it is cancelable and not inside a passive listener
    pub fn prevent_default(&self) -> DomResult<()> {
        let cancelable: bool = self.read(EventKey::Cancelable)?;
        let in_passive_listener: bool = self.read(EventKey::InPassiveListener)?;
        if cancelable && !in_passive_listener {
            self.write(EventKey::Canceled, true)?;
        }
        Ok(())
    }

    /// `composedPath()`: the dispatch path, empty outside of dispatch
    pub fn composed_path(&self) -> DomResult<Vec<Node>> {
        if !self.is_dispatching()? {
            return Ok(Vec::new());
        }
        let path: Vec<WeakNode> = self.read(EventKey::Path)?;
        Ok(path.iter().filter_map(WeakNode::upgrade).collect())
    }

    /// Legacy `initEvent(type, bubbles, cancelable)`; ignored while dispatching
    pub fn init_event(&self, event_type: &str, bubbles: bool, cancelable: bool) -> DomResult<()> {
        if self.is_dispatching()? {
            return Ok(());
        }
        self.write(EventKey::Initialized, true)?;
        self.write(EventKey::PropagationStopped, false)?;
        self.write(EventKey::ImmediatePropagationStopped, false)?;
        self.write(EventKey::Canceled, false)?;
        self.write(EventKey::Target, None::<WeakNode>)?;
        self.write(EventKey::Type, event_type.to_string())?;
        self.write(EventKey::Bubbles, bubbles)?;
        self.write(EventKey::Cancelable, cancelable)
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Event) -> bool {
        Rc::ptr_eq(&self.handle, &other.handle)
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("is_trusted", &self.is_trusted)
            .field("receiver", self.handle.receiver())
            .finish()
    }
}

//! Event attribute records

use fos_context::{AttributeKey, AttributeRecord, FromSlot};
use serde_json::Value;

use super::phase::EventPhase;
use crate::nodes::WeakNode;

pub type EventRecord = AttributeRecord<EventKey, EventSlot>;

/// Attribute names of event records
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKey {
    Type,
    Initialized,
    Bubbles,
    Cancelable,
    Target,
    CurrentTarget,
    Dispatch,
    PropagationStopped,
    ImmediatePropagationStopped,
    Canceled,
    Composed,
    InPassiveListener,
    EventPhase,
    Detail,
    TimeStamp,
    Path,
}

impl AttributeKey for EventKey {
    fn name(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Initialized => "initialized",
            Self::Bubbles => "bubbles",
            Self::Cancelable => "cancelable",
            Self::Target => "target",
            Self::CurrentTarget => "currentTarget",
            Self::Dispatch => "dispatch",
            Self::PropagationStopped => "propagationStopped",
            Self::ImmediatePropagationStopped => "immediatePropagationStopped",
            Self::Canceled => "canceled",
            Self::Composed => "composed",
            Self::InPassiveListener => "inPassiveListener",
            Self::EventPhase => "eventPhase",
            Self::Detail => "detail",
            Self::TimeStamp => "timeStamp",
            Self::Path => "path",
        }
    }
}

/// Value held by an event record. Targets are relations only.
#[derive(Debug, Clone)]
pub enum EventSlot {
    Text(String),
    Flag(bool),
    Target(Option<WeakNode>),
    Phase(EventPhase),
    Detail(Option<Value>),
    Millis(u64),
    Path(Vec<WeakNode>),
}

macro_rules! slot_conversions {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(
            impl From<$ty> for EventSlot {
                fn from(value: $ty) -> Self {
                    EventSlot::$variant(value)
                }
            }

            impl FromSlot<EventSlot> for $ty {
                fn from_slot(value: EventSlot) -> Option<Self> {
                    match value {
                        EventSlot::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )+
    };
}

slot_conversions! {
    Text(String),
    Flag(bool),
    Target(Option<WeakNode>),
    Phase(EventPhase),
    Detail(Option<Value>),
    Millis(u64),
    Path(Vec<WeakNode>),
}

/// Fields an event is created with
pub(crate) struct InitialState {
    pub event_type: String,
    pub bubbles: bool,
    pub cancelable: bool,
    pub composed: bool,
    pub detail: Option<Value>,
    pub time_stamp: u64,
}

/// Record of a freshly constructed, initialized event
pub(crate) fn initial_record(state: InitialState) -> EventRecord {
    EventRecord::new()
        .with(EventKey::Type, EventSlot::Text(state.event_type))
        .with(EventKey::Initialized, EventSlot::Flag(true))
        .with(EventKey::Bubbles, EventSlot::Flag(state.bubbles))
        .with(EventKey::Cancelable, EventSlot::Flag(state.cancelable))
        .with(EventKey::Target, EventSlot::Target(None))
        .with(EventKey::CurrentTarget, EventSlot::Target(None))
        .with(EventKey::Dispatch, EventSlot::Flag(false))
        .with(EventKey::PropagationStopped, EventSlot::Flag(false))
        .with(EventKey::ImmediatePropagationStopped, EventSlot::Flag(false))
        .with(EventKey::Canceled, EventSlot::Flag(false))
        .with(EventKey::Composed, EventSlot::Flag(state.composed))
        .with(EventKey::InPassiveListener, EventSlot::Flag(false))
        .with(EventKey::EventPhase, EventSlot::Phase(EventPhase::None))
        .with(EventKey::Detail, EventSlot::Detail(state.detail))
        .with(EventKey::TimeStamp, EventSlot::Millis(state.time_stamp))
        .with(EventKey::Path, EventSlot::Path(Vec::new()))
}

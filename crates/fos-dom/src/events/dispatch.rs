//! Event dispatch boundary
//!
//! Walking the capture and bubble path belongs to an external dispatcher.
//! This module hands it a [`DispatchScope`], the only way to write an
//! event's `currentTarget`, `eventPhase`, passive-listener state and path.

use fos_context::{DomError, DomResult};

use super::event::Event;
use super::phase::EventPhase;
use super::record::EventKey;
use crate::nodes::{Node, WeakNode};

/// Event dispatcher trait
pub trait EventDispatcher {
    /// Run listeners for `scope.event()` starting at `scope.target()`
    fn dispatch(&mut self, scope: &mut DispatchScope<'_>) -> DomResult<()>;
}

/// Privileged view of an event while it is being dispatched
pub struct DispatchScope<'a> {
    event: &'a Event,
    target: &'a Node,
}

impl<'a> DispatchScope<'a> {
    pub fn event(&self) -> &'a Event {
        self.event
    }

    pub fn target(&self) -> &'a Node {
        self.target
    }

    pub fn set_current_target(&mut self, node: Option<&Node>) -> DomResult<()> {
        self.event
            .write(EventKey::CurrentTarget, node.map(Node::downgrade))
    }

    pub fn set_event_phase(&mut self, phase: EventPhase) -> DomResult<()> {
        self.event.write(EventKey::EventPhase, phase)
    }

    pub fn set_in_passive_listener(&mut self, passive: bool) -> DomResult<()> {
        self.event.write(EventKey::InPassiveListener, passive)
    }

    /// Record the propagation path reported by `composedPath()`
    pub fn set_path(&mut self, path: &[Node]) -> DomResult<()> {
        let path: Vec<WeakNode> = path.iter().map(Node::downgrade).collect();
        self.event.write(EventKey::Path, path)
    }

    pub fn propagation_stopped(&self) -> DomResult<bool> {
        self.event.read(EventKey::PropagationStopped)
    }

    pub fn immediate_propagation_stopped(&self) -> DomResult<bool> {
        self.event.read(EventKey::ImmediatePropagationStopped)
    }

    pub fn canceled(&self) -> DomResult<bool> {
        self.event.read(EventKey::Canceled)
    }

    pub fn in_passive_listener(&self) -> DomResult<bool> {
        self.event.read(EventKey::InPassiveListener)
    }
}

impl Event {
    /// Dispatch to `target` through `dispatcher`; false if canceled
    pub(crate) fn dispatch_to(
        &self,
        target: &Node,
        dispatcher: &mut dyn EventDispatcher,
    ) -> DomResult<bool> {
        if self.is_dispatching()? {
            return Err(DomError::InvalidState(
                "The event is already being dispatched.".to_string(),
            ));
        }
        let initialized: bool = self.read(EventKey::Initialized)?;
        if !initialized {
            return Err(DomError::InvalidState(
                "The event provided is uninitialized.".to_string(),
            ));
        }

        let event_type = self.event_type()?;
        tracing::debug!("Dispatching '{}' to {:?}", event_type, target);
        self.write(EventKey::Dispatch, true)?;
        self.write(EventKey::Target, Some(target.downgrade()))?;

        let mut scope = DispatchScope {
            event: self,
            target,
        };
        let outcome = dispatcher.dispatch(&mut scope);
        let cleanup = self.finish_dispatch();
        outcome?;
        cleanup?;

        let canceled: bool = self.read(EventKey::Canceled)?;
        tracing::debug!("Dispatched '{}' (canceled: {})", event_type, canceled);
        Ok(!canceled)
    }

    fn finish_dispatch(&self) -> DomResult<()> {
        self.write(EventKey::Dispatch, false)?;
        self.write(EventKey::EventPhase, EventPhase::None)?;
        self.write(EventKey::CurrentTarget, None::<WeakNode>)?;
        self.write(EventKey::InPassiveListener, false)?;
        self.write(EventKey::Path, Vec::<WeakNode>::new())?;
        self.write(EventKey::PropagationStopped, false)?;
        self.write(EventKey::ImmediatePropagationStopped, false)
    }
}

//! Browsing context
//!
//! Per-process state that gates construction of the root document. It is
//! passed explicitly to the constructors that need it, so each test can
//! start from a fresh context.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use fos_context::{ContextStore, DomError, DomResult, SharedStore};

use crate::nodes::{Document, Node, NodeKey, NodeSlot, WeakNode};

/// Browsing context handle (cheap to clone)
#[derive(Clone)]
pub struct BrowsingContext {
    inner: Rc<ContextInner>,
}

struct ContextInner {
    state: BrowsingContextState,
    /// Private state of every node created in this context
    nodes: SharedStore<NodeKey, NodeSlot>,
}

#[derive(Default)]
struct BrowsingContextState {
    /// false -> true exactly once
    document_constructed: AtomicBool,
    document_base_uri: RefCell<Option<String>>,
    root_document: RefCell<WeakNode>,
}

impl BrowsingContext {
    /// Create a context in which no document has been constructed yet
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ContextInner {
                state: BrowsingContextState::default(),
                nodes: ContextStore::shared("Node"),
            }),
        }
    }

    /// Whether the root document has been constructed
    pub fn document_constructed(&self) -> bool {
        self.inner.state.document_constructed.load(Ordering::Acquire)
    }

    /// The document base URL, shared by every node
    pub fn document_base_uri(&self) -> Option<String> {
        self.inner.state.document_base_uri.borrow().clone()
    }

    /// The document created by this browsing context
    pub fn root_document(&self) -> Option<Document> {
        self.inner
            .state
            .root_document
            .borrow()
            .upgrade()
            .map(Document::from_node_unchecked)
    }

    /// Number of node records currently alive
    pub fn live_nodes(&self) -> usize {
        self.inner.nodes.borrow().len()
    }

    /// Whether two handles refer to the same context
    pub fn same_context(&self, other: &BrowsingContext) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn nodes(&self) -> &SharedStore<NodeKey, NodeSlot> {
        &self.inner.nodes
    }

    pub(crate) fn set_document_base_uri(&self, uri: Option<String>) {
        *self.inner.state.document_base_uri.borrow_mut() = uri;
    }

    pub(crate) fn set_root_document(&self, document: &Node) {
        *self.inner.state.root_document.borrow_mut() = document.downgrade();
    }

    /// Privileged constructors may only run before the root document exists
    pub(crate) fn ensure_document_unconstructed(&self) -> DomResult<()> {
        if self.document_constructed() {
            return Err(DomError::IllegalConstructor);
        }
        Ok(())
    }

    /// Flip `documentConstructed`. Fails if another construction won.
    pub(crate) fn complete_document_construction(&self) -> DomResult<()> {
        self.inner
            .state
            .document_constructed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(|_| DomError::IllegalConstructor)
    }
}

impl Default for BrowsingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BrowsingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowsingContext")
            .field("document_constructed", &self.document_constructed())
            .field("document_base_uri", &self.document_base_uri())
            .field("live_nodes", &self.live_nodes())
            .finish()
    }
}

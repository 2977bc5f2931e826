//! fOS DOM - Document Object Model
//!
//! Events and document nodes with a fixed public surface. Instance state
//! lives in context stores from `fos-context`; accessors dispatch on the
//! type tags kept there.

mod browsing_context;
pub mod events;
pub mod nodes;

pub use browsing_context::BrowsingContext;
pub use events::{
    CustomEvent, DispatchScope, Event, EventDispatcher, EventInit, EventPhase, EventTarget,
};
pub use fos_context::{DomError, DomResult, ErrorKind, InternalError};
pub use nodes::{
    Attr, CdataSection, CharacterData, Comment, Document, DocumentFragment, DocumentInit,
    DocumentType, Element, GetRootNodeOptions, HtmlDocument, Node, NodeType,
    ProcessingInstruction, Text, WeakNode,
};

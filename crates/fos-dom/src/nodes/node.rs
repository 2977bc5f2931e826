//! Node interface
//!
//! `Node` is a shared handle to one node instance. All state lives in the
//! browsing context's node store; accessors dispatch on the `nodeType` tag
//! kept there.

use std::fmt;
use std::rc::{Rc, Weak};

use fos_context::{
    ContextHandle, DomError, DomResult, FromSlot, InternalError, guard, to_nullable_dom_string,
};
use serde::Deserialize;

use super::document::Document;
use super::element::Element;
use super::node_type::NodeType;
use super::record::{NodeKey, NodeRecord, NodeSlot, utf16_length};
use crate::browsing_context::BrowsingContext;
use crate::events::{Event, EventDispatcher};

pub(crate) struct NodeInner {
    handle: ContextHandle<NodeKey, NodeSlot>,
    context: BrowsingContext,
}

/// DOM node
#[derive(Clone)]
pub struct Node(Rc<NodeInner>);

/// Non-owning node reference
#[derive(Clone, Default)]
pub struct WeakNode(Weak<NodeInner>);

impl WeakNode {
    /// The node, if it is still alive
    pub fn upgrade(&self) -> Option<Node> {
        self.0.upgrade().map(Node)
    }
}

impl fmt::Debug for WeakNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(node) => write!(f, "WeakNode({:?})", node.0.handle.receiver()),
            None => f.write_str("WeakNode(<dropped>)"),
        }
    }
}

/// Options for [`Node::get_root_node`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GetRootNodeOptions {
    pub composed: bool,
}

impl Node {
    pub const INTERFACE: &'static str = "Node";

    pub const ELEMENT_NODE: u16 = NodeType::Element.tag();
    pub const ATTRIBUTE_NODE: u16 = NodeType::Attribute.tag();
    pub const TEXT_NODE: u16 = NodeType::Text.tag();
    pub const CDATA_SECTION_NODE: u16 = NodeType::CdataSection.tag();
    pub const ENTITY_REFERENCE_NODE: u16 = NodeType::EntityReference.tag();
    pub const ENTITY_NODE: u16 = NodeType::Entity.tag();
    pub const PROCESSING_INSTRUCTION_NODE: u16 = NodeType::ProcessingInstruction.tag();
    pub const COMMENT_NODE: u16 = NodeType::Comment.tag();
    pub const DOCUMENT_NODE: u16 = NodeType::Document.tag();
    pub const DOCUMENT_TYPE_NODE: u16 = NodeType::DocumentType.tag();
    pub const DOCUMENT_FRAGMENT_NODE: u16 = NodeType::DocumentFragment.tag();
    pub const NOTATION_NODE: u16 = NodeType::Notation.tag();

    pub const DOCUMENT_POSITION_DISCONNECTED: u16 = 0x01;
    pub const DOCUMENT_POSITION_PRECEDING: u16 = 0x02;
    pub const DOCUMENT_POSITION_FOLLOWING: u16 = 0x04;
    pub const DOCUMENT_POSITION_CONTAINS: u16 = 0x08;
    pub const DOCUMENT_POSITION_CONTAINED_BY: u16 = 0x10;
    pub const DOCUMENT_POSITION_IMPLEMENTATION_SPECIFIC: u16 = 0x20;

    /// `new Node()`: Node is abstract
    pub fn construct() -> DomResult<Node> {
        Err(DomError::IllegalConstructor)
    }

    /// The shared behavior object of the Node interface.
    ///
    /// It is not an instance: every accessor fails with `Illegal invocation`.
    pub fn interface_object(context: &BrowsingContext) -> Node {
        Self::interface_object_of(context, Self::INTERFACE)
    }

    pub(crate) fn interface_object_of(context: &BrowsingContext, interface: &'static str) -> Node {
        Node(Rc::new(NodeInner {
            handle: ContextHandle::interface_object(context.nodes(), interface),
            context: context.clone(),
        }))
    }

    /// Install a fully built record for a new node
    pub(crate) fn install(
        context: &BrowsingContext,
        interface: &'static str,
        record: NodeRecord,
    ) -> DomResult<Node> {
        let handle = ContextHandle::install(context.nodes(), interface, record)?;
        Ok(Node(Rc::new(NodeInner {
            handle,
            context: context.clone(),
        })))
    }

    pub(crate) fn downgrade(&self) -> WeakNode {
        WeakNode(Rc::downgrade(&self.0))
    }

    pub(crate) fn read<T: FromSlot<NodeSlot>>(&self, key: NodeKey) -> DomResult<T> {
        self.0.handle.read(key)
    }

    pub(crate) fn write(&self, key: NodeKey, value: impl Into<NodeSlot>) -> DomResult<()> {
        self.0.handle.set(key, value)
    }

    /// Read a weak reference attribute and upgrade it
    pub(crate) fn read_ref(&self, key: NodeKey) -> DomResult<Option<Node>> {
        let reference: Option<WeakNode> = self.read(key)?;
        Ok(reference.and_then(|weak| weak.upgrade()))
    }

    /// Reject calls made on the interface object
    pub(crate) fn check_receiver(&self) -> DomResult<()> {
        guard(self.0.handle.receiver()).map(|_| ())
    }

    /// Interface this node was constructed as, e.g. `"Text"`
    pub fn interface(&self) -> &'static str {
        self.0.handle.interface()
    }

    /// Browsing context the node belongs to
    pub fn context(&self) -> &BrowsingContext {
        &self.0.context
    }

    // ---- Type dispatch ----

    /// `nodeType`
    pub fn node_type(&self) -> DomResult<NodeType> {
        let tag: u16 = self.read(NodeKey::NodeType)?;
        NodeType::try_from(tag).map_err(|tag| InternalError::UnsupportedNodeType(tag).into())
    }

    /// `nodeName`
    pub fn node_name(&self) -> DomResult<String> {
        let node_type = self.node_type()?;
        let name: String = match node_type {
            NodeType::Element => self.read(NodeKey::TagName)?,
            NodeType::Attribute => self.qualified_name()?,
            NodeType::Text => "#text".to_string(),
            NodeType::CdataSection => "#cdata-section".to_string(),
            NodeType::ProcessingInstruction => self.read(NodeKey::Target)?,
            NodeType::Comment => "#comment".to_string(),
            NodeType::Document => "#document".to_string(),
            NodeType::DocumentType => self.read(NodeKey::Name)?,
            NodeType::DocumentFragment => "#document-fragment".to_string(),
            NodeType::EntityReference | NodeType::Entity | NodeType::Notation => {
                return Err(InternalError::UnsupportedNodeType(node_type.tag()).into());
            }
        };
        Ok(name)
    }

    /// `prefix:localName`, or the local name alone without a prefix
    pub(crate) fn qualified_name(&self) -> DomResult<String> {
        let prefix: Option<String> = self.read(NodeKey::Prefix)?;
        let local_name: String = self.read(NodeKey::LocalName)?;
        Ok(match prefix {
            Some(prefix) => format!("{}:{}", prefix, local_name),
            None => local_name,
        })
    }

    /// `nodeValue`
    pub fn node_value(&self) -> DomResult<Option<String>> {
        match self.node_type()? {
            NodeType::Attribute => self.read(NodeKey::Value).map(Some),
            NodeType::Text | NodeType::ProcessingInstruction | NodeType::Comment => {
                self.read(NodeKey::Data).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Set `nodeValue`; `None` stands for null. Returns the coerced value.
    pub fn set_node_value(&self, value: Option<&str>) -> DomResult<String> {
        let value = to_nullable_dom_string(value);
        match self.node_type()? {
            NodeType::Attribute => self.write(NodeKey::Value, value.as_str())?,
            NodeType::Text | NodeType::ProcessingInstruction | NodeType::Comment => {
                self.replace_data(&value)?
            }
            _ => {}
        }
        Ok(value)
    }

    /// `textContent`
    pub fn text_content(&self) -> DomResult<Option<String>> {
        match self.node_type()? {
            NodeType::DocumentFragment | NodeType::Element => {
                Err(DomError::NotImplemented("{Element|DocumentFragment}.textContent"))
            }
            NodeType::Attribute => self.read(NodeKey::Value).map(Some),
            NodeType::Text | NodeType::ProcessingInstruction | NodeType::Comment => {
                self.read(NodeKey::Data).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Set `textContent`; `None` stands for null. Returns the coerced value.
    pub fn set_text_content(&self, value: Option<&str>) -> DomResult<String> {
        let value = to_nullable_dom_string(value);
        match self.node_type()? {
            NodeType::DocumentFragment | NodeType::Element => {
                return Err(DomError::NotImplemented(
                    "Setting {Element|DocumentFragment}.textContent",
                ));
            }
            NodeType::Attribute => self.write(NodeKey::Value, value.as_str())?,
            NodeType::Text | NodeType::ProcessingInstruction | NodeType::Comment => {
                self.replace_data(&value)?
            }
            _ => {}
        }
        Ok(value)
    }

    /// Overwrite character data, keeping `length` in step
    pub(crate) fn replace_data(&self, data: &str) -> DomResult<()> {
        self.write(NodeKey::Data, data)?;
        self.write(NodeKey::Length, utf16_length(data))
    }

    // ---- Context reads ----

    /// `baseURI`
    pub fn base_uri(&self) -> DomResult<Option<String>> {
        self.check_receiver()?;
        Ok(self.context().document_base_uri())
    }

    /// `isConnected`
    pub fn is_connected(&self) -> DomResult<bool> {
        self.read(NodeKey::IsConnected)
    }

    /// `ownerDocument`; null for documents themselves
    pub fn owner_document(&self) -> DomResult<Option<Document>> {
        if self.node_type()? == NodeType::Document {
            return Ok(None);
        }
        Ok(self
            .read_ref(NodeKey::OwnerDocument)?
            .map(Document::from_node_unchecked))
    }

    /// `getRootNode(options)`
    pub fn get_root_node(&self, _options: GetRootNodeOptions) -> DomResult<Option<Document>> {
        self.check_receiver()?;
        // TODO: return the shadow-including root for `composed` once shadow trees exist
        Ok(self.context().root_document())
    }

    // ---- Navigation ----

    /// `parentNode`
    pub fn parent_node(&self) -> DomResult<Option<Node>> {
        self.read_ref(NodeKey::ParentNode)
    }

    /// `parentElement`
    pub fn parent_element(&self) -> DomResult<Option<Element>> {
        Ok(self
            .read_ref(NodeKey::ParentElement)?
            .map(Element::from_node_unchecked))
    }

    /// `hasChildNodes()`
    pub fn has_child_nodes(&self) -> DomResult<bool> {
        let children: Vec<Node> = self.read(NodeKey::Children)?;
        Ok(!children.is_empty())
    }

    /// `childNodes`, in tree order
    pub fn child_nodes(&self) -> DomResult<Vec<Node>> {
        self.read(NodeKey::Children)
    }

    pub fn first_child(&self) -> DomResult<Option<Node>> {
        self.read_ref(NodeKey::FirstChild)
    }

    pub fn last_child(&self) -> DomResult<Option<Node>> {
        self.read_ref(NodeKey::LastChild)
    }

    pub fn previous_sibling(&self) -> DomResult<Option<Node>> {
        self.read_ref(NodeKey::PreviousSibling)
    }

    pub fn next_sibling(&self) -> DomResult<Option<Node>> {
        self.read_ref(NodeKey::NextSibling)
    }

    // ---- Equality ----

    /// `isEqualNode(other)`; `None` stands for null
    pub fn is_equal_node(&self, other: Option<&Node>) -> DomResult<bool> {
        self.check_receiver()?;
        let Some(other) = other else {
            return Ok(false);
        };
        if other.check_receiver().is_err() {
            return Err(DomError::ExecuteParameter {
                method: "isEqualNode",
                interface: Self::INTERFACE,
                index: 1,
                expected: Self::INTERFACE,
            });
        }

        let node_type = self.node_type()?;
        if node_type != other.node_type()? {
            return Ok(false);
        }

        match node_type {
            NodeType::DocumentType => Ok(self.same::<String>(other, NodeKey::Name)?
                && self.same::<String>(other, NodeKey::PublicId)?
                && self.same::<String>(other, NodeKey::SystemId)?),
            NodeType::Element => {
                let attributes: Vec<Node> = self.read(NodeKey::Attributes)?;
                let other_attributes: Vec<Node> = other.read(NodeKey::Attributes)?;
                if !self.same::<Option<String>>(other, NodeKey::NamespaceUri)?
                    || !self.same::<String>(other, NodeKey::LocalName)?
                    || attributes.len() != other_attributes.len()
                {
                    return Ok(false);
                }
                tracing::warn!(
                    "isEqualNode: namespace, local name and attribute count match, \
                     but attribute values and children were not compared"
                );
                Ok(true)
            }
            NodeType::Attribute => Ok(self.same::<Option<String>>(other, NodeKey::NamespaceUri)?
                && self.same::<String>(other, NodeKey::LocalName)?
                && self.same::<String>(other, NodeKey::Value)?),
            NodeType::ProcessingInstruction => Ok(self.same::<String>(other, NodeKey::Target)?
                && self.same::<String>(other, NodeKey::Data)?),
            NodeType::Text | NodeType::Comment | NodeType::CdataSection => {
                self.same::<String>(other, NodeKey::Data)
            }
            NodeType::Document | NodeType::DocumentFragment => {
                let children = self.child_nodes()?;
                let other_children = other.child_nodes()?;
                if children.len() != other_children.len() {
                    return Ok(false);
                }
                for (child, other_child) in children.iter().zip(&other_children) {
                    if !child.is_equal_node(Some(other_child))? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            NodeType::EntityReference | NodeType::Entity | NodeType::Notation => {
                Err(InternalError::UnsupportedNodeType(node_type.tag()).into())
            }
        }
    }

    fn same<T: FromSlot<NodeSlot> + PartialEq>(&self, other: &Node, key: NodeKey) -> DomResult<bool> {
        Ok(self.read::<T>(key)? == other.read::<T>(key)?)
    }

    /// `isSameNode(other)`: identity only
    pub fn is_same_node(&self, other: Option<&Node>) -> DomResult<bool> {
        self.check_receiver()?;
        Ok(other.is_some_and(|other| Rc::ptr_eq(&self.0, &other.0)))
    }

    // ---- Namespaces ----

    /// `lookupPrefix(namespace)`
    pub fn lookup_prefix(&self, namespace: Option<&str>) -> DomResult<Option<String>> {
        self.check_receiver()?;
        let Some(namespace) = namespace.filter(|ns| !ns.is_empty()) else {
            return Ok(None);
        };
        match self.node_type()? {
            NodeType::Element => {
                Element::from_node_unchecked(self.clone()).locate_namespace_prefix(namespace)
            }
            NodeType::Document => match Document::from_node_unchecked(self.clone()).document_element()? {
                Some(element) => element.locate_namespace_prefix(namespace),
                None => Ok(None),
            },
            NodeType::DocumentType | NodeType::DocumentFragment => Ok(None),
            NodeType::Attribute => {
                match self.read_ref(NodeKey::OwnerElement)? {
                    Some(element) => {
                        Element::from_node_unchecked(element).locate_namespace_prefix(namespace)
                    }
                    None => Ok(None),
                }
            }
            _ => match self.parent_element()? {
                Some(element) => element.locate_namespace_prefix(namespace),
                None => Ok(None),
            },
        }
    }

    /// `lookupNamespaceURI(prefix)`
    pub fn lookup_namespace_uri(&self, _prefix: Option<&str>) -> DomResult<Option<String>> {
        self.check_receiver()?;
        Err(DomError::NotImplemented("Node.prototype.lookupNamespaceURI"))
    }

    /// `isDefaultNamespace(namespace)`
    pub fn is_default_namespace(&self, _namespace: Option<&str>) -> DomResult<bool> {
        self.check_receiver()?;
        Err(DomError::NotImplemented("Node.prototype.isDefaultNamespace"))
    }

    // ---- Mutation layer boundary ----

    /// `normalize()`
    pub fn normalize(&self) -> DomResult<()> {
        self.check_receiver()?;
        Err(DomError::NotImplemented("Node.prototype.normalize"))
    }

    /// `cloneNode(deep)`
    pub fn clone_node(&self, _deep: bool) -> DomResult<Node> {
        self.check_receiver()?;
        Err(DomError::NotImplemented("Node.prototype.cloneNode"))
    }

    /// `compareDocumentPosition(other)`
    pub fn compare_document_position(&self, _other: &Node) -> DomResult<u16> {
        self.check_receiver()?;
        Err(DomError::NotImplemented("Node.prototype.compareDocumentPosition"))
    }

    /// `insertBefore(node, child)`
    pub fn insert_before(&self, _node: &Node, _child: Option<&Node>) -> DomResult<Node> {
        self.check_receiver()?;
        Err(DomError::NotImplemented("Node.prototype.insertBefore"))
    }

    /// `appendChild(node)`
    pub fn append_child(&self, _node: &Node) -> DomResult<Node> {
        self.check_receiver()?;
        Err(DomError::NotImplemented("Node.prototype.appendChild"))
    }

    /// `replaceChild(node, child)`
    pub fn replace_child(&self, _node: &Node, _child: &Node) -> DomResult<Node> {
        self.check_receiver()?;
        Err(DomError::NotImplemented("Node.prototype.replaceChild"))
    }

    /// `removeChild(child)`
    pub fn remove_child(&self, _child: &Node) -> DomResult<Node> {
        self.check_receiver()?;
        Err(DomError::NotImplemented("Node.prototype.removeChild"))
    }

    // ---- EventTarget ----

    /// `dispatchEvent(event)`, walked by `dispatcher`.
    ///
    /// Returns false if the event was canceled.
    pub fn dispatch_event(
        &self,
        event: &Event,
        dispatcher: &mut dyn EventDispatcher,
    ) -> DomResult<bool> {
        self.check_receiver()?;
        event.dispatch_to(self, dispatcher)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Node {}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Node").field(self.0.handle.receiver()).finish()
    }
}

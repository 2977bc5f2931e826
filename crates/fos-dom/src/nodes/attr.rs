//! Attr

use fos_context::DomResult;

use super::element::Element;
use super::node::{Node, WeakNode};
use super::node_type::NodeType;
use super::record::{NodeKey, NodeSlot, base_record};
use crate::browsing_context::BrowsingContext;

node_interface!(
    /// Attribute node
    Attr => "Attr", Attribute
);

impl Attr {
    pub(crate) fn create(
        context: &BrowsingContext,
        owner_document: Option<WeakNode>,
        namespace: Option<&str>,
        prefix: Option<&str>,
        local_name: &str,
        value: &str,
        owner_element: Option<WeakNode>,
    ) -> DomResult<Attr> {
        let record = base_record(NodeType::Attribute, owner_document)
            .with(NodeKey::NamespaceUri, namespace.map(str::to_string).into())
            .with(NodeKey::Prefix, prefix.map(str::to_string).into())
            .with(NodeKey::LocalName, local_name.into())
            .with(NodeKey::Value, value.into())
            .with(NodeKey::OwnerElement, NodeSlot::Ref(owner_element));
        Node::install(context, Self::INTERFACE, record).map(Attr)
    }

    pub fn namespace_uri(&self) -> DomResult<Option<String>> {
        self.read(NodeKey::NamespaceUri)
    }

    pub fn prefix(&self) -> DomResult<Option<String>> {
        self.read(NodeKey::Prefix)
    }

    pub fn local_name(&self) -> DomResult<String> {
        self.read(NodeKey::LocalName)
    }

    /// Qualified name
    pub fn name(&self) -> DomResult<String> {
        self.qualified_name()
    }

    pub fn value(&self) -> DomResult<String> {
        self.read(NodeKey::Value)
    }

    pub fn set_value(&self, value: &str) -> DomResult<()> {
        self.write(NodeKey::Value, value)
    }

    /// Element the attribute belongs to, if any
    pub fn owner_element(&self) -> DomResult<Option<Element>> {
        Ok(self
            .read_ref(NodeKey::OwnerElement)?
            .map(Element::from_node_unchecked))
    }
}

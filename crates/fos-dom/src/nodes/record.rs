//! Node attribute records
//!
//! All node interfaces share one key space; each interface installs only
//! the keys it owns.

use fos_context::{AttributeKey, AttributeRecord, FromSlot};

use super::node::{Node, WeakNode};
use super::node_type::NodeType;

pub type NodeRecord = AttributeRecord<NodeKey, NodeSlot>;

/// Attribute names of node records
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKey {
    // Node
    NodeType,
    IsConnected,
    OwnerDocument,
    ParentNode,
    ParentElement,
    Children,
    FirstChild,
    LastChild,
    PreviousSibling,
    NextSibling,
    // DocumentType
    Name,
    PublicId,
    SystemId,
    // Document
    Url,
    Origin,
    CompatMode,
    Encoding,
    ContentType,
    Doctype,
    // Element, Attr
    NamespaceUri,
    Prefix,
    LocalName,
    TagName,
    Attributes,
    Value,
    OwnerElement,
    // CharacterData
    Data,
    Length,
    Target,
}

impl AttributeKey for NodeKey {
    fn name(self) -> &'static str {
        match self {
            Self::NodeType => "nodeType",
            Self::IsConnected => "isConnected",
            Self::OwnerDocument => "ownerDocument",
            Self::ParentNode => "parentNode",
            Self::ParentElement => "parentElement",
            Self::Children => "children",
            Self::FirstChild => "firstChild",
            Self::LastChild => "lastChild",
            Self::PreviousSibling => "previousSibling",
            Self::NextSibling => "nextSibling",
            Self::Name => "name",
            Self::PublicId => "publicId",
            Self::SystemId => "systemId",
            Self::Url => "URL",
            Self::Origin => "origin",
            Self::CompatMode => "compatMode",
            Self::Encoding => "encoding",
            Self::ContentType => "contentType",
            Self::Doctype => "doctype",
            Self::NamespaceUri => "namespaceURI",
            Self::Prefix => "prefix",
            Self::LocalName => "localName",
            Self::TagName => "tagName",
            Self::Attributes => "attributes",
            Self::Value => "value",
            Self::OwnerElement => "ownerElement",
            Self::Data => "data",
            Self::Length => "length",
            Self::Target => "target",
        }
    }
}

/// Value held by a node record
///
/// `Ref` is a relation only and never keeps the referenced node alive;
/// `Owned` and `List` own their nodes (the tree owns children top-down).
#[derive(Debug, Clone)]
pub enum NodeSlot {
    Tag(u16),
    Flag(bool),
    Text(String),
    OptText(Option<String>),
    Count(usize),
    Ref(Option<WeakNode>),
    Owned(Option<Node>),
    List(Vec<Node>),
}

macro_rules! slot_conversions {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(
            impl From<$ty> for NodeSlot {
                fn from(value: $ty) -> Self {
                    NodeSlot::$variant(value)
                }
            }

            impl FromSlot<NodeSlot> for $ty {
                fn from_slot(value: NodeSlot) -> Option<Self> {
                    match value {
                        NodeSlot::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )+
    };
}

slot_conversions! {
    Tag(u16),
    Flag(bool),
    Text(String),
    OptText(Option<String>),
    Count(usize),
    Ref(Option<WeakNode>),
    Owned(Option<Node>),
    List(Vec<Node>),
}

impl From<&str> for NodeSlot {
    fn from(value: &str) -> Self {
        NodeSlot::Text(value.to_string())
    }
}

/// Keys every node carries
pub fn base_record(node_type: NodeType, owner_document: Option<WeakNode>) -> NodeRecord {
    NodeRecord::new()
        .with(NodeKey::NodeType, NodeSlot::Tag(node_type.tag()))
        .with(NodeKey::IsConnected, NodeSlot::Flag(false))
        .with(NodeKey::OwnerDocument, NodeSlot::Ref(owner_document))
        .with(NodeKey::ParentNode, NodeSlot::Ref(None))
        .with(NodeKey::ParentElement, NodeSlot::Ref(None))
        .with(NodeKey::Children, NodeSlot::List(Vec::new()))
        .with(NodeKey::FirstChild, NodeSlot::Ref(None))
        .with(NodeKey::LastChild, NodeSlot::Ref(None))
        .with(NodeKey::PreviousSibling, NodeSlot::Ref(None))
        .with(NodeKey::NextSibling, NodeSlot::Ref(None))
}

/// Keys of Text, Comment and CDATA section nodes
pub fn character_data_record(
    node_type: NodeType,
    owner_document: Option<WeakNode>,
    data: &str,
) -> NodeRecord {
    base_record(node_type, owner_document)
        .with(NodeKey::Data, data.into())
        .with(NodeKey::Length, NodeSlot::Count(utf16_length(data)))
}

/// Length in UTF-16 code units, as scripts observe it
pub fn utf16_length(data: &str) -> usize {
    data.encode_utf16().count()
}

//! Node type tags

use std::fmt;

/// The `nodeType` discriminator
///
/// Every type-dependent accessor on [`Node`](crate::Node) dispatches on this
/// tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum NodeType {
    Element = 1,
    Attribute = 2,
    Text = 3,
    CdataSection = 4,
    /// Historical
    EntityReference = 5,
    /// Historical
    Entity = 6,
    ProcessingInstruction = 7,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
    DocumentFragment = 11,
    /// Historical
    Notation = 12,
}

impl NodeType {
    /// Raw tag value
    #[inline]
    pub const fn tag(self) -> u16 {
        self as u16
    }

    /// Historical types exist only so their tags are recognized. No node
    /// of these types can be constructed.
    pub const fn is_historical(self) -> bool {
        matches!(self, Self::EntityReference | Self::Entity | Self::Notation)
    }
}

impl TryFrom<u16> for NodeType {
    type Error = u16;

    fn try_from(tag: u16) -> Result<Self, u16> {
        Ok(match tag {
            1 => Self::Element,
            2 => Self::Attribute,
            3 => Self::Text,
            4 => Self::CdataSection,
            5 => Self::EntityReference,
            6 => Self::Entity,
            7 => Self::ProcessingInstruction,
            8 => Self::Comment,
            9 => Self::Document,
            10 => Self::DocumentType,
            11 => Self::DocumentFragment,
            12 => Self::Notation,
            other => return Err(other),
        })
    }
}

impl From<NodeType> for u16 {
    fn from(node_type: NodeType) -> u16 {
        node_type.tag()
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.tag())
    }
}

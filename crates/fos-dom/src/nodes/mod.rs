//! Node object model
//!
//! [`Node`] carries every shared accessor. The concrete interfaces are thin
//! typed wrappers around it that add their own attributes.

/// Declare a concrete interface wrapping [`Node`]
macro_rules! node_interface {
    ($(#[$meta:meta])* $name:ident => $interface:literal, $($tag:ident)|+) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq)]
        pub struct $name(Node);

        impl $name {
            pub const INTERFACE: &'static str = $interface;

            /// Wrap a node already known to have this interface's type
            pub(crate) fn from_node_unchecked(node: Node) -> Self {
                Self(node)
            }

            /// The shared behavior object of this interface; every accessor
            /// on it fails with `Illegal invocation`
            pub fn interface_object(context: &crate::BrowsingContext) -> Self {
                Self::from_node_unchecked(Node::interface_object_of(context, Self::INTERFACE))
            }

            pub fn as_node(&self) -> &Node {
                &self.0
            }

            pub fn into_node(self) -> Node {
                self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = Node;

            fn deref(&self) -> &Node {
                &self.0
            }
        }

        impl From<$name> for Node {
            fn from(node: $name) -> Node {
                node.0
            }
        }

        impl TryFrom<Node> for $name {
            type Error = fos_context::DomError;

            fn try_from(node: Node) -> fos_context::DomResult<Self> {
                match node.node_type()? {
                    $(NodeType::$tag)|+ => Ok(Self(node)),
                    _ => Err(fos_context::DomError::ExecuteParameter {
                        method: "convert",
                        interface: Self::INTERFACE,
                        index: 1,
                        expected: Self::INTERFACE,
                    }),
                }
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple($interface).field(&self.0).finish()
            }
        }
    };
}

mod attr;
mod character_data;
mod document;
mod document_type;
mod element;
mod fragment;
mod html_document;
mod node;
mod node_type;
mod record;

pub use attr::Attr;
pub use character_data::{CdataSection, CharacterData, Comment, ProcessingInstruction, Text};
pub use document::Document;
pub use document_type::DocumentType;
pub use element::{Element, HTML_NAMESPACE, XMLNS_NAMESPACE};
pub use fragment::DocumentFragment;
pub use html_document::{DocumentInit, HtmlDocument};
pub use node::{GetRootNodeOptions, Node, WeakNode};
pub use node_type::NodeType;

pub(crate) use record::{NodeKey, NodeSlot};

//! DocumentType

use fos_context::DomResult;

use super::node::{Node, WeakNode};
use super::node_type::NodeType;
use super::record::{NodeKey, base_record};
use crate::browsing_context::BrowsingContext;

node_interface!(
    /// `<!DOCTYPE>` node
    DocumentType => "DocumentType", DocumentType
);

impl DocumentType {
    /// Privileged constructor.
    ///
    /// Only valid while the context's root document is still being built.
    pub(crate) fn new(
        context: &BrowsingContext,
        owner_document: Option<WeakNode>,
        name: &str,
        public_id: &str,
        system_id: &str,
    ) -> DomResult<DocumentType> {
        context.ensure_document_unconstructed()?;
        let record = base_record(NodeType::DocumentType, owner_document)
            .with(NodeKey::Name, name.into())
            .with(NodeKey::PublicId, public_id.into())
            .with(NodeKey::SystemId, system_id.into());
        Node::install(context, Self::INTERFACE, record).map(DocumentType)
    }

    pub fn name(&self) -> DomResult<String> {
        self.read(NodeKey::Name)
    }

    pub fn public_id(&self) -> DomResult<String> {
        self.read(NodeKey::PublicId)
    }

    pub fn system_id(&self) -> DomResult<String> {
        self.read(NodeKey::SystemId)
    }
}

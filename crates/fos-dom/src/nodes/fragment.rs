//! DocumentFragment

use fos_context::DomResult;

use super::document::Document;
use super::node::Node;
use super::node_type::NodeType;
use super::record::base_record;

node_interface!(
    /// Lightweight container node with no parent
    DocumentFragment => "DocumentFragment", DocumentFragment
);

impl DocumentFragment {
    pub(crate) fn create(document: &Document) -> DomResult<DocumentFragment> {
        let record = base_record(NodeType::DocumentFragment, Some(document.downgrade()));
        Node::install(document.context(), Self::INTERFACE, record).map(DocumentFragment)
    }
}

#[cfg(test)]
mod tests {
    use crate::BrowsingContext;
    use crate::nodes::{DocumentInit, HtmlDocument};
    use fos_context::DomError;

    #[test]
    fn test_fragment_basics() {
        let document = HtmlDocument::new(&BrowsingContext::new(), DocumentInit::default()).unwrap();
        let fragment = document.create_document_fragment().unwrap();

        assert_eq!(fragment.node_name().unwrap(), "#document-fragment");
        assert_eq!(fragment.node_value().unwrap(), None);
        assert!(!fragment.has_child_nodes().unwrap());
        assert!(matches!(
            fragment.text_content().unwrap_err(),
            DomError::NotImplemented(_)
        ));
    }

    #[test]
    fn test_empty_fragments_are_equal() {
        let document = HtmlDocument::new(&BrowsingContext::new(), DocumentInit::default()).unwrap();
        let a = document.create_document_fragment().unwrap();
        let b = document.create_document_fragment().unwrap();

        assert!(a.is_equal_node(Some(b.as_node())).unwrap());
        assert!(!a.is_equal_node(Some(document.as_node())).unwrap());
    }
}

//! Document
//!
//! Documents are only built through [`HtmlDocument::new`](super::HtmlDocument::new);
//! the accessors here read the record that constructor installs. The
//! factory methods create disconnected nodes owned by the document.

use fos_context::{DomError, DomResult};

use super::attr::Attr;
use super::character_data::{CdataSection, Comment, ProcessingInstruction, Text};
use super::document_type::DocumentType;
use super::element::{Element, HTML_NAMESPACE};
use super::fragment::DocumentFragment;
use super::node::Node;
use super::node_type::NodeType;
use super::record::NodeKey;

node_interface!(
    /// Document node
    Document => "Document", Document
);

/// Split `prefix:local` at the first colon
fn split_qualified_name(qualified_name: &str) -> (Option<&str>, &str) {
    match qualified_name.split_once(':') {
        Some((prefix, local_name)) => (Some(prefix), local_name),
        None => (None, qualified_name),
    }
}

impl Document {
    /// `new Document()`
    pub fn construct() -> DomResult<Document> {
        Err(DomError::IllegalConstructor)
    }

    /// `URL`
    pub fn url(&self) -> DomResult<String> {
        self.read(NodeKey::Url)
    }

    /// `documentURI`
    pub fn document_uri(&self) -> DomResult<String> {
        self.url()
    }

    pub fn origin(&self) -> DomResult<Option<String>> {
        self.read(NodeKey::Origin)
    }

    pub fn compat_mode(&self) -> DomResult<String> {
        self.read(NodeKey::CompatMode)
    }

    pub fn character_set(&self) -> DomResult<String> {
        self.read(NodeKey::Encoding)
    }

    /// Alias of [`character_set`](Self::character_set)
    pub fn charset(&self) -> DomResult<String> {
        self.character_set()
    }

    /// Alias of [`character_set`](Self::character_set)
    pub fn input_encoding(&self) -> DomResult<String> {
        self.character_set()
    }

    pub fn content_type(&self) -> DomResult<String> {
        self.read(NodeKey::ContentType)
    }

    /// The document's own DocumentType
    pub fn doctype(&self) -> DomResult<Option<DocumentType>> {
        let doctype: Option<Node> = self.read(NodeKey::Doctype)?;
        Ok(doctype.map(DocumentType::from_node_unchecked))
    }

    /// First element child
    pub fn document_element(&self) -> DomResult<Option<Element>> {
        for child in self.child_nodes()? {
            if child.node_type()? == NodeType::Element {
                return Ok(Some(Element::from_node_unchecked(child)));
            }
        }
        Ok(None)
    }

    // ---- Factories ----

    /// `createElement(localName)`, in the HTML namespace
    pub fn create_element(&self, local_name: &str) -> DomResult<Element> {
        self.check_receiver()?;
        let local_name = local_name.to_ascii_lowercase();
        let tag_name = local_name.to_ascii_uppercase();
        Element::create(self, Some(HTML_NAMESPACE), None, &local_name, tag_name)
    }

    /// `createElementNS(namespace, qualifiedName)`
    pub fn create_element_ns(
        &self,
        namespace: Option<&str>,
        qualified_name: &str,
    ) -> DomResult<Element> {
        self.check_receiver()?;
        let namespace = namespace.filter(|ns| !ns.is_empty());
        let (prefix, local_name) = split_qualified_name(qualified_name);
        let tag_name = if namespace == Some(HTML_NAMESPACE) {
            qualified_name.to_ascii_uppercase()
        } else {
            qualified_name.to_string()
        };
        Element::create(self, namespace, prefix, local_name, tag_name)
    }

    /// `createTextNode(data)`
    pub fn create_text_node(&self, data: &str) -> DomResult<Text> {
        self.check_receiver()?;
        Text::create(self, data)
    }

    /// `createComment(data)`
    pub fn create_comment(&self, data: &str) -> DomResult<Comment> {
        self.check_receiver()?;
        Comment::create(self, data)
    }

    /// `createCDATASection(data)`
    pub fn create_cdata_section(&self, data: &str) -> DomResult<CdataSection> {
        self.check_receiver()?;
        CdataSection::create(self, data)
    }

    /// `createProcessingInstruction(target, data)`
    pub fn create_processing_instruction(
        &self,
        target: &str,
        data: &str,
    ) -> DomResult<ProcessingInstruction> {
        self.check_receiver()?;
        ProcessingInstruction::create(self, target, data)
    }

    /// `createAttribute(localName)`
    pub fn create_attribute(&self, local_name: &str) -> DomResult<Attr> {
        self.check_receiver()?;
        let local_name = local_name.to_ascii_lowercase();
        Attr::create(
            self.context(),
            Some(self.downgrade()),
            None,
            None,
            &local_name,
            "",
            None,
        )
    }

    /// `createAttributeNS(namespace, qualifiedName)`
    pub fn create_attribute_ns(
        &self,
        namespace: Option<&str>,
        qualified_name: &str,
    ) -> DomResult<Attr> {
        self.check_receiver()?;
        let (prefix, local_name) = split_qualified_name(qualified_name);
        Attr::create(
            self.context(),
            Some(self.downgrade()),
            namespace.filter(|ns| !ns.is_empty()),
            prefix,
            local_name,
            "",
            None,
        )
    }

    /// `createDocumentFragment()`
    pub fn create_document_fragment(&self) -> DomResult<DocumentFragment> {
        self.check_receiver()?;
        DocumentFragment::create(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BrowsingContext;
    use crate::nodes::{DocumentInit, HtmlDocument};

    #[test]
    fn test_document_is_not_constructible() {
        assert_eq!(Document::construct().unwrap_err(), DomError::IllegalConstructor);
    }

    #[test]
    fn test_split_qualified_name() {
        assert_eq!(split_qualified_name("svg:rect"), (Some("svg"), "rect"));
        assert_eq!(split_qualified_name("rect"), (None, "rect"));
    }

    #[test]
    fn test_created_nodes_are_owned_and_disconnected() {
        let document = HtmlDocument::new(&BrowsingContext::new(), DocumentInit::default()).unwrap();
        let nodes: Vec<Node> = vec![
            document.create_element("p").unwrap().into(),
            document.create_text_node("t").unwrap().into(),
            document.create_comment("c").unwrap().into(),
            document.create_document_fragment().unwrap().into(),
        ];

        for node in nodes {
            assert!(!node.is_connected().unwrap());
            assert_eq!(node.parent_node().unwrap(), None);
            let owner = node.owner_document().unwrap().unwrap();
            assert!(owner.is_same_node(Some(document.as_node())).unwrap());
        }
    }

    #[test]
    fn test_document_element_absent_in_fresh_document() {
        let document = HtmlDocument::new(&BrowsingContext::new(), DocumentInit::default()).unwrap();
        assert_eq!(document.document_element().unwrap(), None);
    }

    #[test]
    fn test_foreign_element_keeps_case() {
        let document = HtmlDocument::new(&BrowsingContext::new(), DocumentInit::default()).unwrap();
        let element = document
            .create_element_ns(Some("http://www.w3.org/2000/svg"), "foreignObject")
            .unwrap();

        assert_eq!(element.tag_name().unwrap(), "foreignObject");
        assert_eq!(element.prefix().unwrap(), None);
    }
}

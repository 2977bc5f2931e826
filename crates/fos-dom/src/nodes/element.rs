//! Element

use fos_context::DomResult;

use super::attr::Attr;
use super::document::Document;
use super::node::Node;
use super::node_type::NodeType;
use super::record::{NodeKey, NodeSlot, base_record};

/// The HTML namespace
pub const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";
/// The XMLNS namespace
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

node_interface!(
    /// Element node
    Element => "Element", Element
);

impl Element {
    /// Create an element owned by `document`
    pub(crate) fn create(
        document: &Document,
        namespace: Option<&str>,
        prefix: Option<&str>,
        local_name: &str,
        tag_name: String,
    ) -> DomResult<Element> {
        let record = base_record(NodeType::Element, Some(document.downgrade()))
            .with(NodeKey::NamespaceUri, namespace.map(str::to_string).into())
            .with(NodeKey::Prefix, prefix.map(str::to_string).into())
            .with(NodeKey::LocalName, local_name.into())
            .with(NodeKey::TagName, NodeSlot::Text(tag_name))
            .with(NodeKey::Attributes, NodeSlot::List(Vec::new()));
        Node::install(document.context(), Self::INTERFACE, record).map(Element)
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

    pub fn tag_name(&self) -> DomResult<String> {
        self.read(NodeKey::TagName)
    }

    fn is_html(&self) -> DomResult<bool> {
        Ok(self.namespace_uri()?.as_deref() == Some(HTML_NAMESPACE))
    }

    /// The attribute list, in insertion order
    pub fn attributes(&self) -> DomResult<Vec<Attr>> {
        let list: Vec<Node> = self.read(NodeKey::Attributes)?;
        Ok(list.into_iter().map(Attr::from_node_unchecked).collect())
    }

    /// First attribute whose qualified name is `qualified_name`
    fn attribute_named(&self, qualified_name: &str) -> DomResult<Option<Attr>> {
        let name = if self.is_html()? {
            qualified_name.to_ascii_lowercase()
        } else {
            qualified_name.to_string()
        };
        for attr in self.attributes()? {
            if attr.name()? == name {
                return Ok(Some(attr));
            }
        }
        Ok(None)
    }

    /// `getAttribute(qualifiedName)`
    pub fn get_attribute(&self, qualified_name: &str) -> DomResult<Option<String>> {
        match self.attribute_named(qualified_name)? {
            Some(attr) => attr.value().map(Some),
            None => Ok(None),
        }
    }

    /// `setAttribute(qualifiedName, value)`
    pub fn set_attribute(&self, qualified_name: &str, value: &str) -> DomResult<()> {
        if let Some(attr) = self.attribute_named(qualified_name)? {
            return attr.set_value(value);
        }
        let local_name = if self.is_html()? {
            qualified_name.to_ascii_lowercase()
        } else {
            qualified_name.to_string()
        };
        let attr = Attr::create(
            self.context(),
            self.read(NodeKey::OwnerDocument)?,
            None,
            None,
            &local_name,
            value,
            Some(self.downgrade()),
        )?;
        let mut list: Vec<Node> = self.read(NodeKey::Attributes)?;
        list.push(attr.into_node());
        self.write(NodeKey::Attributes, list)
    }

    /// Locate a namespace prefix for `namespace`, walking up the ancestors
    pub(crate) fn locate_namespace_prefix(&self, namespace: &str) -> DomResult<Option<String>> {
        if self.namespace_uri()?.as_deref() == Some(namespace) {
            if let Some(prefix) = self.prefix()? {
                return Ok(Some(prefix));
            }
        }
        for attr in self.attributes()? {
            if attr.prefix()?.as_deref() == Some("xmlns") && attr.value()? == namespace {
                return attr.local_name().map(Some);
            }
        }
        match self.parent_element()? {
            Some(parent) => parent.locate_namespace_prefix(namespace),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BrowsingContext;
    use crate::nodes::{DocumentInit, HtmlDocument};

    fn document() -> HtmlDocument {
        HtmlDocument::new(&BrowsingContext::new(), DocumentInit::default()).unwrap()
    }

    #[test]
    fn test_html_element_names() {
        let document = document();
        let div = document.create_element("DiV").unwrap();

        assert_eq!(div.local_name().unwrap(), "div");
        assert_eq!(div.tag_name().unwrap(), "DIV");
        assert_eq!(div.node_name().unwrap(), "DIV");
        assert_eq!(div.namespace_uri().unwrap().as_deref(), Some(HTML_NAMESPACE));
    }

    #[test]
    fn test_set_and_get_attribute() {
        let document = document();
        let div = document.create_element("div").unwrap();

        div.set_attribute("ID", "main").unwrap();
        assert_eq!(div.get_attribute("id").unwrap().as_deref(), Some("main"));

        div.set_attribute("id", "other").unwrap();
        assert_eq!(div.attributes().unwrap().len(), 1);
        assert_eq!(div.get_attribute("id").unwrap().as_deref(), Some("other"));
        assert_eq!(div.get_attribute("missing").unwrap(), None);
    }

    #[test]
    fn test_attribute_owner() {
        let document = document();
        let div = document.create_element("div").unwrap();
        div.set_attribute("class", "a").unwrap();

        let attr = div.attributes().unwrap().remove(0);
        assert_eq!(attr.owner_element().unwrap(), Some(div.clone()));
        assert_eq!(
            attr.owner_document().unwrap().map(Document::into_node),
            Some(document.as_node().clone())
        );
    }

    #[test]
    fn test_lookup_prefix_on_own_namespace() {
        let document = document();
        let svg = document
            .create_element_ns(Some("http://www.w3.org/2000/svg"), "svg:rect")
            .unwrap();

        assert_eq!(
            svg.lookup_prefix(Some("http://www.w3.org/2000/svg")).unwrap().as_deref(),
            Some("svg")
        );
        assert_eq!(svg.lookup_prefix(Some("urn:other")).unwrap(), None);
        assert_eq!(svg.lookup_prefix(None).unwrap(), None);
    }
}

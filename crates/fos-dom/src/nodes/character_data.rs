//! Character data nodes: Text, Comment, CDATASection, ProcessingInstruction

use std::ops::Deref;

use fos_context::DomResult;

use super::document::Document;
use super::node::Node;
use super::node_type::NodeType;
use super::record::{NodeKey, NodeRecord, character_data_record};

/// Shared accessors of nodes holding character data
pub trait CharacterData: Deref<Target = Node> {
    /// `data`
    fn data(&self) -> DomResult<String> {
        self.read(NodeKey::Data)
    }

    /// Overwrite `data`; `length` follows
    fn set_data(&self, data: &str) -> DomResult<()> {
        self.replace_data(data)
    }

    /// `length`, in UTF-16 code units
    fn length(&self) -> DomResult<usize> {
        self.read(NodeKey::Length)
    }
}

node_interface!(
    /// Text node
    Text => "Text", Text
);

node_interface!(
    /// Comment node
    Comment => "Comment", Comment
);

node_interface!(
    /// CDATA section node
    CdataSection => "CDATASection", CdataSection
);

node_interface!(
    /// Processing instruction node
    ProcessingInstruction => "ProcessingInstruction", ProcessingInstruction
);

impl CharacterData for Text {}
impl CharacterData for Comment {}
impl CharacterData for CdataSection {}
impl CharacterData for ProcessingInstruction {}

fn install(document: &Document, interface: &'static str, record: NodeRecord) -> DomResult<Node> {
    Node::install(document.context(), interface, record)
}

impl Text {
    pub(crate) fn create(document: &Document, data: &str) -> DomResult<Text> {
        let record = character_data_record(NodeType::Text, Some(document.downgrade()), data);
        install(document, Self::INTERFACE, record).map(Text)
    }
}

impl Comment {
    pub(crate) fn create(document: &Document, data: &str) -> DomResult<Comment> {
        let record = character_data_record(NodeType::Comment, Some(document.downgrade()), data);
        install(document, Self::INTERFACE, record).map(Comment)
    }
}

impl CdataSection {
    pub(crate) fn create(document: &Document, data: &str) -> DomResult<CdataSection> {
        let record =
            character_data_record(NodeType::CdataSection, Some(document.downgrade()), data);
        install(document, Self::INTERFACE, record).map(CdataSection)
    }
}

impl ProcessingInstruction {
    pub(crate) fn create(
        document: &Document,
        target: &str,
        data: &str,
    ) -> DomResult<ProcessingInstruction> {
        let record = character_data_record(
            NodeType::ProcessingInstruction,
            Some(document.downgrade()),
            data,
        )
        .with(NodeKey::Target, target.into());
        install(document, Self::INTERFACE, record).map(ProcessingInstruction)
    }

    /// `target`
    pub fn target(&self) -> DomResult<String> {
        self.read(NodeKey::Target)
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
    fn test_text_node() {
        let document = document();
        let text = document.create_text_node("hello").unwrap();

        assert_eq!(text.node_type().unwrap(), NodeType::Text);
        assert_eq!(text.node_name().unwrap(), "#text");
        assert_eq!(text.data().unwrap(), "hello");
        assert_eq!(text.length().unwrap(), 5);
        assert!(!text.is_connected().unwrap());
    }

    #[test]
    fn test_node_value_write_recomputes_length() {
        let document = document();
        let comment = document.create_comment("a").unwrap();

        let coerced = comment.set_node_value(Some("\u{1F600}!")).unwrap();
        assert_eq!(coerced, "\u{1F600}!");
        assert_eq!(comment.length().unwrap(), 3);

        comment.set_node_value(None).unwrap();
        assert_eq!(comment.data().unwrap(), "");
        assert_eq!(comment.length().unwrap(), 0);
    }

    #[test]
    fn test_processing_instruction() {
        let document = document();
        let pi = document
            .create_processing_instruction("xml-stylesheet", "href=\"a.css\"")
            .unwrap();

        assert_eq!(pi.node_name().unwrap(), "xml-stylesheet");
        assert_eq!(pi.target().unwrap(), "xml-stylesheet");
        assert_eq!(pi.node_value().unwrap().as_deref(), Some("href=\"a.css\""));

        pi.set_data("x").unwrap();
        assert_eq!(pi.text_content().unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_cdata_section() {
        let document = document();
        let cdata = document.create_cdata_section("<raw>").unwrap();

        assert_eq!(cdata.node_name().unwrap(), "#cdata-section");
        assert_eq!(cdata.data().unwrap(), "<raw>");
        // nodeValue only dispatches Text, ProcessingInstruction and Comment
        assert_eq!(cdata.node_value().unwrap(), None);
    }

    #[test]
    fn test_conversion_checks_type() {
        let document = document();
        let text: Node = document.create_text_node("t").unwrap().into();

        assert!(Text::try_from(text.clone()).is_ok());
        assert!(Comment::try_from(text).is_err());
    }
}

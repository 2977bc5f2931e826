//! Comprehensive tests for fos-dom
//!
//! Exercises the public surface the way a binding layer would.

use fos_dom::{
    Attr, BrowsingContext, CdataSection, CharacterData, Comment, CustomEvent, DispatchScope,
    Document, DocumentFragment, DocumentInit, DocumentType, DomError, DomResult, Element,
    ErrorKind, Event, EventDispatcher, EventInit, EventPhase, EventTarget, HtmlDocument, Node,
    NodeType, ProcessingInstruction, Text,
};
use serde_json::{Value, json};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn root_document(init: DocumentInit) -> anyhow::Result<(BrowsingContext, HtmlDocument)> {
    init_tracing();
    let context = BrowsingContext::new();
    let document = HtmlDocument::new(&context, init)?;
    Ok((context, document))
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

#[test]
fn test_zero_argument_construction_names_the_interface() {
    let cases: [(&str, DomResult<()>); 2] = [
        ("Event", Event::construct(&[]).map(drop)),
        ("CustomEvent", CustomEvent::construct(&[]).map(drop)),
    ];

    for (interface, result) in cases {
        assert_eq!(
            result.unwrap_err().to_string(),
            format!(
                "Failed to construct '{}': 1 argument required, but only 0 present.",
                interface
            )
        );
    }
}

#[test]
fn test_abstract_interfaces_refuse_construction() {
    assert_eq!(Node::construct().unwrap_err(), DomError::IllegalConstructor);
    assert_eq!(EventTarget::construct().unwrap_err(), DomError::IllegalConstructor);
    assert_eq!(
        fos_dom::Document::construct().unwrap_err(),
        DomError::IllegalConstructor
    );
}

#[test]
fn test_event_enumerates_only_is_trusted() -> anyhow::Result<()> {
    let event = Event::construct(&[json!("click"), json!({"bubbles": true, "detail": 3})])?;
    assert_eq!(serde_json::to_value(&event)?, json!({"isTrusted": true}));

    let custom = CustomEvent::construct(&[json!("ping"), json!({"detail": [1, 2]})])?;
    let fields = serde_json::to_value(&custom)?;
    let keys: Vec<&String> = fields.as_object().map(|o| o.keys().collect()).unwrap_or_default();
    assert_eq!(keys, vec!["isTrusted"]);
    Ok(())
}

// ============================================================================
// INVOCATION GUARD
// ============================================================================

#[test]
fn test_event_interface_object_rejects_every_accessor() {
    let proto = Event::interface_object();
    let results: Vec<DomError> = vec![
        proto.event_type().unwrap_err(),
        proto.target().unwrap_err(),
        proto.current_target().unwrap_err(),
        proto.event_phase().unwrap_err(),
        proto.cancel_bubble().unwrap_err(),
        proto.set_cancel_bubble(true).unwrap_err(),
        proto.set_cancel_bubble_value(&json!(1)).unwrap_err(),
        proto.bubbles().unwrap_err(),
        proto.cancelable().unwrap_err(),
        proto.composed().unwrap_err(),
        proto.time_stamp().unwrap_err(),
        proto.default_prevented().unwrap_err(),
        proto.stop_propagation().unwrap_err(),
        proto.stop_immediate_propagation().unwrap_err(),
        proto.prevent_default().unwrap_err(),
        proto.composed_path().unwrap_err(),
        proto.init_event("x", false, false).unwrap_err(),
    ];

    for err in results {
        assert_eq!(err, DomError::IllegalInvocation);
        assert_eq!(err.to_string(), "Illegal invocation");
    }
}

#[test]
fn test_node_interface_object_rejects_every_accessor() {
    let context = BrowsingContext::new();
    let proto = Node::interface_object(&context);
    let results: Vec<DomError> = vec![
        proto.node_type().unwrap_err(),
        proto.node_name().unwrap_err(),
        proto.node_value().unwrap_err(),
        proto.set_node_value(Some("x")).unwrap_err(),
        proto.text_content().unwrap_err(),
        proto.set_text_content(None).unwrap_err(),
        proto.base_uri().unwrap_err(),
        proto.is_connected().unwrap_err(),
        proto.owner_document().unwrap_err(),
        proto.get_root_node(Default::default()).unwrap_err(),
        proto.parent_node().unwrap_err(),
        proto.parent_element().unwrap_err(),
        proto.has_child_nodes().unwrap_err(),
        proto.child_nodes().unwrap_err(),
        proto.first_child().unwrap_err(),
        proto.last_child().unwrap_err(),
        proto.previous_sibling().unwrap_err(),
        proto.next_sibling().unwrap_err(),
        proto.is_equal_node(None).unwrap_err(),
        proto.is_same_node(None).unwrap_err(),
        proto.lookup_prefix(Some("urn:x")).unwrap_err(),
        proto.lookup_namespace_uri(None).unwrap_err(),
        proto.is_default_namespace(None).unwrap_err(),
        proto.normalize().unwrap_err(),
        proto.clone_node(false).unwrap_err(),
    ];

    for err in results {
        assert_eq!(err, DomError::IllegalInvocation);
    }
}

#[test]
fn test_concrete_interface_objects_reject_every_accessor() {
    let context = BrowsingContext::new();

    let document = Document::interface_object(&context);
    let html_document = HtmlDocument::interface_object(&context);
    let doctype = DocumentType::interface_object(&context);
    let element = Element::interface_object(&context);
    let attr = Attr::interface_object(&context);
    let text = Text::interface_object(&context);
    let comment = Comment::interface_object(&context);
    let cdata = CdataSection::interface_object(&context);
    let pi = ProcessingInstruction::interface_object(&context);
    let fragment = DocumentFragment::interface_object(&context);

    let results: Vec<DomError> = vec![
        document.url().unwrap_err(),
        document.document_uri().unwrap_err(),
        document.origin().unwrap_err(),
        document.compat_mode().unwrap_err(),
        document.character_set().unwrap_err(),
        document.charset().unwrap_err(),
        document.input_encoding().unwrap_err(),
        document.content_type().unwrap_err(),
        document.doctype().unwrap_err(),
        document.document_element().unwrap_err(),
        document.create_element("p").unwrap_err(),
        document.create_element_ns(None, "p").unwrap_err(),
        document.create_text_node("t").unwrap_err(),
        document.create_comment("c").unwrap_err(),
        document.create_cdata_section("d").unwrap_err(),
        document.create_processing_instruction("t", "d").unwrap_err(),
        document.create_attribute("a").unwrap_err(),
        document.create_attribute_ns(None, "a").unwrap_err(),
        document.create_document_fragment().unwrap_err(),
        html_document.url().unwrap_err(),
        html_document.origin().unwrap_err(),
        html_document.doctype().unwrap_err(),
        doctype.name().unwrap_err(),
        doctype.public_id().unwrap_err(),
        doctype.system_id().unwrap_err(),
        element.namespace_uri().unwrap_err(),
        element.prefix().unwrap_err(),
        element.local_name().unwrap_err(),
        element.tag_name().unwrap_err(),
        element.attributes().unwrap_err(),
        element.get_attribute("id").unwrap_err(),
        element.set_attribute("id", "x").unwrap_err(),
        attr.namespace_uri().unwrap_err(),
        attr.prefix().unwrap_err(),
        attr.local_name().unwrap_err(),
        attr.name().unwrap_err(),
        attr.value().unwrap_err(),
        attr.set_value("v").unwrap_err(),
        attr.owner_element().unwrap_err(),
        text.data().unwrap_err(),
        text.set_data("d").unwrap_err(),
        text.length().unwrap_err(),
        comment.data().unwrap_err(),
        cdata.data().unwrap_err(),
        pi.target().unwrap_err(),
        pi.data().unwrap_err(),
        fragment.node_name().unwrap_err(),
        fragment.has_child_nodes().unwrap_err(),
    ];

    for err in results {
        assert_eq!(err, DomError::IllegalInvocation);
    }
    assert_eq!(html_document.interface(), "HTMLDocument");
    assert_eq!(element.interface(), "Element");
}

#[test]
fn test_is_equal_node_rejects_non_node_argument() -> anyhow::Result<()> {
    let (context, document) = root_document(DocumentInit::default())?;
    let proto = Node::interface_object(&context);

    let err = document.is_equal_node(Some(&proto)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to execute 'isEqualNode' on 'Node': parameter 1 is not of type 'Node'."
    );
    assert_eq!(err.kind(), ErrorKind::Usage);
    Ok(())
}

// ============================================================================
// EVENT CONTROLS
// ============================================================================

#[test]
fn test_stop_propagation_and_cancel_bubble_share_state() -> anyhow::Result<()> {
    let event = Event::new("x", EventInit::default())?;
    assert!(!event.cancel_bubble()?);
    event.stop_propagation()?;
    assert!(event.cancel_bubble()?);

    let other = Event::new("x", EventInit::default())?;
    other.set_cancel_bubble(true)?;
    assert!(other.cancel_bubble()?);
    Ok(())
}

/// Listener run at the target, optionally marked passive
struct SingleListener {
    passive: bool,
}

impl EventDispatcher for SingleListener {
    fn dispatch(&mut self, scope: &mut DispatchScope<'_>) -> DomResult<()> {
        scope.set_current_target(Some(scope.target()))?;
        scope.set_event_phase(EventPhase::AtTarget)?;
        scope.set_in_passive_listener(self.passive)?;
        assert_eq!(scope.in_passive_listener()?, self.passive);
        scope.event().prevent_default()?;
        scope.set_in_passive_listener(false)
    }
}

#[test]
fn test_prevent_default_cases() -> anyhow::Result<()> {
    let (_context, document) = root_document(DocumentInit::default())?;
    let cancelable = EventInit {
        cancelable: true,
        ..EventInit::default()
    };

    let plain = Event::new("x", EventInit::default())?;
    plain.prevent_default()?;
    assert!(!plain.default_prevented()?);

    let active = Event::new("x", cancelable.clone())?;
    let not_canceled = document.dispatch_event(&active, &mut SingleListener { passive: false })?;
    assert!(!not_canceled);
    assert!(active.default_prevented()?);

    let passive = Event::new("x", cancelable)?;
    let not_canceled = document.dispatch_event(&passive, &mut SingleListener { passive: true })?;
    assert!(not_canceled);
    assert!(!passive.default_prevented()?);
    Ok(())
}

#[test]
fn test_custom_event_detail() -> anyhow::Result<()> {
    init_tracing();
    assert_eq!(CustomEvent::construct(&[json!("x")])?.detail()?, None);
    assert_eq!(
        CustomEvent::construct(&[json!("x"), json!({"detail": 7})])?.detail()?,
        Some(json!(7))
    );
    Ok(())
}

#[test]
fn test_custom_event_dispatches_as_event() -> anyhow::Result<()> {
    let (_context, document) = root_document(DocumentInit::default())?;
    let event = CustomEvent::new(
        "x",
        EventInit {
            detail: Some(Value::from("payload")),
            ..EventInit::default()
        },
    )?;

    assert!(document.dispatch_event(&event, &mut SingleListener { passive: false })?);
    assert_eq!(event.detail()?, Some(json!("payload")));
    Ok(())
}

// ============================================================================
// NODES
// ============================================================================

#[test]
fn test_is_equal_node_properties() -> anyhow::Result<()> {
    let (_context, document) = root_document(DocumentInit::default())?;
    let a = document.create_text_node("same")?;
    let b = document.create_text_node("same")?;
    let c = document.create_comment("same")?;

    assert!(a.is_equal_node(Some(a.as_node()))?);
    assert!(a.is_equal_node(Some(b.as_node()))?);
    assert!(b.is_equal_node(Some(a.as_node()))?);
    assert!(!a.is_equal_node(Some(c.as_node()))?);
    assert!(!a.is_equal_node(None)?);
    assert!(!a.is_same_node(Some(b.as_node()))?);
    Ok(())
}

#[test]
fn test_node_names() -> anyhow::Result<()> {
    let (_context, document) = root_document(DocumentInit::default())?;
    let doctype = document.doctype()?.expect("root document has a doctype");

    let names = [
        (document.create_element("span")?.into_node(), "SPAN"),
        (document.create_text_node("")?.into_node(), "#text"),
        (document.create_comment("")?.into_node(), "#comment"),
        (document.create_cdata_section("")?.into_node(), "#cdata-section"),
        (document.create_processing_instruction("pi", "")?.into_node(), "pi"),
        (document.create_attribute("id")?.into_node(), "id"),
        (document.create_document_fragment()?.into_node(), "#document-fragment"),
        (doctype.into_node(), "html"),
        (document.as_node().clone(), "#document"),
    ];

    for (node, name) in names {
        assert_eq!(node.node_name()?, name);
    }
    Ok(())
}

#[test]
fn test_node_type_tags_are_distinct() {
    assert_eq!(NodeType::Document.tag(), 9);
    assert_eq!(NodeType::DocumentFragment.tag(), 11);
    assert_ne!(Node::DOCUMENT_NODE, Node::DOCUMENT_FRAGMENT_NODE);
}

#[test]
fn test_unimplemented_operations_are_distinguishable() -> anyhow::Result<()> {
    let (_context, document) = root_document(DocumentInit::default())?;
    let element = document.create_element("div")?;
    let text = document.create_text_node("t")?;

    let results: Vec<DomError> = vec![
        document.normalize().unwrap_err(),
        document.clone_node(true).unwrap_err(),
        document.compare_document_position(&text).unwrap_err(),
        document.lookup_namespace_uri(None).unwrap_err(),
        document.is_default_namespace(None).unwrap_err(),
        document.insert_before(&text, None).unwrap_err(),
        document.append_child(&text).unwrap_err(),
        document.replace_child(&text, &text).unwrap_err(),
        document.remove_child(&text).unwrap_err(),
        element.text_content().unwrap_err(),
        element.set_text_content(Some("x")).unwrap_err(),
    ];

    for err in results {
        assert!(err.is_not_implemented(), "{:?}", err);
        assert!(err.to_string().ends_with("is not yet implemented"));
    }
    Ok(())
}

#[test]
fn test_base_uri_follows_document_url() -> anyhow::Result<()> {
    let (context, document) = root_document(DocumentInit::with_url("https://example.com/a/b"))?;
    let text = document.create_text_node("t")?;

    assert_eq!(text.base_uri()?.as_deref(), Some("https://example.com/a/b"));
    assert_eq!(context.document_base_uri().as_deref(), Some("https://example.com/a/b"));
    Ok(())
}

// ============================================================================
// ROOT DOCUMENT
// ============================================================================

#[test]
fn test_html_document_construction() -> anyhow::Result<()> {
    let (context, document) = root_document(DocumentInit::with_url("https://example.com/"))?;

    let doctype = document.doctype()?.expect("root document has a doctype");
    assert_eq!(doctype.name()?, "html");
    assert_eq!(document.origin()?.as_deref(), Some("https://example.com"));
    assert_eq!(document.url()?, "https://example.com/");

    let err = HtmlDocument::new(&context, DocumentInit::default()).unwrap_err();
    assert_eq!(err.to_string(), "Illegal constructor");
    Ok(())
}

#[test]
fn test_default_document_origin() -> anyhow::Result<()> {
    let (_context, document) = root_document(DocumentInit::default())?;
    assert_eq!(document.origin()?.as_deref(), Some("about://blank"));
    Ok(())
}

#[test]
fn test_origin_of_urls_without_authority() -> anyhow::Result<()> {
    let cases = [
        ("file:///tmp/x", "file://"),
        ("mailto:user@example.com", "mailto://example.com"),
        ("about:srcdoc", "about://srcdoc"),
    ];
    for (url, origin) in cases {
        let (_context, document) = root_document(DocumentInit::with_url(url))?;
        assert_eq!(document.origin()?.as_deref(), Some(origin), "origin of {}", url);
    }
    Ok(())
}

#[test]
fn test_unparsable_url_origin() -> anyhow::Result<()> {
    let (_context, document) = root_document(DocumentInit::with_url("::not a url::"))?;
    assert_eq!(document.origin()?.as_deref(), Some("null//null"));
    Ok(())
}

#[test]
fn test_document_init_from_script() -> anyhow::Result<()> {
    init_tracing();
    let context = BrowsingContext::new();
    let document = HtmlDocument::construct(
        &context,
        &[json!({"compatMode": "BackCompat", "encoding": "windows-1252", "contentType": "application/xhtml+xml"})],
    )?;

    assert_eq!(document.compat_mode()?, "BackCompat");
    assert_eq!(document.charset()?, "windows-1252");
    assert_eq!(document.content_type()?, "application/xhtml+xml");
    assert_eq!(document.url()?, "about:blank");
    Ok(())
}

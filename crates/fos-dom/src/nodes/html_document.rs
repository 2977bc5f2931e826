//! HTMLDocument: the root document of a browsing context

use std::fmt;
use std::ops::Deref;

use fos_context::{DomError, DomResult};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use super::document::Document;
use super::document_type::DocumentType;
use super::node::Node;
use super::node_type::NodeType;
use super::record::{NodeKey, NodeSlot, base_record};
use crate::browsing_context::BrowsingContext;

const DEFAULT_URL: &str = "about:blank";
const DEFAULT_COMPAT_MODE: &str = "CSS1Compat";
const DEFAULT_ENCODING: &str = "UTF-8";
const DEFAULT_CONTENT_TYPE: &str = "text/html";

/// Initial document state; unset fields take the defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentInit {
    #[serde(rename = "URL")]
    pub url: Option<String>,
    pub compat_mode: Option<String>,
    pub encoding: Option<String>,
    pub content_type: Option<String>,
}

impl DocumentInit {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }
}

/// `<scheme>://<host>`; only an unparsable URL yields `null//null`
fn derive_origin(url: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }
    let Ok(parsed) = Url::parse(url) else {
        return Some("null//null".to_string());
    };
    let host = match parsed.host_str() {
        Some(host) => host.to_string(),
        None => opaque_host(&parsed),
    };
    Some(format!("{}://{}", parsed.scheme(), host))
}

/// Host of a URL without an authority, read the legacy way: whatever
/// follows `scheme:` (and any `user@`) up to the first `/`, `?` or `#`.
/// `about:blank` gives `blank`, `file:///tmp` gives the empty string.
fn opaque_host(parsed: &Url) -> String {
    let rest = &parsed.as_str()[parsed.scheme().len() + 1..];
    if rest.starts_with("//") {
        return String::new();
    }
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..end];
    let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    host.to_ascii_lowercase()
}

/// The root document
#[derive(Clone, PartialEq, Eq)]
pub struct HtmlDocument(Document);

impl HtmlDocument {
    pub const INTERFACE: &'static str = "HTMLDocument";

    /// Build the context's root document together with its doctype.
    ///
    /// Succeeds once per browsing context; every later call fails with
    /// `Illegal constructor`.
    pub fn new(context: &BrowsingContext, init: DocumentInit) -> DomResult<HtmlDocument> {
        context.ensure_document_unconstructed()?;

        let url = init.url.unwrap_or_else(|| DEFAULT_URL.to_string());
        let origin = derive_origin(&url);
        context.set_document_base_uri(Some(url.clone()));

        // Built before the flag flips: the doctype constructor checks it too
        let doctype = DocumentType::new(context, None, "html", "", "")?.into_node();

        let record = base_record(NodeType::Document, None)
            .with(NodeKey::IsConnected, NodeSlot::Flag(true))
            .with(NodeKey::Children, NodeSlot::List(vec![doctype.clone()]))
            .with(NodeKey::FirstChild, NodeSlot::Ref(Some(doctype.downgrade())))
            .with(NodeKey::LastChild, NodeSlot::Ref(Some(doctype.downgrade())))
            .with(NodeKey::Url, NodeSlot::Text(url.clone()))
            .with(NodeKey::Origin, NodeSlot::OptText(origin.clone()))
            .with(
                NodeKey::CompatMode,
                NodeSlot::Text(init.compat_mode.unwrap_or_else(|| DEFAULT_COMPAT_MODE.to_string())),
            )
            .with(
                NodeKey::Encoding,
                NodeSlot::Text(init.encoding.unwrap_or_else(|| DEFAULT_ENCODING.to_string())),
            )
            .with(
                NodeKey::ContentType,
                NodeSlot::Text(init.content_type.unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string())),
            )
            .with(NodeKey::Doctype, NodeSlot::Owned(Some(doctype.clone())));
        let document = Node::install(context, Self::INTERFACE, record)?;

        doctype.write(NodeKey::ParentNode, Some(document.downgrade()))?;
        doctype.write(NodeKey::OwnerDocument, Some(document.downgrade()))?;
        doctype.write(NodeKey::IsConnected, true)?;

        context.complete_document_construction()?;
        context.set_root_document(&document);
        tracing::debug!("Constructed root document: {} (origin {:?})", url, origin);

        Ok(HtmlDocument(Document::from_node_unchecked(document)))
    }

    /// `new HTMLDocument(initialState?)` with script arguments
    pub fn construct(context: &BrowsingContext, args: &[Value]) -> DomResult<HtmlDocument> {
        let init = match args.first() {
            None | Some(Value::Null) => DocumentInit::default(),
            Some(value) => DocumentInit::deserialize(value).map_err(|err| {
                tracing::debug!("Rejected HTMLDocument initial state: {}", err);
                DomError::ConstructParameter {
                    interface: Self::INTERFACE,
                    index: 1,
                    expected: "DocumentInit",
                }
            })?,
        };
        Self::new(context, init)
    }

    /// The shared behavior object of the HTMLDocument interface
    pub fn interface_object(context: &BrowsingContext) -> HtmlDocument {
        HtmlDocument(Document::from_node_unchecked(Node::interface_object_of(
            context,
            Self::INTERFACE,
        )))
    }

    pub fn as_document(&self) -> &Document {
        &self.0
    }

    pub fn into_document(self) -> Document {
        self.0
    }
}

impl Deref for HtmlDocument {
    type Target = Document;

    fn deref(&self) -> &Document {
        &self.0
    }
}

impl From<HtmlDocument> for Document {
    fn from(document: HtmlDocument) -> Document {
        document.0
    }
}

impl From<HtmlDocument> for Node {
    fn from(document: HtmlDocument) -> Node {
        document.0.into_node()
    }
}

impl fmt::Debug for HtmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HTMLDocument").field(self.0.as_node()).finish()
    }
}

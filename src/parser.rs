//! HTML5 parsing into the renderer's document tree
//!
//! Markup is parsed with html5ever, which implements the WHATWG parsing
//! algorithm, so malformed input (missing end tags, stray cells, upper-case
//! tags) is repaired the way browsers repair it. The resulting `RcDom` is
//! then converted into an owned [`DocumentNode`] tree:
//!
//! - the document element (`html`) becomes the root
//! - comments, doctypes and processing instructions are dropped
//! - entities are already decoded in text and attribute values
//!
//! # Examples
//!
//! ```rust
//! use html_to_plaintext::parser::parse_html;
//!
//! let root = parse_html("<p>Testing &amp; Done").expect("Parser handles malformed HTML");
//! assert_eq!(root.text_content(), "Testing & Done");
//! ```
//!
//! # Depth Limit
//!
//! Conversion is recursive. Documents nesting deeper than the configured
//! ceiling fail with [`RenderError::DepthLimitExceeded`] instead of
//! exhausting the stack.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::charset::decode_html;
use crate::dom::{DocumentNode, Element};
use crate::error::RenderError;
use crate::options::DEFAULT_MAX_DEPTH;
use crate::renderer::with_stack;

/// Parse markup with the default depth ceiling
pub fn parse_html(markup: &str) -> Result<DocumentNode, RenderError> {
    HtmlParser::new().parse(markup)
}

/// Detect the charset of `html`, decode it and parse it
pub fn parse_html_bytes(html: &[u8]) -> Result<DocumentNode, RenderError> {
    HtmlParser::new().parse_bytes(html)
}

/// html5ever-backed parser with a nesting ceiling
#[derive(Debug, Clone, Copy)]
pub struct HtmlParser {
    max_depth: usize,
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlParser {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Create a parser rejecting documents nested deeper than `max_depth`
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Parse UTF-8 markup
    ///
    /// # Errors
    ///
    /// Only [`RenderError::DepthLimitExceeded`]; malformed markup is repaired.
    pub fn parse(&self, markup: &str) -> Result<DocumentNode, RenderError> {
        let dom = parse_document(RcDom::default(), Default::default()).one(markup);

        let document_element = dom
            .document
            .children
            .borrow()
            .iter()
            .find(|child| matches!(child.data, NodeData::Element { .. }))
            .cloned();

        match document_element {
            Some(handle) => Ok(self
                .convert(&handle, 1)?
                .unwrap_or_else(|| DocumentNode::from(Element::new("html")))),
            None => Ok(DocumentNode::from(Element::new("html"))),
        }
    }

    /// Decode and parse raw bytes
    ///
    /// # Errors
    ///
    /// [`RenderError::Encoding`] when the bytes are invalid for the detected
    /// charset, [`RenderError::DepthLimitExceeded`] for over-deep documents.
    pub fn parse_bytes(&self, html: &[u8]) -> Result<DocumentNode, RenderError> {
        let markup = decode_html(html)?;
        self.parse(&markup)
    }

    fn convert(&self, node: &Handle, depth: usize) -> Result<Option<DocumentNode>, RenderError> {
        match node.data {
            NodeData::Element {
                ref name, ref attrs, ..
            } => {
                if depth > self.max_depth {
                    return Err(RenderError::DepthLimitExceeded(self.max_depth));
                }

                let mut element = Element::new(&*name.local);
                element.attrs = attrs
                    .borrow()
                    .iter()
                    .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                    .collect();

                for child in node.children.borrow().iter() {
                    if let Some(converted) = with_stack(|| self.convert(child, depth + 1))? {
                        element.children.push(converted);
                    }
                }
                Ok(Some(DocumentNode::Element(element)))
            }
            NodeData::Text { ref contents } => {
                Ok(Some(DocumentNode::text(contents.borrow().to_string())))
            }
            // Document, comments, doctypes and processing instructions
            _ => Ok(None),
        }
    }
}

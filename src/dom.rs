//! Document tree consumed by the renderer
//!
//! The tree is a plain sum type over text and elements. It is produced by
//! [`crate::parser`] from markup, but can equally be built by hand:
//!
//! ```rust
//! use html_to_plaintext::dom::{DocumentNode, Element};
//!
//! let link = Element::new("a")
//!     .with_attr("href", "http://example.com/")
//!     .with_text("new products");
//! let root = DocumentNode::from(Element::new("p").with_text("See ").with_child(link));
//!
//! assert_eq!(root.text_content(), "See new products");
//! ```
//!
//! Tag and attribute names are compared case-insensitively, so trees built
//! from upper-case markup (`<TABLE>`, `<TD>`) behave like lower-case ones.

/// A node in the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentNode {
    /// Entity-decoded text content
    Text(String),
    /// An element with attributes and children
    Element(Element),
}

impl DocumentNode {
    /// Create a text node
    pub fn text(content: impl Into<String>) -> Self {
        DocumentNode::Text(content.into())
    }

    /// The element behind this node, if it is one
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            DocumentNode::Element(element) => Some(element),
            DocumentNode::Text(_) => None,
        }
    }

    /// Concatenated text of this node and all descendants, in document order
    pub fn text_content(&self) -> String {
        let mut output = String::new();
        self.collect_text(&mut output);
        output
    }

    fn collect_text(&self, output: &mut String) {
        match self {
            DocumentNode::Text(text) => output.push_str(text),
            DocumentNode::Element(element) => {
                for child in &element.children {
                    child.collect_text(output);
                }
            }
        }
    }
}

impl From<Element> for DocumentNode {
    fn from(element: Element) -> Self {
        DocumentNode::Element(element)
    }
}

/// An element node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name as written in the source
    pub name: String,
    /// Attributes in source order
    pub attrs: Vec<(String, String)>,
    /// Child nodes in source order
    pub children: Vec<DocumentNode>,
}

impl Element {
    /// Create an element with no attributes or children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append an attribute
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Append a child node
    pub fn with_child(mut self, child: impl Into<DocumentNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a text child
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(DocumentNode::Text(text.into()));
        self
    }

    /// True if this element has the given tag name (ASCII case-insensitive)
    pub fn is(&self, tag: &str) -> bool {
        self.name.eq_ignore_ascii_case(tag)
    }

    /// Value of the first attribute with the given name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(attr_name, _)| attr_name.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Whitespace-separated tokens of the `class` attribute
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_whitespace()
    }

    /// Child elements, skipping text
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(DocumentNode::as_element)
    }

    /// Concatenated descendant text
    pub fn text_content(&self) -> String {
        let mut output = String::new();
        for child in &self.children {
            child.collect_text(&mut output);
        }
        output
    }
}

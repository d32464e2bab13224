//! Minimal CSS-like selectors
//!
//! Only what base-element and table selection need is supported:
//!
//! - type selectors (`table`) and the universal selector (`*`)
//! - id selectors (`#invoice`)
//! - class selectors (`.address`, several may be chained)
//! - the descendant combinator (`div.content table`)
//! - comma-separated selector lists (`#invoice, .address`)
//!
//! Tag names match ASCII case-insensitively; ids and classes match exactly.
//!
//! ```rust
//! use html_to_plaintext::dom::{DocumentNode, Element};
//! use html_to_plaintext::selector::Selector;
//!
//! let tree = DocumentNode::from(
//!     Element::new("body").with_child(Element::new("table").with_attr("class", "address")),
//! );
//! let selector = Selector::parse("table.address").unwrap();
//! assert!(selector.find_first(&tree).is_some());
//! ```

use std::iter::Peekable;
use std::str::CharIndices;

use crate::dom::{DocumentNode, Element};
use crate::error::RenderError;

/// A parsed selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<Vec<Compound>>,
}

/// One compound selector such as `table#invoice.wide`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn matches(&self, element: &Element) -> bool {
        if let Some(ref tag) = self.tag
            && !element.is(tag)
        {
            return false;
        }
        if let Some(ref id) = self.id
            && element.attr("id") != Some(id.as_str())
        {
            return false;
        }
        self.classes
            .iter()
            .all(|class| element.classes().any(|c| c == class))
    }
}

impl Selector {
    /// Parse a selector list
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidSelector`] for empty input, empty
    /// `#`/`.` names, or characters outside the supported grammar
    /// (combinators other than whitespace, attribute selectors, pseudo-classes).
    pub fn parse(source: &str) -> Result<Self, RenderError> {
        let invalid = |reason: &str| RenderError::InvalidSelector {
            selector: source.to_string(),
            reason: reason.to_string(),
        };

        let mut alternatives = Vec::new();
        for alternative in source.split(',') {
            let compounds = alternative
                .split_whitespace()
                .map(|part| parse_compound(part).map_err(invalid))
                .collect::<Result<Vec<_>, _>>()?;
            if compounds.is_empty() {
                return Err(invalid("empty selector"));
            }
            alternatives.push(compounds);
        }

        Ok(Self {
            source: source.trim().to_string(),
            alternatives,
        })
    }

    /// The selector text as given
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Test an element against the selector
    ///
    /// `ancestors` lists the element's ancestors from the root down to its
    /// parent.
    pub fn matches(&self, element: &Element, ancestors: &[&Element]) -> bool {
        self.alternatives
            .iter()
            .any(|compounds| matches_complex(compounds, element, ancestors))
    }

    /// First matching element in document order (pre-order), if any
    pub fn find_first<'t>(&self, root: &'t DocumentNode) -> Option<&'t Element> {
        self.find_first_with_ancestors(root).map(|(element, _)| element)
    }

    /// Like [`find_first`](Self::find_first), also returning the match's
    /// ancestors from the root down to its parent
    pub fn find_first_with_ancestors<'t>(
        &self,
        root: &'t DocumentNode,
    ) -> Option<(&'t Element, Vec<&'t Element>)> {
        let root = root.as_element()?;
        if self.matches(root, &[]) {
            return Some((root, Vec::new()));
        }

        // Explicit stack of (element, next child index) so deep trees cannot
        // exhaust the call stack.
        let mut stack: Vec<(&'t Element, usize)> = vec![(root, 0)];
        while let Some(frame) = stack.last_mut() {
            let (element, index) = *frame;
            frame.1 += 1;
            match element.children.get(index) {
                None => {
                    stack.pop();
                }
                Some(DocumentNode::Element(child)) => {
                    let ancestors: Vec<&Element> = stack.iter().map(|(e, _)| *e).collect();
                    if self.matches(child, &ancestors) {
                        return Some((child, ancestors));
                    }
                    stack.push((child, 0));
                }
                Some(DocumentNode::Text(_)) => {}
            }
        }
        None
    }
}

fn matches_complex(compounds: &[Compound], element: &Element, ancestors: &[&Element]) -> bool {
    let Some((subject, rest)) = compounds.split_last() else {
        return false;
    };
    if !subject.matches(element) {
        return false;
    }

    // Descendant combinators only: matching each remaining compound against
    // the nearest qualifying ancestor is exact.
    let mut remaining = rest.iter().rev();
    let mut wanted = remaining.next();
    for ancestor in ancestors.iter().rev() {
        match wanted {
            Some(compound) if compound.matches(ancestor) => wanted = remaining.next(),
            Some(_) => {}
            None => break,
        }
    }
    wanted.is_none()
}

fn parse_compound(part: &str) -> Result<Compound, &'static str> {
    let mut compound = Compound::default();
    let mut chars = part.char_indices().peekable();

    if let Some(&(_, '*')) = chars.peek() {
        chars.next();
    } else if let Some(&(i, c)) = chars.peek()
        && is_name_char(c)
    {
        compound.tag = Some(read_name(part, i, &mut chars).to_string());
    }

    while let Some((i, c)) = chars.next() {
        let name = read_name(part, i + c.len_utf8(), &mut chars);
        match c {
            '#' if name.is_empty() => return Err("empty id"),
            '#' if compound.id.is_some() => return Err("more than one id"),
            '#' => compound.id = Some(name.to_string()),
            '.' if name.is_empty() => return Err("empty class name"),
            '.' => compound.classes.push(name.to_string()),
            _ => return Err("unsupported selector syntax"),
        }
    }

    Ok(compound)
}

fn read_name<'a>(part: &'a str, start: usize, chars: &mut Peekable<CharIndices<'a>>) -> &'a str {
    let mut end = start;
    while let Some(&(i, c)) = chars.peek() {
        if !is_name_char(c) {
            break;
        }
        end = i + c.len_utf8();
        chars.next();
    }
    &part[start..end]
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

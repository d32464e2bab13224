//! Render options and their compiled form
//!
//! [`RenderOptions`] is the public configuration surface. It can be built in
//! code with struct-update syntax or deserialized from a JSON-like object
//! using camelCase names:
//!
//! ```rust
//! use html_to_plaintext::options::{RenderOptions, TableSelection};
//!
//! let options = RenderOptions {
//!     wordwrap: Some(72),
//!     tables: TableSelection::from(vec!["#invoice", ".address"]),
//!     ..Default::default()
//! };
//! assert!(options.compile().is_ok());
//! ```
//!
//! Before rendering, options are validated and compiled into a
//! [`RenderConfig`] with parsed selectors. Invalid options fail fast.

use serde::{Deserialize, Deserializer};

use crate::dom::Element;
use crate::error::RenderError;
use crate::selector::Selector;

/// Default wrap width
pub const DEFAULT_WORDWRAP: usize = 80;

/// Default nesting ceiling
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Which tables are laid out as aligned columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TableSelection {
    /// No table is structured; all tables are flattened
    #[default]
    None,
    /// Every table is structured
    All,
    /// Tables matching any of these selectors are structured
    Selectors(Vec<String>),
}

impl From<bool> for TableSelection {
    fn from(all: bool) -> Self {
        if all {
            TableSelection::All
        } else {
            TableSelection::None
        }
    }
}

impl<S: Into<String>> From<Vec<S>> for TableSelection {
    fn from(selectors: Vec<S>) -> Self {
        TableSelection::Selectors(selectors.into_iter().map(Into::into).collect())
    }
}

impl<'de> Deserialize<'de> for TableSelection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Selectors(Vec<String>),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            None => TableSelection::None,
            Some(Raw::Flag(all)) => TableSelection::from(all),
            Some(Raw::Selectors(selectors)) => TableSelection::Selectors(selectors),
        })
    }
}

/// Public render configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Maximum line width; `None` disables wrapping
    #[serde(deserialize_with = "deserialize_wordwrap")]
    pub wordwrap: Option<usize>,
    /// End the line at every `\n` found in text
    pub preserve_newlines: bool,
    /// Tables to lay out as columns
    pub tables: TableSelection,
    /// Selector of the element to render instead of the whole document
    pub base_element: Option<String>,
    /// Render the whole document when `base_element` matches nothing
    pub return_dom_by_default: bool,
    /// Upper-case headings and table header cells
    pub uppercase_headings: bool,
    /// Omit a link's `[href]` when it repeats the link text
    pub hide_link_href_if_same_as_text: bool,
    /// Prefix for hrefs starting with `/`
    pub link_href_base_url: Option<String>,
    /// Render link text only
    pub ignore_href: bool,
    /// Render nothing for images
    pub ignore_image: bool,
    /// Maximum element nesting depth
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            wordwrap: Some(DEFAULT_WORDWRAP),
            preserve_newlines: false,
            tables: TableSelection::None,
            base_element: None,
            return_dom_by_default: true,
            uppercase_headings: false,
            hide_link_href_if_same_as_text: false,
            link_href_base_url: None,
            ignore_href: false,
            ignore_image: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl RenderOptions {
    /// Validate the options and compile their selectors
    ///
    /// # Errors
    ///
    /// - [`RenderError::InvalidOption`] for a zero `wordwrap` or `max_depth`
    /// - [`RenderError::InvalidSelector`] for a malformed `base_element` or
    ///   table selector
    pub fn compile(&self) -> Result<RenderConfig, RenderError> {
        if self.wordwrap == Some(0) {
            return Err(RenderError::InvalidOption(
                "wordwrap must be at least 1 (use None to disable wrapping)".to_string(),
            ));
        }
        if self.max_depth == 0 {
            return Err(RenderError::InvalidOption("max_depth must be at least 1".to_string()));
        }

        let tables = match self.tables {
            TableSelection::None => TableFilter::None,
            TableSelection::All => TableFilter::All,
            TableSelection::Selectors(ref selectors) => TableFilter::Matching(
                selectors
                    .iter()
                    .map(|source| Selector::parse(source))
                    .collect::<Result<_, _>>()?,
            ),
        };

        let base_element = self
            .base_element
            .as_deref()
            .map(Selector::parse)
            .transpose()?;

        Ok(RenderConfig {
            wordwrap: self.wordwrap,
            preserve_newlines: self.preserve_newlines,
            tables,
            base_element,
            return_dom_by_default: self.return_dom_by_default,
            uppercase_headings: self.uppercase_headings,
            hide_link_href_if_same_as_text: self.hide_link_href_if_same_as_text,
            link_href_base_url: self.link_href_base_url.clone(),
            ignore_href: self.ignore_href,
            ignore_image: self.ignore_image,
            max_depth: self.max_depth,
        })
    }
}

/// Accept a width, `null`, `false` (disabled) or `true` (default width)
fn deserialize_wordwrap<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<usize>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Width(usize),
        Flag(bool),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Width(width)) => Some(width),
        Some(Raw::Flag(true)) => Some(DEFAULT_WORDWRAP),
        Some(Raw::Flag(false)) | None => None,
    })
}

/// Compiled table selection
#[derive(Debug, Clone)]
pub enum TableFilter {
    None,
    All,
    Matching(Vec<Selector>),
}

impl TableFilter {
    /// Whether a table, given its ancestors, is laid out as columns
    pub fn selects(&self, table: &Element, ancestors: &[&Element]) -> bool {
        match self {
            TableFilter::None => false,
            TableFilter::All => true,
            TableFilter::Matching(selectors) => {
                selectors.iter().any(|selector| selector.matches(table, ancestors))
            }
        }
    }
}

/// Validated options with parsed selectors
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub wordwrap: Option<usize>,
    pub preserve_newlines: bool,
    pub tables: TableFilter,
    pub base_element: Option<Selector>,
    pub return_dom_by_default: bool,
    pub uppercase_headings: bool,
    pub hide_link_href_if_same_as_text: bool,
    pub link_href_base_url: Option<String>,
    pub ignore_href: bool,
    pub ignore_image: bool,
    pub max_depth: usize,
}

impl Default for RenderConfig {
    /// Compiled form of [`RenderOptions::default`]
    fn default() -> Self {
        Self {
            wordwrap: Some(DEFAULT_WORDWRAP),
            preserve_newlines: false,
            tables: TableFilter::None,
            base_element: None,
            return_dom_by_default: true,
            uppercase_headings: false,
            hide_link_href_if_same_as_text: false,
            link_href_base_url: None,
            ignore_href: false,
            ignore_image: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

//! Tree dispatcher
//!
//! [`TextRenderer`] walks a [`DocumentNode`] tree depth-first and turns it
//! into plain text. Each element is classified into a [`TagCategory`] and
//! delegated to the block, list, table or inline formatter; all of them
//! append to one [`BlockFormatter`] threaded through the walk.
//!
//! # Examples
//!
//! ```rust
//! use html_to_plaintext::renderer::TextRenderer;
//!
//! let renderer = TextRenderer::new();
//! let text = renderer
//!     .render_html("<h1>Welcome</h1><p>See <a href=\"/docs\">the docs</a>.</p>")
//!     .expect("Rendering failed");
//! assert_eq!(text, "Welcome\n\nSee the docs [/docs].");
//! ```
//!
//! # Element Categories
//!
//! | Category                  | Tags                                              |
//! |---------------------------|---------------------------------------------------|
//! | Spaced blocks             | `p`, `h1`-`h6`, `blockquote`, `pre`, `hr`          |
//! | Line-breaking containers  | `div`, `section`, `article`, `dl`, `center`, ...   |
//! | Lists                     | `ul`, `ol`, `li`                                  |
//! | Tables                    | `table` and its row groups, rows and cells        |
//! | Inline decorations        | `a`, `img`                                        |
//! | Skipped with children     | `head`, `script`, `style`, `template`, ...         |
//!
//! Any other tag is transparent: its children render in its place.

use std::borrow::Cow;

use crate::block::{BlockFormatter, BlockKind};
use crate::dom::{DocumentNode, Element};
use crate::error::RenderError;
use crate::inline::{anchor_suffix, image_text};
use crate::list::UNORDERED_MARKER;
use crate::options::{RenderConfig, RenderOptions};
use crate::parser::HtmlParser;
use crate::table::TableModel;

/// Render a tree with the given options
///
/// # Errors
///
/// Option validation errors, or [`RenderError::DepthLimitExceeded`].
pub fn render(root: &DocumentNode, options: &RenderOptions) -> Result<String, RenderError> {
    TextRenderer::with_options(options)?.render(root)
}

/// Stack left before recursion moves to a fresh segment
const STACK_RED_ZONE: usize = 128 * 1024;

/// Size of each fresh stack segment
const STACK_SEGMENT: usize = 2 * 1024 * 1024;

/// Run one level of a recursive walk, growing the stack when it runs low
///
/// Recursion depth is bounded by `max_depth`, not by the thread's stack.
pub(crate) fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, f)
}

/// Elements whose content never reaches the output
const SKIPPED_ELEMENTS: &[&str] = &[
    "head", "title", "style", "script", "noscript", "template", "iframe", "object", "embed",
    "applet", "svg", "canvas", "link", "meta", "base",
];

/// Containers that break the line without blank-line spacing
const DIVISION_ELEMENTS: &[&str] = &[
    "div", "section", "article", "header", "footer", "main", "nav", "aside", "address", "figure",
    "figcaption", "form", "fieldset", "dl", "dt", "dd", "center", "details", "summary",
];

/// Table parts that are transparent outside a structured table
const TABLE_PARTS: &[&str] = &["thead", "tbody", "tfoot", "tr", "td", "th", "caption"];

/// How the dispatcher treats an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagCategory {
    Skip,
    Block(BlockKind),
    LineBreak,
    Rule,
    List { ordered: bool },
    ListItem,
    Table,
    TablePart,
    Anchor,
    Image,
    Inline,
}

/// Classify an element by tag name (ASCII case-insensitive)
pub fn classify(element: &Element) -> TagCategory {
    let name = element.name.to_ascii_lowercase();
    let name = name.as_str();

    if SKIPPED_ELEMENTS.contains(&name) {
        return TagCategory::Skip;
    }
    if DIVISION_ELEMENTS.contains(&name) {
        return TagCategory::Block(BlockKind::Division);
    }
    if TABLE_PARTS.contains(&name) {
        return TagCategory::TablePart;
    }

    match name {
        "p" => TagCategory::Block(BlockKind::Paragraph),
        "h1" => TagCategory::Block(BlockKind::Heading(1)),
        "h2" => TagCategory::Block(BlockKind::Heading(2)),
        "h3" => TagCategory::Block(BlockKind::Heading(3)),
        "h4" => TagCategory::Block(BlockKind::Heading(4)),
        "h5" => TagCategory::Block(BlockKind::Heading(5)),
        "h6" => TagCategory::Block(BlockKind::Heading(6)),
        "blockquote" => TagCategory::Block(BlockKind::Quote),
        "pre" => TagCategory::Block(BlockKind::Preformatted),
        "br" => TagCategory::LineBreak,
        "hr" => TagCategory::Rule,
        "ul" => TagCategory::List { ordered: false },
        "ol" => TagCategory::List { ordered: true },
        "li" => TagCategory::ListItem,
        "table" => TagCategory::Table,
        "a" => TagCategory::Anchor,
        "img" => TagCategory::Image,
        _ => TagCategory::Inline,
    }
}

/// Plain-text renderer
///
/// Holds compiled options and can be reused for any number of documents.
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    config: RenderConfig,
}

impl TextRenderer {
    /// Create a renderer with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with custom options
    ///
    /// # Errors
    ///
    /// [`RenderError::InvalidOption`] or [`RenderError::InvalidSelector`]
    /// when the options do not compile.
    pub fn with_options(options: &RenderOptions) -> Result<Self, RenderError> {
        Ok(Self {
            config: options.compile()?,
        })
    }

    /// Render a tree to plain text
    ///
    /// # Arguments
    ///
    /// * `root` - Root of the document tree
    ///
    /// # Returns
    ///
    /// The rendered text, `\n`-separated without a trailing newline. An
    /// unmatched base element yields `""` when `return_dom_by_default` is off.
    pub fn render(&self, root: &DocumentNode) -> Result<String, RenderError> {
        let mut walker = Walker::new(&self.config);

        match self.config.base_element {
            Some(ref selector) => match selector.find_first_with_ancestors(root) {
                Some((element, ancestors)) => {
                    log::debug!(
                        "Base element '{}' matched <{}> at depth {}",
                        selector.as_str(),
                        element.name,
                        ancestors.len() + 1
                    );
                    walker.ancestors = ancestors;
                    walker.walk_element(element)?;
                }
                None if self.config.return_dom_by_default => {
                    log::debug!(
                        "Base element '{}' not found, rendering whole document",
                        selector.as_str()
                    );
                    walker.walk_node(root)?;
                }
                None => {
                    log::debug!(
                        "Base element '{}' not found, rendering nothing",
                        selector.as_str()
                    );
                    return Ok(String::new());
                }
            },
            None => walker.walk_node(root)?,
        }

        Ok(walker.blocks.finish())
    }

    /// Parse markup and render it
    pub fn render_html(&self, markup: &str) -> Result<String, RenderError> {
        let root = HtmlParser::with_max_depth(self.config.max_depth).parse(markup)?;
        self.render(&root)
    }

    /// Decode, parse and render raw bytes
    pub fn render_html_bytes(&self, html: &[u8]) -> Result<String, RenderError> {
        let root = HtmlParser::with_max_depth(self.config.max_depth).parse_bytes(html)?;
        self.render(&root)
    }
}

/// State of one render pass
pub(crate) struct Walker<'a> {
    pub(crate) config: &'a RenderConfig,
    pub(crate) blocks: BlockFormatter,
    /// Elements from the root down to the current node's parent
    pub(crate) ancestors: Vec<&'a Element>,
    /// Inside a `th` of a structured table
    header_cell: bool,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(config: &'a RenderConfig) -> Self {
        Self {
            config,
            blocks: BlockFormatter::new(config.wordwrap),
            ancestors: Vec::new(),
            header_cell: false,
        }
    }

    pub(crate) fn walk_node(&mut self, node: &'a DocumentNode) -> Result<(), RenderError> {
        match node {
            DocumentNode::Text(text) => {
                self.push_text_node(text);
                Ok(())
            }
            DocumentNode::Element(element) => self.walk_element(element),
        }
    }

    pub(crate) fn walk_element(&mut self, element: &'a Element) -> Result<(), RenderError> {
        self.check_depth()?;
        with_stack(|| self.dispatch(element))
    }

    fn dispatch(&mut self, element: &'a Element) -> Result<(), RenderError> {
        match classify(element) {
            TagCategory::Skip => {}
            TagCategory::Block(kind) => {
                self.blocks.open_block(kind);
                self.walk_children(element)?;
                self.blocks.close_block(kind);
            }
            TagCategory::LineBreak => self.blocks.force_break(),
            TagCategory::Rule => self.blocks.rule(),
            TagCategory::List { ordered } => self.render_list(element, ordered)?,
            TagCategory::ListItem => self.render_list_item(element, UNORDERED_MARKER)?,
            TagCategory::Table if self.config.tables.selects(element, &self.ancestors) => {
                log::trace!("Table selected for column layout");
                self.render_table(element)?;
            }
            TagCategory::Table | TagCategory::TablePart => {
                self.walk_children(element)?;
                self.blocks.push_word_break();
            }
            TagCategory::Anchor => {
                self.walk_children(element)?;
                if let Some(suffix) = anchor_suffix(element, self.config) {
                    self.blocks.push_text(" ");
                    self.blocks.push_text(&suffix);
                }
            }
            TagCategory::Image => {
                if let Some(text) = image_text(element, self.config) {
                    self.blocks.push_text(&text);
                }
            }
            TagCategory::Inline => self.walk_children(element)?,
        }
        Ok(())
    }

    pub(crate) fn check_depth(&self) -> Result<(), RenderError> {
        if self.ancestors.len() >= self.config.max_depth {
            return Err(RenderError::DepthLimitExceeded(self.config.max_depth));
        }
        Ok(())
    }

    fn walk_children(&mut self, element: &'a Element) -> Result<(), RenderError> {
        self.ancestors.push(element);
        for child in &element.children {
            self.walk_node(child)?;
        }
        self.ancestors.pop();
        Ok(())
    }

    fn push_text_node(&mut self, text: &str) {
        if self.blocks.in_preformatted() {
            self.blocks.push_preformatted(text);
            return;
        }

        let uppercase =
            self.config.uppercase_headings && (self.header_cell || self.blocks.in_heading());
        let text = if uppercase {
            Cow::Owned(text.to_uppercase())
        } else {
            Cow::Borrowed(text)
        };

        if self.config.preserve_newlines {
            // A newline ends the line; two in a row leave a blank line
            let mut segments = text.split('\n').peekable();
            let mut between_newlines = false;
            while let Some(segment) = segments.next() {
                self.blocks.push_text(segment);
                if segments.peek().is_none() {
                    break;
                }
                if between_newlines && segment.trim().is_empty() {
                    self.blocks.force_break();
                } else {
                    self.blocks.flush_line();
                }
                between_newlines = true;
            }
        } else {
            self.blocks.push_text(&text);
        }
    }

    fn render_table(&mut self, table: &'a Element) -> Result<(), RenderError> {
        let model = TableModel::build(table, |cell, path| self.render_cell(cell, path))?;
        log::debug!(
            "Laid out table: {} rows x {} columns",
            model.row_count(),
            model.column_count()
        );

        self.blocks.open_block(BlockKind::Table);
        for line in model.render() {
            self.blocks.push_line(line);
        }
        self.blocks.close_block(BlockKind::Table);
        Ok(())
    }

    /// Render a cell on its own, keeping only non-blank lines
    fn render_cell(
        &self,
        cell: &'a Element,
        path: &[&'a Element],
    ) -> Result<Vec<String>, RenderError> {
        let mut walker = Walker::new(self.config);
        walker.ancestors = self.ancestors.iter().chain(path).copied().collect();
        walker.header_cell = cell.is("th");
        walker.check_depth()?;
        walker.walk_children(cell)?;

        Ok(walker
            .blocks
            .into_lines()
            .into_iter()
            .filter(|line| !line.is_empty())
            .collect())
    }
}

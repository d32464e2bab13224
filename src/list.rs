//! List markers and item layout
//!
//! Items hang under their marker: the first line of an item starts with the
//! marker, continuation lines are indented by the marker's width. Ordered
//! markers are padded so every item of a list starts its text in the same
//! column:
//!
//! ```text
//!  * unordered item
//!    continued
//! 9.  ninth
//! 10. tenth
//! ```

use unicode_width::UnicodeWidthStr;

use crate::block::BlockKind;
use crate::dom::{DocumentNode, Element};
use crate::error::RenderError;
use crate::renderer::Walker;

/// Marker of unordered (and stray) list items
pub const UNORDERED_MARKER: &str = " * ";

/// Markers for a list of `count` items
///
/// ```rust
/// use html_to_plaintext::list::list_markers;
///
/// assert_eq!(list_markers(2, false), vec![" * ", " * "]);
/// assert_eq!(list_markers(10, true)[8], "9.  ");
/// assert_eq!(list_markers(10, true)[9], "10. ");
/// ```
pub fn list_markers(count: usize, ordered: bool) -> Vec<String> {
    if !ordered {
        return vec![UNORDERED_MARKER.to_string(); count];
    }

    let width = count.to_string().len() + 2;
    (1..=count)
        .map(|n| format!("{:<width$}", format!("{n}.")))
        .collect()
}

impl<'a> Walker<'a> {
    /// Render a `ul`/`ol` with one marker per direct `li` child
    pub(crate) fn render_list(
        &mut self,
        list: &'a Element,
        ordered: bool,
    ) -> Result<(), RenderError> {
        let count = list.child_elements().filter(|child| child.is("li")).count();
        let mut markers = list_markers(count, ordered).into_iter();

        self.blocks.open_block(BlockKind::List);
        self.ancestors.push(list);
        for child in &list.children {
            match child {
                DocumentNode::Element(item) if item.is("li") => {
                    let marker = markers.next().unwrap_or_else(|| UNORDERED_MARKER.to_string());
                    self.render_list_item(item, &marker)?;
                }
                other => self.walk_node(other)?,
            }
        }
        self.ancestors.pop();
        self.blocks.close_block(BlockKind::List);
        Ok(())
    }

    /// Render one item under `marker`
    ///
    /// An item with no content still emits its marker line. Blank-line
    /// requests left over at the end of the item are dropped so siblings
    /// stay adjacent.
    pub(crate) fn render_list_item(
        &mut self,
        item: &'a Element,
        marker: &str,
    ) -> Result<(), RenderError> {
        self.check_depth()?;
        self.blocks.flush_line();
        let hang = " ".repeat(marker.width());
        self.blocks.push_item_indent(marker, &hang);

        self.ancestors.push(item);
        for child in &item.children {
            self.walk_node(child)?;
        }
        self.ancestors.pop();

        self.blocks.flush_line();
        if !self.blocks.pop_indent() {
            self.blocks.push_line(marker.to_string());
        }
        self.blocks.cancel_blank_line();
        Ok(())
    }
}

//! Block spacing and quote indentation
//!
//! [`BlockFormatter`] owns the [`LineBuilder`] for a render pass and keeps a
//! stack of the block constructs currently open. Opening or closing a block
//! ends the current line; spaced blocks additionally request a blank line,
//! which the line builder emits lazily before the next committed line. This
//! is what keeps blank lines from piling up at the very start and end of the
//! document or between nested blocks.
//!
//! The formatter dereferences to its line builder, so inline content is
//! pushed through it directly.

use std::ops::{Deref, DerefMut};

use crate::wrap::LineBuilder;

/// Width of a horizontal rule when wrapping is disabled
pub const DEFAULT_RULE_WIDTH: usize = 80;

/// Quote prefix applied to every line inside a blockquote
const QUOTE_PREFIX: &str = "> ";

/// Block constructs that affect spacing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Heading(u8),
    /// `div` and other containers that only break the line
    Division,
    Quote,
    List,
    Preformatted,
    Table,
}

/// Spacing applied around a block boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Spacing {
    LineBreak,
    BlankLine,
}

/// Block-level state threaded through the tree walk
#[derive(Debug)]
pub struct BlockFormatter {
    lines: LineBuilder,
    open: Vec<BlockKind>,
}

impl BlockFormatter {
    pub fn new(wrap: Option<usize>) -> Self {
        Self {
            lines: LineBuilder::new(wrap),
            open: Vec::new(),
        }
    }

    /// Enter a block
    pub fn open_block(&mut self, kind: BlockKind) {
        let spacing = self.spacing(kind);
        self.lines.flush_line();
        if spacing == Spacing::BlankLine {
            self.lines.request_blank_line();
        }
        if kind == BlockKind::Quote {
            self.lines.push_indent(QUOTE_PREFIX);
        }
        self.open.push(kind);
    }

    /// Leave the innermost block
    pub fn close_block(&mut self, kind: BlockKind) {
        debug_assert_eq!(self.open.last(), Some(&kind), "unbalanced block stack");
        self.open.pop();
        self.lines.flush_line();
        if kind == BlockKind::Quote {
            self.lines.pop_indent();
        }
        if self.spacing(kind) == Spacing::BlankLine {
            self.lines.request_blank_line();
        }
    }

    /// Emit a horizontal rule as its own spaced block
    pub fn rule(&mut self) {
        self.lines.flush_line();
        self.lines.request_blank_line();
        let width = self.lines.available_width().unwrap_or(DEFAULT_RULE_WIDTH);
        self.lines.push_line("-".repeat(width));
        self.lines.request_blank_line();
    }

    /// True inside `pre`
    pub fn in_preformatted(&self) -> bool {
        self.open.contains(&BlockKind::Preformatted)
    }

    /// True inside any heading
    pub fn in_heading(&self) -> bool {
        self.open.iter().any(|kind| matches!(kind, BlockKind::Heading(_)))
    }

    /// Number of lists currently open
    pub fn list_depth(&self) -> usize {
        self.open.iter().filter(|kind| **kind == BlockKind::List).count()
    }

    /// Finish the pass and produce the final text
    pub fn finish(self) -> String {
        self.lines.finish()
    }

    /// Finish the pass and produce normalized lines
    pub fn into_lines(self) -> Vec<String> {
        self.lines.into_lines()
    }

    fn spacing(&self, kind: BlockKind) -> Spacing {
        match kind {
            BlockKind::Division => Spacing::LineBreak,
            // Nested lists hang under their parent item
            BlockKind::List if self.list_depth() > 0 => Spacing::LineBreak,
            _ => Spacing::BlankLine,
        }
    }
}

impl Deref for BlockFormatter {
    type Target = LineBuilder;

    fn deref(&self) -> &Self::Target {
        &self.lines
    }
}

impl DerefMut for BlockFormatter {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(blocks: &mut BlockFormatter, text: &str) {
        blocks.open_block(BlockKind::Paragraph);
        blocks.push_text(text);
        blocks.close_block(BlockKind::Paragraph);
    }

    #[test]
    fn test_paragraphs_are_separated_by_one_blank_line() {
        let mut blocks = BlockFormatter::new(Some(80));
        paragraph(&mut blocks, "one");
        paragraph(&mut blocks, "two");
        assert_eq!(blocks.finish(), "one\n\ntwo");
    }

    #[test]
    fn test_no_blank_lines_at_edges() {
        let mut blocks = BlockFormatter::new(Some(80));
        blocks.open_block(BlockKind::Division);
        paragraph(&mut blocks, "only");
        blocks.close_block(BlockKind::Division);
        assert_eq!(blocks.finish(), "only");
    }

    #[test]
    fn test_divisions_only_break_lines() {
        let mut blocks = BlockFormatter::new(Some(80));
        for text in ["a", "b"] {
            blocks.open_block(BlockKind::Division);
            blocks.push_text(text);
            blocks.close_block(BlockKind::Division);
        }
        assert_eq!(blocks.finish(), "a\nb");
    }

    #[test]
    fn test_nested_spaced_blocks_do_not_stack_blank_lines() {
        let mut blocks = BlockFormatter::new(Some(80));
        paragraph(&mut blocks, "intro");
        blocks.open_block(BlockKind::Quote);
        paragraph(&mut blocks, "first");
        paragraph(&mut blocks, "second");
        blocks.close_block(BlockKind::Quote);
        paragraph(&mut blocks, "outro");
        assert_eq!(blocks.finish(), "intro\n\n> first\n>\n> second\n\noutro");
    }

    #[test]
    fn test_rule_spans_available_width() {
        let mut blocks = BlockFormatter::new(Some(10));
        blocks.push_text("above");
        blocks.rule();
        blocks.push_text("below");
        assert_eq!(blocks.finish(), "above\n\n----------\n\nbelow");

        let mut blocks = BlockFormatter::new(None);
        blocks.rule();
        assert_eq!(blocks.finish(), "-".repeat(DEFAULT_RULE_WIDTH));
    }

    #[test]
    fn test_rule_inside_quote_narrows() {
        let mut blocks = BlockFormatter::new(Some(10));
        blocks.open_block(BlockKind::Quote);
        blocks.rule();
        blocks.close_block(BlockKind::Quote);
        assert_eq!(blocks.finish(), "> --------");
    }

    #[test]
    fn test_block_state_queries() {
        let mut blocks = BlockFormatter::new(Some(80));
        blocks.open_block(BlockKind::List);
        blocks.open_block(BlockKind::List);
        blocks.open_block(BlockKind::Heading(2));
        assert_eq!(blocks.list_depth(), 2);
        assert!(blocks.in_heading());
        assert!(!blocks.in_preformatted());
    }
}

//! Line builder and word-wrap engine
//!
//! The builder accumulates *visible* text into lines no wider than the wrap
//! width. It knows nothing about tags: inline decorations such as a link's
//! ` [url]` suffix are resolved to literal text before they reach it, so they
//! are measured exactly like the words around them.
//!
//! # Wrapping Rule
//!
//! Text is split into words at whitespace. A word may be assembled from
//! several pushes (`foo<b>bar</b>` yields the single word `foobar`). When a
//! word of width `len` is committed to a line of width `w`:
//!
//! - an empty line takes the word unconditionally, even if it overflows
//!   (long words are never split)
//! - otherwise the word joins the line if `w + 1 + len <= limit`
//! - otherwise the line is committed and the word starts the next one
//!
//! The limit is the wrap width minus the width of the active indentation
//! prefix, so complete lines (prefix included) respect the wrap width.
//!
//! # Examples
//!
//! ```rust
//! use html_to_plaintext::wrap::LineBuilder;
//!
//! let mut builder = LineBuilder::new(Some(20));
//! builder.push_text("111111111 222222222 333333333");
//! builder.flush_line();
//! assert_eq!(builder.finish(), "111111111 222222222\n333333333");
//! ```

use unicode_width::UnicodeWidthStr;

use crate::output::OutputDocument;

/// Indentation applied to every line committed while it is active
#[derive(Debug, Clone)]
struct Indent {
    /// Prefix of the first line committed under this indent
    first: String,
    /// Prefix of every later line
    rest: String,
    first_used: bool,
    /// List items swallow blank-line requests made before their first line
    item: bool,
}

/// Mutable line-building state for one render pass
#[derive(Debug)]
pub struct LineBuilder {
    wrap: Option<usize>,
    output: OutputDocument,
    line: String,
    line_width: usize,
    word: String,
    indents: Vec<Indent>,
    blank_requested: bool,
    /// The current line holds preformatted text
    verbatim: bool,
}

impl LineBuilder {
    /// Create a builder; `None` disables wrapping
    pub fn new(wrap: Option<usize>) -> Self {
        Self {
            wrap,
            output: OutputDocument::new(),
            line: String::new(),
            line_width: 0,
            word: String::new(),
            indents: Vec::new(),
            blank_requested: false,
            verbatim: false,
        }
    }

    /// Width left for content once the indentation prefix is applied
    pub fn available_width(&self) -> Option<usize> {
        let prefix = self.rest_prefix().width();
        self.wrap.map(|wrap| wrap.saturating_sub(prefix).max(1))
    }

    /// Push visible text, splitting it into words at whitespace
    pub fn push_text(&mut self, text: &str) {
        for ch in text.chars() {
            if ch.is_whitespace() {
                self.push_word_break();
            } else {
                self.word.push(ch);
            }
        }
    }

    /// End the pending word, committing it to the current line
    pub fn push_word_break(&mut self) {
        if self.word.is_empty() {
            return;
        }
        let word = std::mem::take(&mut self.word);
        let len = word.width();

        if self.line.is_empty() {
            self.line = word;
            self.line_width = len;
            return;
        }

        let fits = self
            .available_width()
            .is_none_or(|limit| self.line_width + 1 + len <= limit);
        if fits {
            self.line.push(' ');
            self.line.push_str(&word);
            self.line_width += 1 + len;
        } else {
            self.commit_line();
            self.line = word;
            self.line_width = len;
        }
    }

    /// Commit the current line if it has content
    pub fn flush_line(&mut self) {
        self.push_word_break();
        if self.line.is_empty() {
            self.verbatim = false;
        } else {
            self.commit_line();
        }
    }

    /// Terminate the current line regardless of width
    ///
    /// On an empty line this emits an empty line, so two consecutive breaks
    /// leave a blank line between their neighbours.
    pub fn force_break(&mut self) {
        self.push_word_break();
        self.commit_line();
    }

    /// Push text verbatim: spaces are kept, `\n` ends the line, nothing wraps
    ///
    /// Lines holding preformatted text survive output normalization as is,
    /// blank ones included.
    pub fn push_preformatted(&mut self, text: &str) {
        self.push_word_break();
        for (i, segment) in text.split('\n').enumerate() {
            if i > 0 {
                self.commit_line();
            }
            self.line.push_str(segment);
            self.line_width += segment.width();
            self.verbatim = true;
        }
    }

    /// Emit a complete pre-laid-out line (table rows, rules)
    pub fn push_line(&mut self, text: String) {
        self.flush_line();
        self.emit(text, false);
    }

    /// Ask for a blank line before the next committed line
    ///
    /// Requests are dropped at the very start of the document and inside a
    /// list item that has not committed its first line yet.
    pub fn request_blank_line(&mut self) {
        if !self.at_item_start() {
            self.blank_requested = true;
        }
    }

    /// Drop any pending blank-line request
    pub fn cancel_blank_line(&mut self) {
        self.blank_requested = false;
    }

    /// Start indenting with `prefix` on every line (blockquotes)
    pub fn push_indent(&mut self, prefix: &str) {
        self.indents.push(Indent {
            first: prefix.to_string(),
            rest: prefix.to_string(),
            first_used: false,
            item: false,
        });
    }

    /// Start a hanging indent: `marker` on the first line, `rest` after
    pub fn push_item_indent(&mut self, marker: &str, rest: &str) {
        self.indents.push(Indent {
            first: marker.to_string(),
            rest: rest.to_string(),
            first_used: false,
            item: true,
        });
    }

    /// Remove the innermost indent
    ///
    /// Returns whether any line was committed under it.
    pub fn pop_indent(&mut self) -> bool {
        self.indents.pop().is_some_and(|indent| indent.first_used)
    }

    /// Finalize into plain text
    pub fn finish(mut self) -> String {
        self.flush_line();
        self.output.finish()
    }

    /// Finalize into normalized lines
    pub fn into_lines(mut self) -> Vec<String> {
        self.flush_line();
        self.output.into_lines()
    }

    fn at_item_start(&self) -> bool {
        self.indents.iter().any(|indent| indent.item && !indent.first_used)
    }

    fn commit_line(&mut self) {
        let line = std::mem::take(&mut self.line);
        let verbatim = std::mem::take(&mut self.verbatim);
        self.line_width = 0;
        self.emit(line, verbatim);
    }

    fn emit(&mut self, text: String, verbatim: bool) {
        if std::mem::take(&mut self.blank_requested) && !self.output.is_empty() {
            // Only indents that already own lines mark the blank line
            let blank: String = self
                .indents
                .iter()
                .filter(|indent| indent.first_used)
                .map(|indent| indent.rest.as_str())
                .collect();
            self.output.push(blank.trim_end().to_string());
        }

        let mut line = self.current_prefix();
        line.push_str(&text);
        for indent in &mut self.indents {
            indent.first_used = true;
        }
        if !verbatim {
            self.output.push(line);
        } else if text.is_empty() {
            line.truncate(line.trim_end().len());
            self.output.push_verbatim(line);
        } else {
            self.output.push_verbatim(line);
        }
    }

    fn current_prefix(&self) -> String {
        self.indents
            .iter()
            .map(|indent| {
                if indent.first_used {
                    indent.rest.as_str()
                } else {
                    indent.first.as_str()
                }
            })
            .collect()
    }

    fn rest_prefix(&self) -> String {
        self.indents.iter().map(|indent| indent.rest.as_str()).collect()
    }
}

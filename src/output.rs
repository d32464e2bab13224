//! Committed output lines and the final assembly pass

/// A committed line
#[derive(Debug, Clone, PartialEq, Eq)]
struct OutputLine {
    text: String,
    /// Preformatted content: kept as is by normalization
    verbatim: bool,
}

/// Ordered lines produced by a render pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputDocument {
    lines: Vec<OutputLine>,
}

impl OutputDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a committed line
    pub fn push(&mut self, line: String) {
        self.lines.push(OutputLine {
            text: line,
            verbatim: false,
        });
    }

    /// Append a line of preformatted content
    pub fn push_verbatim(&mut self, line: String) {
        self.lines.push(OutputLine {
            text: line,
            verbatim: true,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Normalize into final lines
    ///
    /// 1. Trailing whitespace is removed from every non-verbatim line
    /// 2. Runs of blank lines collapse to a single blank line; verbatim
    ///    blank lines are kept
    /// 3. Leading and trailing blank lines are dropped
    pub fn into_lines(self) -> Vec<String> {
        let mut result: Vec<String> = Vec::with_capacity(self.lines.len());
        let mut prev_blank = true;

        for OutputLine { mut text, verbatim } in self.lines {
            if !verbatim {
                text.truncate(text.trim_end().len());
            }
            let blank = text.trim_end().is_empty();
            if blank && ((prev_blank && !verbatim) || result.is_empty()) {
                continue;
            }
            prev_blank = blank;
            result.push(text);
        }

        while result.last().is_some_and(|line| line.trim_end().is_empty()) {
            result.pop();
        }
        result
    }

    /// Join the normalized lines with `\n`, without a trailing separator
    pub fn finish(self) -> String {
        self.into_lines().join("\n")
    }
}

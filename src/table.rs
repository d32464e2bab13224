//! Table layout
//!
//! A selected table is laid out as aligned columns. Layout happens in three
//! steps:
//!
//! 1. **Slot placement**: rows are collected from the table (through any
//!    wrapper such as `thead`, `tbody` or `center`, but never from nested
//!    tables) and each `td`/`th` is placed in the first free slot of its row.
//!    A cell with `colspan`/`rowspan` covers several slots, all referencing
//!    the same cell. Rows are padded with empty slots so the matrix is
//!    rectangular.
//! 2. **Measurement**: a column is as wide as its widest single-column cell.
//!    A spanning cell wider than its columns (gaps included) widens the last
//!    column it spans. A row is as tall as its tallest cell; a row-spanning
//!    cell taller than its rows extends the last row it spans.
//! 3. **Emission**: each physical line concatenates the cells' lines padded
//!    to their column widths, separated by [`COLUMN_GAP`] spaces.
//!
//! ```text
//! Date       Item
//! 2014-01-01 ...
//! ```

use unicode_width::UnicodeWidthStr;

use crate::dom::{DocumentNode, Element};
use crate::renderer::with_stack;

/// Spaces between adjacent columns
pub const COLUMN_GAP: usize = 3;

/// Upper bound for `colspan` and `rowspan`
pub const MAX_SPAN: usize = 1000;

/// Slots a table's spans may grow its grid to
///
/// Column spans are narrowed so that rows times columns stays within this
/// bound; cells themselves are never dropped.
pub const MAX_TABLE_SLOTS: usize = 10_000;

/// A rendered cell and the slots it covers
#[derive(Debug, Clone, PartialEq, Eq)]
struct TableCell {
    row: usize,
    col: usize,
    colspan: usize,
    rowspan: usize,
    lines: Vec<String>,
    width: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// No cell covers this position
    Empty,
    /// Covered by the cell with this index
    Cell(usize),
}

/// Cell matrix of one structured table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableModel {
    caption: Vec<String>,
    cells: Vec<TableCell>,
    slots: Vec<Vec<Slot>>,
    columns: usize,
}

impl TableModel {
    /// Collect rows and cells of `table`, rendering each cell with `render_cell`
    ///
    /// # Arguments
    ///
    /// * `table` - The `table` element
    /// * `render_cell` - Renders a cell (or caption) given the path of
    ///   elements from `table` down to the cell's parent; returns its lines
    ///
    /// # Returns
    ///
    /// The model, or the first error returned by `render_cell`.
    pub fn build<'a, E, F>(table: &'a Element, mut render_cell: F) -> Result<Self, E>
    where
        F: FnMut(&'a Element, &[&'a Element]) -> Result<Vec<String>, E>,
    {
        let mut caption = Vec::new();
        for child in table.child_elements().filter(|child| child.is("caption")) {
            caption.extend(render_cell(child, &[table])?);
        }

        let mut rows: Vec<Vec<&'a Element>> = Vec::new();
        collect_rows(table, &mut vec![table], &mut rows);

        let row_count = rows.len();
        let max_columns = (MAX_TABLE_SLOTS / row_count.max(1)).max(1);
        let mut cells: Vec<TableCell> = Vec::new();
        let mut slots: Vec<Vec<Slot>> = vec![Vec::new(); row_count];

        for (row_index, path) in rows.iter().enumerate() {
            let Some(&row) = path.last() else {
                continue;
            };
            let mut col = 0;
            for cell in row.child_elements().filter(|cell| cell.is("td") || cell.is("th")) {
                while slots[row_index].get(col).is_some_and(|slot| *slot != Slot::Empty) {
                    col += 1;
                }

                let colspan = span(cell, "colspan").min(max_columns.saturating_sub(col).max(1));
                let rowspan = span(cell, "rowspan").min(row_count - row_index);
                let lines = render_cell(cell, path)?;
                let width = lines.iter().map(|line| line.width()).max().unwrap_or(0);

                let index = cells.len();
                for covered in &mut slots[row_index..row_index + rowspan] {
                    if covered.len() < col + colspan {
                        covered.resize(col + colspan, Slot::Empty);
                    }
                    for slot in &mut covered[col..col + colspan] {
                        *slot = Slot::Cell(index);
                    }
                }
                cells.push(TableCell {
                    row: row_index,
                    col,
                    colspan,
                    rowspan,
                    lines,
                    width,
                });
                col += colspan;
            }
        }

        let columns = slots.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut slots {
            row.resize(columns, Slot::Empty);
        }

        Ok(Self {
            caption,
            cells,
            slots,
            columns,
        })
    }

    pub fn row_count(&self) -> usize {
        self.slots.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Width of every column
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths = vec![0; self.columns];
        for cell in self.cells.iter().filter(|cell| cell.colspan == 1) {
            widths[cell.col] = widths[cell.col].max(cell.width);
        }

        let mut spanning: Vec<&TableCell> =
            self.cells.iter().filter(|cell| cell.colspan > 1).collect();
        spanning.sort_by_key(|cell| cell.colspan);
        for cell in spanning {
            let spanned = span_width(&widths, cell.col, cell.colspan);
            if cell.width > spanned {
                widths[cell.col + cell.colspan - 1] += cell.width - spanned;
            }
        }
        widths
    }

    /// Height in lines of every row
    pub fn row_heights(&self) -> Vec<usize> {
        let mut heights = vec![0; self.row_count()];
        for cell in self.cells.iter().filter(|cell| cell.rowspan == 1) {
            heights[cell.row] = heights[cell.row].max(cell.lines.len());
        }

        for cell in self.cells.iter().filter(|cell| cell.rowspan > 1) {
            let last = cell.row + cell.rowspan - 1;
            let available: usize = heights[cell.row..=last].iter().sum();
            if cell.lines.len() > available {
                heights[last] += cell.lines.len() - available;
            }
        }
        heights
    }

    /// Lay out the table into lines, trailing whitespace trimmed
    pub fn render(&self) -> Vec<String> {
        let widths = self.column_widths();
        let heights = self.row_heights();
        let gap = " ".repeat(COLUMN_GAP);
        let mut output = self.caption.clone();

        for (row, slots) in self.slots.iter().enumerate() {
            for line_index in 0..heights[row] {
                let mut pieces: Vec<String> = Vec::with_capacity(self.columns);
                for (col, slot) in slots.iter().enumerate() {
                    match *slot {
                        Slot::Empty => pieces.push(" ".repeat(widths[col])),
                        Slot::Cell(index) => {
                            let cell = &self.cells[index];
                            if cell.col != col {
                                continue;
                            }
                            // Lines of a row-spanning cell flow across its rows
                            let offset =
                                heights[cell.row..row].iter().sum::<usize>() + line_index;
                            let text =
                                cell.lines.get(offset).map(String::as_str).unwrap_or_default();
                            pieces.push(pad(text, span_width(&widths, col, cell.colspan)));
                        }
                    }
                }
                output.push(pieces.join(&gap).trim_end().to_string());
            }
        }
        output
    }
}

/// Gather `tr` elements with the path from the table down to each row
fn collect_rows<'a>(
    parent: &'a Element,
    path: &mut Vec<&'a Element>,
    rows: &mut Vec<Vec<&'a Element>>,
) {
    for child in &parent.children {
        let DocumentNode::Element(element) = child else {
            continue;
        };
        if element.is("table") || element.is("caption") {
            continue;
        }
        path.push(element);
        if element.is("tr") {
            rows.push(path.clone());
        } else {
            with_stack(|| collect_rows(element, path, rows));
        }
        path.pop();
    }
}

fn span(cell: &Element, name: &str) -> usize {
    cell.attr(name)
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(1)
        .clamp(1, MAX_SPAN)
}

fn span_width(widths: &[usize], col: usize, colspan: usize) -> usize {
    widths[col..col + colspan].iter().sum::<usize>() + COLUMN_GAP * (colspan - 1)
}

fn pad(text: &str, width: usize) -> String {
    let mut padded = text.to_string();
    padded.extend(std::iter::repeat_n(' ', width.saturating_sub(text.width())));
    padded
}

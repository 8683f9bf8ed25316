//! Table reconstruction from laid-out page text.
//!
//! Text extraction keeps the horizontal gaps between table cells, so a table
//! row shows up as one line whose cells are separated by tabs, `|` rules or
//! runs of at least two spaces. Consecutive lines with two or more cells are
//! grouped into one [`RawTable`]. A table starts at its first row that can be
//! a header: a row holding a bare value (count, decimal, percentage or
//! `HH:MM:SS`) is a label/value pair, not a header.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

lazy_static! {
    static ref COLUMN_GAP: Regex = Regex::new(r"[ \u{00a0}]*\t[ \u{00a0}\t]*|[ \u{00a0}]{2,}").unwrap();

    static ref VALUE_CELL: Regex = Regex::new(
        r"^(?:\d+:\d{2}:\d{2}|\d[\d \u{00a0}\u{202f}]*(?:[.,]\d+)?\s?%?)$"
    ).unwrap();
}

/// A grid of optional cells. Row 0 is the header by convention.
///
/// Rows may have different lengths; use [`RawTable::cell`] for access.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Self {
        Self { rows }
    }

    /// Build a table from string slices, treating empty strings as empty cells.
    pub fn from_strs(rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| (!cell.trim().is_empty()).then(|| cell.to_string()))
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Header row (row 0), if any.
    pub fn header(&self) -> Option<&[Option<String>]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// All rows after the header.
    pub fn data_rows(&self) -> &[Vec<Option<String>>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Number of rows, header included.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell content at `(row, col)`, `None` when empty or out of bounds.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.as_deref()
    }

    /// Whether any cell satisfies the predicate.
    pub fn any_cell(&self, predicate: impl Fn(&str) -> bool) -> bool {
        self.rows
            .iter()
            .flatten()
            .flatten()
            .any(|cell| predicate(cell))
    }

    /// Whether any cell contains `needle` (case-sensitive).
    pub fn contains(&self, needle: &str) -> bool {
        self.any_cell(|cell| cell.contains(needle))
    }
}

/// Whether every cell of a row is empty.
pub(crate) fn is_blank_row(row: &[Option<String>]) -> bool {
    row.iter()
        .all(|cell| cell.as_deref().is_none_or(|c| c.trim().is_empty()))
}

/// Whether a row can open a table: no cell is a bare value.
fn is_header_row(row: &[Option<String>]) -> bool {
    row.iter()
        .flatten()
        .all(|cell| !VALUE_CELL.is_match(cell.trim()))
}

/// Split one laid-out line into cells.
///
/// Lines containing `|` are split on it (outer rules ignored); other lines
/// are split on tabs and runs of two or more spaces.
pub fn split_cells(line: &str) -> Vec<Option<String>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let parts: Vec<&str> = if trimmed.contains('|') {
        let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
        let inner = inner.strip_suffix('|').unwrap_or(inner);
        inner.split('|').collect()
    } else {
        COLUMN_GAP.split(trimmed).collect()
    };

    parts
        .into_iter()
        .map(|part| {
            let part = part.trim();
            (!part.is_empty()).then(|| part.to_string())
        })
        .collect()
}

/// Detect the tables laid out in a page of text.
pub fn detect_tables(text: &str) -> Vec<RawTable> {
    let mut tables = Vec::new();
    let mut current: Vec<Vec<Option<String>>> = Vec::new();

    for line in text.lines() {
        let cells = split_cells(line);
        if cells.len() >= 2 {
            current.push(cells);
            continue;
        }
        flush(&mut current, &mut tables);
    }
    flush(&mut current, &mut tables);

    trace!("Detected {} tables", tables.len());
    tables
}

fn flush(current: &mut Vec<Vec<Option<String>>>, tables: &mut Vec<RawTable>) {
    // Leading label/value lines are dropped
    let start = current
        .iter()
        .position(|row| is_header_row(row))
        .unwrap_or(current.len());

    if current.len() - start >= 2 {
        tables.push(RawTable::new(current.split_off(start)));
    } else if !current.is_empty() {
        trace!("Discarded {} lines without a header row", current.len());
    }
    current.clear();
}

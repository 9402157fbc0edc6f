//! Raw table rows and the positional layout the collector relies on

use crate::schema::{CanonicalField, EventSchema};

/// Lap count cell value marking an entrant who did not finish
pub const NON_FINISHER_LAP_COUNT: &str = "0";

/// One table row as extracted from a results page
///
/// Cells are positional; no schema is attached.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRow {
    cells: Vec<String>,
}

impl RawRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Builds a row from anything string-like
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    /// Cell at a position, if the row is long enough
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Keeps only the first `width` cells
    pub fn truncate(&mut self, width: usize) {
        self.cells.truncate(width);
    }

    pub fn into_cells(self) -> Vec<String> {
        self.cells
    }
}

impl From<Vec<String>> for RawRow {
    fn from(cells: Vec<String>) -> Self {
        Self::new(cells)
    }
}

/// A header plus the rows beneath it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Column labels
    pub header: Vec<String>,

    /// Rows in source order
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(header: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self { header, rows }
    }
}

/// Positional assumptions applied to collected rows
///
/// Rows are truncated to `width` cells and the non-finisher filter reads the
/// cell at `lap_count_index`. Both are fixed for every page of one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    pub width: usize,
    pub lap_count_index: usize,
}

impl RowLayout {
    /// The canonical layout: ten columns, lap count in the seventh
    pub fn canonical() -> Self {
        Self {
            width: CanonicalField::COUNT,
            lap_count_index: CanonicalField::LapCount.index(),
        }
    }

    /// Layout of rows collected for an event schema
    pub fn for_schema(schema: &EventSchema) -> Self {
        Self {
            width: schema.column_count(),
            lap_count_index: CanonicalField::LapCount.index(),
        }
    }

    /// Whether the row's lap count cell holds the non-finisher sentinel
    pub fn is_non_finisher(&self, row: &RawRow) -> bool {
        row.cell(self.lap_count_index) == Some(NON_FINISHER_LAP_COUNT)
    }
}

impl Default for RowLayout {
    fn default() -> Self {
        Self::canonical()
    }
}

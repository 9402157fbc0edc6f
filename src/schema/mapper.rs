//! Maps positional raw rows onto canonical fields
//!
//! A row's cells are located through the source header. Columns the header
//! does not contain bind to an empty marker, which is indistinguishable from a
//! present-but-empty cell for anything downstream of [`MappedRow::get`].

use crate::collector::RawRow;
use crate::schema::fields::CanonicalField;
use crate::schema::registry::EventSchema;

/// A schema resolved against one concrete header
#[derive(Debug, Clone)]
pub struct BoundSchema {
    positions: [Option<usize>; CanonicalField::COUNT],
}

impl BoundSchema {
    /// Finds each field's column label in the header
    ///
    /// Labels are matched exactly after trimming surrounding whitespace.
    pub fn new(schema: &EventSchema, header: &[String]) -> Self {
        let mut positions = [None; CanonicalField::COUNT];
        for (field, label) in schema.columns() {
            positions[field.index()] = header.iter().position(|h| h.trim() == label);
        }
        Self { positions }
    }

    /// Column position of a field, if the header contains it
    pub fn position(&self, field: CanonicalField) -> Option<usize> {
        self.positions[field.index()]
    }

    /// Fields whose label is absent from the header
    pub fn missing_fields(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .into_iter()
            .filter(|field| self.position(*field).is_none())
            .collect()
    }

    /// Maps one raw row
    pub fn apply(&self, row: &RawRow) -> MappedRow {
        let mut values: [Option<String>; CanonicalField::COUNT] = Default::default();
        for field in CanonicalField::ALL {
            values[field.index()] = self
                .position(field)
                .and_then(|pos| row.cell(pos))
                .filter(|cell| !cell.is_empty())
                .map(str::to_string);
        }

        MappedRow {
            values,
            bound: self.positions.map(|pos| pos.is_some()),
        }
    }
}

/// One row keyed by canonical field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedRow {
    values: [Option<String>; CanonicalField::COUNT],
    bound: [bool; CanonicalField::COUNT],
}

impl MappedRow {
    /// Value of a field, `None` when the cell is empty or the column is absent
    pub fn get(&self, field: CanonicalField) -> Option<&str> {
        self.values[field.index()].as_deref()
    }

    /// Whether the source header contained this field's column
    pub fn is_bound(&self, field: CanonicalField) -> bool {
        self.bound[field.index()]
    }

    /// Value of a field coerced to a string, empty when absent
    pub fn text(&self, field: CanonicalField) -> String {
        self.get(field).unwrap_or_default().to_string()
    }
}

/// Maps a single raw row with the given header
///
/// Convenience over [`BoundSchema`] for one-off rows; batches should bind the
/// header once.
pub fn apply(schema: &EventSchema, row: &RawRow, header: &[String]) -> MappedRow {
    BoundSchema::new(schema, header).apply(row)
}

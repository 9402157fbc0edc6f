//! Canonical record and dataset types

use serde::Serialize;

/// Column names of the canonical dataset file, in output order
pub const DATASET_COLUMNS: [&str; 9] = [
    "place",
    "bib",
    "name",
    "gender",
    "age",
    "city",
    "chip_time_seconds",
    "pace_seconds",
    "pace_display",
];

/// One finisher's cleaned, typed result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalRecord {
    pub place: String,
    pub bib: String,
    pub name: String,
    pub gender: String,

    /// Age in years, `None` when the source value did not parse
    pub age: Option<u32>,

    pub city: String,

    /// Finish time from the runner's own start, in seconds
    pub chip_time_seconds: u32,

    /// Pace per distance unit, in seconds
    pub pace_seconds: u32,

    /// `pace_seconds` rendered as `M:SS`
    pub pace_display: String,
}

/// Ordered, immutable set of finishers for one event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalDataset {
    records: Vec<CanonicalRecord>,
}

impl CanonicalDataset {
    pub fn new(records: Vec<CanonicalRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CanonicalRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<CanonicalRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a CanonicalDataset {
    type Item = &'a CanonicalRecord;
    type IntoIter = std::slice::Iter<'a, CanonicalRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

//! Dataset assembly
//!
//! Normalizes mapped rows in order and keeps only those that pass every
//! mandatory check. Each excluded row is counted under its reason.
//!
//! # Order of checks
//!
//! 1. Lap count equal to `"0"` → non-finisher
//! 2. Chip time must parse as `HH:MM:SS`
//! 3. Pace must parse as `MM:SS` or `HH:MM:SS`
//! 4. Age is parsed but may be null

use crate::collector::NON_FINISHER_LAP_COUNT;
use crate::dataset::record::{CanonicalDataset, CanonicalRecord};
use crate::normalize::{format_pace, parse_age, parse_elapsed_time, parse_pace};
use crate::schema::{CanonicalField, MappedRow};
use std::collections::BTreeMap;
use std::fmt;

/// Why a row was left out of the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RejectionReason {
    /// Lap count is the zero sentinel
    NonFinisher,

    /// The source has no column for a mandatory field
    SchemaMismatch(CanonicalField),

    /// A mandatory field is empty or does not parse
    ParseFailure(CanonicalField),
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinisher => f.write_str("non-finisher"),
            Self::SchemaMismatch(field) => write!(f, "missing {} column", field),
            Self::ParseFailure(field) => write!(f, "unparseable {}", field),
        }
    }
}

/// Counts of rows excluded during assembly, by reason
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RejectionReport {
    counts: BTreeMap<RejectionReason, usize>,
}

impl RejectionReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, reason: RejectionReason) {
        *self.counts.entry(reason).or_insert(0) += 1;
    }

    /// Rows rejected for one reason
    pub fn count(&self, reason: RejectionReason) -> usize {
        self.counts.get(&reason).copied().unwrap_or(0)
    }

    /// Rows rejected for any reason
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Rows rejected because a mandatory value did not parse
    pub fn parse_failures(&self) -> usize {
        self.counts
            .iter()
            .filter(|(reason, _)| matches!(reason, RejectionReason::ParseFailure(_)))
            .map(|(_, count)| count)
            .sum()
    }

    /// Rows rejected because the source lacked a mandatory column
    pub fn schema_mismatches(&self) -> usize {
        self.counts
            .iter()
            .filter(|(reason, _)| matches!(reason, RejectionReason::SchemaMismatch(_)))
            .map(|(_, count)| count)
            .sum()
    }

    /// Reasons with their counts, in a stable order
    pub fn iter(&self) -> impl Iterator<Item = (RejectionReason, usize)> + '_ {
        self.counts.iter().map(|(reason, count)| (*reason, *count))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Reads a mandatory field, distinguishing an absent column from a bad value
fn mandatory<T>(
    row: &MappedRow,
    field: CanonicalField,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, RejectionReason> {
    if !row.is_bound(field) {
        return Err(RejectionReason::SchemaMismatch(field));
    }
    row.get(field)
        .and_then(parse)
        .ok_or(RejectionReason::ParseFailure(field))
}

/// Normalizes one mapped row into a record
pub fn normalize_row(row: &MappedRow) -> Result<CanonicalRecord, RejectionReason> {
    if row.get(CanonicalField::LapCount) == Some(NON_FINISHER_LAP_COUNT) {
        return Err(RejectionReason::NonFinisher);
    }

    let chip_time_seconds = mandatory(row, CanonicalField::ChipTime, parse_elapsed_time)?;
    let pace_seconds = mandatory(row, CanonicalField::Pace, parse_pace)?;
    let age = row.get(CanonicalField::Age).and_then(parse_age);

    Ok(CanonicalRecord {
        place: row.text(CanonicalField::Place),
        bib: row.text(CanonicalField::Bib),
        name: row.text(CanonicalField::Name),
        gender: row.text(CanonicalField::Gender),
        age,
        city: row.text(CanonicalField::City),
        chip_time_seconds,
        pace_seconds,
        pace_display: format_pace(pace_seconds),
    })
}

/// Builds the dataset from mapped rows, discarding rows that fail
pub fn assemble<I>(rows: I) -> CanonicalDataset
where
    I: IntoIterator<Item = MappedRow>,
{
    assemble_with_report(rows).0
}

/// Builds the dataset and reports why rows were discarded
pub fn assemble_with_report<I>(rows: I) -> (CanonicalDataset, RejectionReport)
where
    I: IntoIterator<Item = MappedRow>,
{
    let mut records = Vec::new();
    let mut report = RejectionReport::new();

    for (index, row) in rows.into_iter().enumerate() {
        match normalize_row(&row) {
            Ok(record) => records.push(record),
            Err(reason) => {
                tracing::trace!("Row {} rejected: {}", index, reason);
                report.record(reason);
            }
        }
    }

    if !report.is_empty() {
        tracing::debug!(
            "Assembled {} records, rejected {} rows",
            records.len(),
            report.total()
        );
    }

    (CanonicalDataset::new(records), report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::RawRow;
    use crate::schema::{BoundSchema, EventId, SchemaRegistry};

    fn canonical_header() -> Vec<String> {
        SchemaRegistry::standard()
            .get(EventId::Road20k)
            .unwrap()
            .labels()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn map_rows(header: &[String], rows: &[RawRow]) -> Vec<MappedRow> {
        let registry = SchemaRegistry::standard();
        let bound = BoundSchema::new(registry.get(EventId::Road20k).unwrap(), header);
        rows.iter().map(|row| bound.apply(row)).collect()
    }

    fn jane_and_dnf() -> Vec<RawRow> {
        vec![
            RawRow::from_cells([
                "1", "100", "Jane Doe", "F", "34", "X", "5", "01:30:00", "01:29:50", "4:30",
            ]),
            RawRow::from_cells([
                "2",
                "101",
                "Did Not Finish",
                "M",
                "40",
                "Y",
                "0",
                "...",
                "...",
                "...",
            ]),
        ]
    }

    #[test]
    fn test_end_to_end_example() {
        let mapped = map_rows(&canonical_header(), &jane_and_dnf());
        let (dataset, report) = assemble_with_report(mapped);

        assert_eq!(dataset.len(), 1);
        let jane = &dataset.records()[0];
        assert_eq!(jane.name, "Jane Doe");
        assert_eq!(jane.chip_time_seconds, 5390);
        assert_eq!(jane.pace_seconds, 270);
        assert_eq!(jane.pace_display, "4:30");
        assert_eq!(jane.age, Some(34));
        assert_eq!(jane.place, "1");
        assert_eq!(jane.bib, "100");
        assert_eq!(jane.gender, "F");
        assert_eq!(jane.city, "X");

        assert_eq!(report.count(RejectionReason::NonFinisher), 1);
        assert_eq!(report.total(), 1);
    }

    #[test]
    fn test_bad_times_are_dropped_and_counted() {
        let rows = vec![
            RawRow::from_cells(["1", "1", "A", "F", "30", "C", "5", "x", "00:50:00", "5:00"]),
            RawRow::from_cells(["2", "2", "B", "F", "30", "C", "5", "x", "bad", "5:00"]),
            RawRow::from_cells(["3", "3", "C", "F", "30", "C", "5", "x", "00:52:00", "505"]),
            RawRow::from_cells(["4", "4", "D", "F", "30", "C", "5", "x", "", "5:10"]),
            RawRow::from_cells(["5", "5", "E", "F", "30", "C", "5", "x", "00:53:00", "5:20"]),
        ];

        let (dataset, report) = assemble_with_report(map_rows(&canonical_header(), &rows));

        let names: Vec<_> = dataset.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "E"]);
        assert_eq!(
            report.count(RejectionReason::ParseFailure(CanonicalField::ChipTime)),
            2
        );
        assert_eq!(
            report.count(RejectionReason::ParseFailure(CanonicalField::Pace)),
            1
        );
        assert_eq!(report.parse_failures(), 3);
        assert_eq!(dataset.len() + report.total(), rows.len());
    }

    #[test]
    fn test_unparseable_age_is_null() {
        let rows = vec![RawRow::from_cells([
            "1", "1", "A", "F", "n/a", "C", "5", "x", "00:50:00", "5:00",
        ])];

        let dataset = assemble(map_rows(&canonical_header(), &rows));

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].age, None);
    }

    #[test]
    fn test_missing_columns() {
        let header: Vec<String> = ["Full Name", "Chip Elapsed Time"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let rows = vec![
            RawRow::from_cells(["A", "00:50:00"]),
            RawRow::from_cells(["B", "00:51:00"]),
        ];

        let (dataset, report) = assemble_with_report(map_rows(&header, &rows));

        assert!(dataset.is_empty());
        assert_eq!(
            report.count(RejectionReason::SchemaMismatch(CanonicalField::Pace)),
            2
        );
        assert_eq!(report.schema_mismatches(), 2);
        assert_eq!(report.parse_failures(), 0);
    }

    #[test]
    fn test_missing_optional_columns_pass_through_empty() {
        let header: Vec<String> = ["Full Name", "Chip Elapsed Time", "Overall Pace"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let rows = vec![RawRow::from_cells(["A", "00:50:00", "5:00"])];

        let dataset = assemble(map_rows(&header, &rows));

        let record = &dataset.records()[0];
        assert_eq!(record.name, "A");
        assert_eq!(record.bib, "");
        assert_eq!(record.age, None);
    }

    #[test]
    fn test_non_finisher_dropped_before_parsing() {
        let rows = vec![RawRow::from_cells([
            "1", "1", "A", "F", "30", "C", "0", "x", "00:50:00", "5:00",
        ])];

        let (dataset, report) = assemble_with_report(map_rows(&canonical_header(), &rows));

        assert!(dataset.is_empty());
        assert_eq!(report.count(RejectionReason::NonFinisher), 1);
        assert_eq!(report.parse_failures(), 0);
    }

    #[test]
    fn test_non_finisher_filter_follows_mapped_column() {
        let header: Vec<String> = ["Lap Count", "Full Name", "Chip Elapsed Time", "Overall Pace"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let rows = vec![
            RawRow::from_cells(["0", "A", "00:50:00", "5:00"]),
            RawRow::from_cells(["4", "B", "00:51:00", "5:06"]),
        ];

        let dataset = assemble(map_rows(&header, &rows));

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].name, "B");
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let header = canonical_header();
        let first = assemble(map_rows(&header, &jane_and_dnf()));
        let second = assemble(map_rows(&header, &jane_and_dnf()));
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejection_reason_display() {
        assert_eq!(RejectionReason::NonFinisher.to_string(), "non-finisher");
        assert_eq!(
            RejectionReason::ParseFailure(CanonicalField::Pace).to_string(),
            "unparseable pace"
        );
        assert_eq!(
            RejectionReason::SchemaMismatch(CanonicalField::ChipTime).to_string(),
            "missing chip_time column"
        );
    }
}

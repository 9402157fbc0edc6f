//! Flat file input and output
//!
//! Raw files carry the source labels as header and one collected row per
//! line. Dataset files carry the canonical columns. Both are written in the
//! order given, so writing the same input twice produces identical bytes.

use crate::collector::{RawRow, RawTable};
use crate::dataset::{CanonicalDataset, DATASET_COLUMNS};
use crate::FinishlineError;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Reads a raw results table from any reader
///
/// The first record is the header. Rows may be shorter or longer than the
/// header.
pub fn read_raw<R: Read>(reader: R) -> Result<RawTable, FinishlineError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header = reader.headers()?.iter().map(str::to_string).collect();
    let rows = reader
        .records()
        .map(|record| record.map(|r| RawRow::from_cells(r.iter())))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RawTable::new(header, rows))
}

/// Reads a raw results file
pub fn read_raw_file(path: &Path) -> Result<RawTable, FinishlineError> {
    let table = read_raw(File::open(path)?)?;

    if table.header.is_empty() {
        return Err(FinishlineError::EmptyInput {
            path: path.display().to_string(),
        });
    }

    tracing::debug!(
        "Read {} rows with {} columns from {}",
        table.rows.len(),
        table.header.len(),
        path.display()
    );

    Ok(table)
}

/// Writes a raw results table to any writer
pub fn write_raw<W: Write>(writer: W, table: &RawTable) -> Result<(), FinishlineError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);

    writer.write_record(&table.header)?;
    for row in &table.rows {
        writer.write_record(row.cells())?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a raw results file, replacing any existing file
pub fn write_raw_file(path: &Path, table: &RawTable) -> Result<(), FinishlineError> {
    write_raw(File::create(path)?, table)?;
    tracing::info!("Wrote {} raw rows to {}", table.rows.len(), path.display());
    Ok(())
}

/// Writes the canonical dataset to any writer
///
/// A null age is written as an empty cell.
pub fn write_dataset<W: Write>(writer: W, dataset: &CanonicalDataset) -> Result<(), FinishlineError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    // Written explicitly so an empty dataset still gets a header
    writer.write_record(DATASET_COLUMNS)?;
    for record in dataset {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the canonical dataset file, replacing any existing file
pub fn write_dataset_file(path: &Path, dataset: &CanonicalDataset) -> Result<(), FinishlineError> {
    write_dataset(File::create(path)?, dataset)?;
    tracing::info!("Wrote {} records to {}", dataset.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CanonicalRecord;

    fn dataset() -> CanonicalDataset {
        CanonicalDataset::new(vec![
            CanonicalRecord {
                place: "1".to_string(),
                bib: "100".to_string(),
                name: "Jane Doe".to_string(),
                gender: "F".to_string(),
                age: Some(34),
                city: "X".to_string(),
                chip_time_seconds: 5390,
                pace_seconds: 270,
                pace_display: "4:30".to_string(),
            },
            CanonicalRecord {
                place: "2".to_string(),
                bib: "102".to_string(),
                name: "Roe, John".to_string(),
                gender: "M".to_string(),
                age: None,
                city: "Y".to_string(),
                chip_time_seconds: 5400,
                pace_seconds: 271,
                pace_display: "4:31".to_string(),
            },
        ])
    }

    #[test]
    fn test_write_dataset() {
        let mut out = Vec::new();
        write_dataset(&mut out, &dataset()).unwrap();
        let text = String::from_utf8(out).unwrap();

        let expected = "\
place,bib,name,gender,age,city,chip_time_seconds,pace_seconds,pace_display
1,100,Jane Doe,F,34,X,5390,270,4:30
2,102,\"Roe, John\",M,,Y,5400,271,4:31
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_write_empty_dataset_has_header() {
        let mut out = Vec::new();
        write_dataset(&mut out, &CanonicalDataset::default()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "place,bib,name,gender,age,city,chip_time_seconds,pace_seconds,pace_display\n"
        );
    }

    #[test]
    fn test_dataset_output_is_byte_identical() {
        let mut first = Vec::new();
        let mut second = Vec::new();
        write_dataset(&mut first, &dataset()).unwrap();
        write_dataset(&mut second, &dataset()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_raw_file_round_trip() {
        let table = RawTable::new(
            vec!["Race Place".to_string(), "Full Name".to_string()],
            vec![
                RawRow::from_cells(["1", "Jane Doe"]),
                RawRow::from_cells(["2", "Roe, \"JR\" John"]),
                RawRow::from_cells(["3"]),
            ],
        );

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.csv");
        write_raw_file(&path, &table).unwrap();
        let read = read_raw_file(&path).unwrap();

        assert_eq!(read, table);
    }

    #[test]
    fn test_read_raw_flexible_rows() {
        let text = "Bib,Full Name\n100,Jane,extra\n101\n";
        let table = read_raw(text.as_bytes()).unwrap();

        assert_eq!(table.header, vec!["Bib", "Full Name"]);
        assert_eq!(table.rows[0].len(), 3);
        assert_eq!(table.rows[1].cell(0), Some("101"));
    }

    #[test]
    fn test_read_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, "").unwrap();

        let result = read_raw_file(&path);
        assert!(matches!(result, Err(FinishlineError::EmptyInput { .. })));
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_raw_file(Path::new("/nonexistent/raw.csv"));
        assert!(matches!(result, Err(FinishlineError::Io(_))));
    }
}

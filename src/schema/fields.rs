//! Canonical field definitions shared by every event schema

use std::fmt;

/// A field of the canonical results layout
///
/// The declaration order is the canonical column order: collected rows are
/// positional in this order and raw files are written with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanonicalField {
    Place,
    Bib,
    Name,
    Gender,
    Age,
    City,
    LapCount,
    GunTime,
    ChipTime,
    Pace,
}

impl CanonicalField {
    /// Number of canonical fields (the canonical column count)
    pub const COUNT: usize = 10;

    /// All fields in canonical column order
    pub const ALL: [CanonicalField; Self::COUNT] = [
        Self::Place,
        Self::Bib,
        Self::Name,
        Self::Gender,
        Self::Age,
        Self::City,
        Self::LapCount,
        Self::GunTime,
        Self::ChipTime,
        Self::Pace,
    ];

    /// Position of this field in the canonical column order
    pub fn index(self) -> usize {
        self as usize
    }

    /// Snake-case name used in logs and canonical output
    pub fn name(self) -> &'static str {
        match self {
            Self::Place => "place",
            Self::Bib => "bib",
            Self::Name => "name",
            Self::Gender => "gender",
            Self::Age => "age",
            Self::City => "city",
            Self::LapCount => "lap_count",
            Self::GunTime => "gun_time",
            Self::ChipTime => "chip_time",
            Self::Pace => "pace",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

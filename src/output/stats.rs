//! Summary statistics over a canonical dataset
//!
//! This module computes the aggregates a downstream reader shows next to the
//! results (count and means) and prints them along with the rejection counts.

use crate::dataset::{CanonicalDataset, RejectionReport};
use crate::normalize::format_pace;

/// Dataset summary statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetSummary {
    /// Number of finishers
    pub count: usize,

    /// Mean chip time in seconds, `None` for an empty dataset
    pub mean_chip_time_seconds: Option<f64>,

    /// Mean pace in seconds, `None` for an empty dataset
    pub mean_pace_seconds: Option<f64>,

    /// Mean age over finishers with a known age
    pub mean_age: Option<f64>,

    /// Finishers with a known age
    pub aged_count: usize,
}

/// Arithmetic mean, `None` for no values
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

impl DatasetSummary {
    /// Computes the summary of a dataset
    pub fn from_dataset(dataset: &CanonicalDataset) -> Self {
        let ages: Vec<f64> = dataset
            .iter()
            .filter_map(|r| r.age)
            .map(f64::from)
            .collect();

        Self {
            count: dataset.len(),
            mean_chip_time_seconds: mean(dataset.iter().map(|r| f64::from(r.chip_time_seconds))),
            mean_pace_seconds: mean(dataset.iter().map(|r| f64::from(r.pace_seconds))),
            mean_age: mean(ages.iter().copied()),
            aged_count: ages.len(),
        }
    }
}

impl From<&CanonicalDataset> for DatasetSummary {
    fn from(dataset: &CanonicalDataset) -> Self {
        Self::from_dataset(dataset)
    }
}

/// Prints the summary and rejection counts to stdout in a formatted manner
pub fn print_summary(title: &str, summary: &DatasetSummary, rejections: &RejectionReport) {
    println!("=== {} Statistics ===\n", title);

    println!("Overview:");
    println!("  Total runners: {}", summary.count);
    match summary.mean_chip_time_seconds {
        Some(secs) => println!("  Average time: {:.1} minutes", secs / 60.0),
        None => println!("  Average time: n/a"),
    }
    match summary.mean_pace_seconds {
        Some(secs) => println!(
            "  Average pace: {:.1} min/km ({})",
            secs / 60.0,
            format_pace(secs.round() as u32)
        ),
        None => println!("  Average pace: n/a"),
    }
    match summary.mean_age {
        Some(age) => println!(
            "  Average age: {:.1} years ({} of {} with age)",
            age, summary.aged_count, summary.count
        ),
        None => println!("  Average age: n/a"),
    }
    println!();

    if !rejections.is_empty() {
        println!("Rejected Rows ({}):", rejections.total());
        for (reason, count) in rejections.iter() {
            println!("  {}: {}", reason, count);
        }
        println!();
    }

    let considered = summary.count + rejections.total();
    let kept_rate = if considered > 0 {
        (summary.count as f64 / considered as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Kept: {:.1}% ({} / {} rows)",
        kept_rate, summary.count, considered
    );
}

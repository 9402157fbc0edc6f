//! Dataset module
//!
//! This module turns mapped rows into the canonical dataset:
//! - Record and dataset types consumed downstream
//! - Per-row normalization with explicit rejection reasons
//! - Ordered assembly with a rejection report

mod assembler;
mod record;

pub use assembler::{
    assemble, assemble_with_report, normalize_row, RejectionReason, RejectionReport,
};
pub use record::{CanonicalDataset, CanonicalRecord, DATASET_COLUMNS};

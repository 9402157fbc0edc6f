//! Output module for flat files and summaries
//!
//! This module handles:
//! - Reading previously collected raw results files
//! - Writing raw results and canonical dataset files
//! - Computing and printing dataset statistics

mod files;
pub mod stats;

pub use files::{
    read_raw, read_raw_file, write_dataset, write_dataset_file, write_raw, write_raw_file,
};
pub use stats::{print_summary, DatasetSummary};

//! Collector module for results page extraction
//!
//! This module contains the collection stage of the pipeline, including:
//! - The page extraction interface and its HTTP and in-memory implementations
//! - HTML results table parsing
//! - Ordered page range collection with truncation and non-finisher filtering

mod extractor;
mod fetcher;
mod pages;
mod parser;
mod row;

pub use extractor::{FixtureExtractor, PageExtractor};
pub use fetcher::{build_http_client, fetch_table, page_url, retry_delay, HttpExtractor};
pub use pages::{CollectStats, Collector};
pub use parser::parse_results_table;
pub use row::{RawRow, RawTable, RowLayout, NON_FINISHER_LAP_COUNT};


//! Page extraction interface
//!
//! The collector only talks to result pages through [`PageExtractor`], so it
//! can run against the live listing or against in-memory fixtures.

use crate::collector::row::RawRow;
use crate::FetchError;
use std::collections::BTreeMap;
use std::future::Future;

/// Source of raw table rows, one results page at a time
pub trait PageExtractor {
    /// Extracts the rows of one page in table order
    ///
    /// Fails with a `FetchError` if the page is unreachable or its results
    /// table is still absent once the extractor's bounded wait has elapsed.
    fn extract(&self, page: u32) -> impl Future<Output = Result<Vec<RawRow>, FetchError>> + Send;
}

/// In-memory extractor serving fixed rows per page
///
/// Pages that were never added fail with `FetchError::PageUnavailable`.
#[derive(Debug, Clone, Default)]
pub struct FixtureExtractor {
    pages: BTreeMap<u32, Vec<RawRow>>,
}

impl FixtureExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the rows of a page
    pub fn with_page(mut self, page: u32, rows: Vec<RawRow>) -> Self {
        self.pages.insert(page, rows);
        self
    }

    /// Number of pages held
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

impl PageExtractor for FixtureExtractor {
    async fn extract(&self, page: u32) -> Result<Vec<RawRow>, FetchError> {
        self.pages
            .get(&page)
            .cloned()
            .ok_or(FetchError::PageUnavailable { page })
    }
}

//! Page range collection
//!
//! Walks a page range in order, concatenating the rows of every page and
//! applying the positional truncation and non-finisher filter.

use crate::collector::extractor::PageExtractor;
use crate::collector::row::{RawRow, RowLayout};
use crate::FetchError;
use std::ops::RangeInclusive;

/// Counters for one collection run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectStats {
    /// Pages fetched
    pub pages: u32,

    /// Rows extracted before filtering
    pub rows_seen: usize,

    /// Rows dropped as non-finishers
    pub non_finishers: usize,
}

impl CollectStats {
    /// Rows kept after filtering
    pub fn rows_kept(&self) -> usize {
        self.rows_seen - self.non_finishers
    }
}

/// Collects raw rows from a paginated listing
pub struct Collector<E> {
    extractor: E,
    layout: RowLayout,
}

impl<E: PageExtractor> Collector<E> {
    /// Creates a collector using the canonical row layout
    pub fn new(extractor: E) -> Self {
        Self::with_layout(extractor, RowLayout::canonical())
    }

    pub fn with_layout(extractor: E, layout: RowLayout) -> Self {
        Self { extractor, layout }
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Collects every page in `pages`, in order
    ///
    /// Rows keep page order, then in-page order. Each row is truncated to the
    /// layout width and rows whose lap count is `"0"` are dropped. The first
    /// page failure aborts the run and nothing collected so far is returned.
    pub async fn collect(&self, pages: RangeInclusive<u32>) -> Result<Vec<RawRow>, FetchError> {
        self.collect_with_stats(pages).await.map(|(rows, _)| rows)
    }

    /// Like [`collect`](Self::collect), also returning run counters
    pub async fn collect_with_stats(
        &self,
        pages: RangeInclusive<u32>,
    ) -> Result<(Vec<RawRow>, CollectStats), FetchError> {
        let mut rows = Vec::new();
        let mut stats = CollectStats::default();

        for page in pages {
            let extracted = match self.extractor.extract(page).await {
                Ok(extracted) => extracted,
                Err(e) => {
                    tracing::error!("Page {} failed, aborting collection: {}", page, e);
                    return Err(e);
                }
            };

            if stats.pages == 0 {
                if let Some(first) = extracted.first() {
                    tracing::debug!("First row: {:?} ({} columns)", first.cells(), first.len());
                }
            }

            let extracted_count = extracted.len();
            let mut dropped = 0;
            for mut row in extracted {
                row.truncate(self.layout.width);
                if self.layout.is_non_finisher(&row) {
                    dropped += 1;
                    continue;
                }
                rows.push(row);
            }

            tracing::debug!(
                "Page {}: {} rows, {} non-finishers dropped",
                page,
                extracted_count,
                dropped
            );

            stats.pages += 1;
            stats.rows_seen += extracted_count;
            stats.non_finishers += dropped;
        }

        tracing::info!(
            "Collected {} rows from {} pages ({} non-finishers dropped)",
            stats.rows_kept(),
            stats.pages,
            stats.non_finishers
        );

        Ok((rows, stats))
    }
}

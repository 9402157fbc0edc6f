//! HTTP page extraction
//!
//! This module handles all HTTP requests for the collector, including:
//! - Building the HTTP client with the configured user agent and timeouts
//! - Building page URLs for a results listing
//! - Fetching a page and classifying failures
//! - Bounded retry with linear backoff for transient failures
//! - An overall per-page deadline

use crate::collector::extractor::PageExtractor;
use crate::collector::parser::parse_results_table;
use crate::collector::row::{RawRow, RawTable};
use crate::config::{FetchConfig, SourceConfig};
use crate::FetchError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Query parameter selecting the sub-event of a listing
const SUB_EVENT_PARAM: &str = "subEvent";

/// Query parameter selecting the page of a listing
const PAGE_PARAM: &str = "page";

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use finishline::config::FetchConfig;
/// use finishline::collector::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_millis(config.request_timeout_ms))
        .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Builds the URL of one page of a results listing
///
/// Existing query parameters of `base` are kept; `subEvent` and `page` are
/// appended.
pub fn page_url(base: &Url, sub_event: &str, page: u32) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair(SUB_EVENT_PARAM, sub_event)
        .append_pair(PAGE_PARAM, &page.to_string());
    url
}

/// Fetches a page once and parses its results table, header included
///
/// # Failure classification
///
/// | Condition | Error | Transient |
/// |-----------|-------|-----------|
/// | Timeout / connection failure | `Http` | yes |
/// | HTTP 429, 5xx | `Status` | yes |
/// | Other non-2xx | `Status` | no |
/// | No `<table>` in body | `MissingTable` | yes |
pub async fn fetch_table(client: &Client, url: &Url) -> Result<RawTable, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|source| FetchError::Http {
        url: url.to_string(),
        source,
    })?;

    parse_results_table(&body, url.as_str())
}

/// Delay before the retry following failed attempt `attempt` (1-based)
///
/// Grows linearly with the attempt number and saturates instead of
/// overflowing.
pub fn retry_delay(backoff_ms: u64, attempt: u32) -> Duration {
    Duration::from_millis(backoff_ms.saturating_mul(u64::from(attempt)))
}

/// Extracts result pages over HTTP
pub struct HttpExtractor {
    client: Client,
    base_url: Url,
    sub_event: String,
    config: FetchConfig,
}

impl HttpExtractor {
    /// Creates an extractor for the configured listing
    pub fn new(source: &SourceConfig, config: FetchConfig) -> Result<Self, FetchError> {
        let base_url = Url::parse(&source.base_url)?;
        let client = build_http_client(&config)?;

        Ok(Self {
            client,
            base_url,
            sub_event: source.sub_event.clone(),
            config,
        })
    }

    /// URL of a page of this listing
    pub fn url_for(&self, page: u32) -> Url {
        page_url(&self.base_url, &self.sub_event, page)
    }

    /// Fetches with retries, without the overall deadline
    async fn fetch_with_retry(&self, url: &Url) -> Result<RawTable, FetchError> {
        let attempts = self.config.max_retries.saturating_add(1);
        let mut attempt = 1;

        loop {
            match fetch_table(&self.client, url).await {
                Ok(table) => return Ok(table),
                Err(e) if e.is_transient() && attempt < attempts => {
                    let backoff = retry_delay(self.config.retry_backoff_ms, attempt);
                    tracing::warn!(
                        "Fetching {} failed (attempt {}/{}): {}; retrying in {:?}",
                        url,
                        attempt,
                        attempts,
                        e,
                        backoff
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl PageExtractor for HttpExtractor {
    async fn extract(&self, page: u32) -> Result<Vec<RawRow>, FetchError> {
        let url = self.url_for(page);
        let deadline = Duration::from_millis(self.config.page_timeout_ms);

        tracing::debug!("Fetching page {} from {}", page, url);

        let table = match tokio::time::timeout(deadline, self.fetch_with_retry(&url)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(FetchError::Timeout {
                    url: url.to_string(),
                    timeout_ms: self.config.page_timeout_ms,
                })
            }
        };

        tracing::debug!("Page {} header: {:?}", page, table.header);
        Ok(table.rows)
    }
}

use serde::Deserialize;
use std::ops::RangeInclusive;

/// Main configuration structure for Finishline
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    pub event: EventConfig,
    pub output: OutputConfig,
}

/// Results listing to collect from
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Results listing URL without the `subEvent` and `page` query parameters
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Sub-event identifier of the listing
    #[serde(rename = "sub-event")]
    pub sub_event: String,

    /// First page to collect (1-based, inclusive)
    #[serde(rename = "first-page", default = "default_first_page")]
    pub first_page: u32,

    /// Last page to collect (inclusive)
    #[serde(rename = "last-page")]
    pub last_page: u32,
}

impl SourceConfig {
    /// The configured page range
    pub fn pages(&self) -> RangeInclusive<u32> {
        self.first_page..=self.last_page
    }
}

/// HTTP fetch behavior
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// User agent sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Timeout for a single HTTP request (milliseconds)
    #[serde(rename = "request-timeout-ms", default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Timeout for establishing a connection (milliseconds)
    #[serde(rename = "connect-timeout-ms", default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Upper bound on extracting one page, retries included (milliseconds)
    #[serde(rename = "page-timeout-ms", default = "default_page_timeout_ms")]
    pub page_timeout_ms: u64,

    /// Retries after the first attempt for transient failures
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between retries, multiplied by the attempt number (milliseconds)
    #[serde(rename = "retry-backoff-ms", default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            request_timeout_ms: default_request_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            page_timeout_ms: default_page_timeout_ms(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

/// Event whose schema applies to the collected rows
#[derive(Debug, Clone, Deserialize)]
pub struct EventConfig {
    /// Event identifier (`20k`, `10k`, or the results file name)
    pub id: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Raw results file (schema labels as header, finishers only)
    #[serde(rename = "raw-path")]
    pub raw_path: String,

    /// Canonical dataset file
    #[serde(rename = "dataset-path")]
    pub dataset_path: String,
}

fn default_first_page() -> u32 {
    1
}

fn default_user_agent() -> String {
    format!("finishline/{}", env!("CARGO_PKG_VERSION"))
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_connect_timeout_ms() -> u64 {
    10_000
}

fn default_page_timeout_ms() -> u64 {
    120_000
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    2_000
}

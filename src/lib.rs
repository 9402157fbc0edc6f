//! Finishline: race results collector and normalizer
//!
//! This crate collects race-timing results published as paginated web tables
//! and normalizes per-event column layouts into one canonical, typed dataset.

pub mod collector;
pub mod config;
pub mod dataset;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod schema;

use thiserror::Error;

/// Main error type for Finishline operations
#[derive(Debug, Error)]
pub enum FinishlineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Empty input file: {path}")]
    EmptyInput { path: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while extracting a results page
///
/// Any of these aborts the whole collection.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Timed out after {timeout_ms}ms waiting for {url}")]
    Timeout { url: String, timeout_ms: u64 },

    #[error("No results table found at {url}")]
    MissingTable { url: String },

    #[error("HTML parse error for {url}: {message}")]
    HtmlParse { url: String, message: String },

    #[error("Page {page} is not available")]
    PageUnavailable { page: u32 },

    #[error("Invalid page URL: {0}")]
    InvalidUrl(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl FetchError {
    /// Returns true if retrying the same page may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http { source, .. } => source.is_timeout() || source.is_connect(),
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Timeout { .. } | Self::MissingTable { .. } => true,
            Self::HtmlParse { .. }
            | Self::PageUnavailable { .. }
            | Self::InvalidUrl(_)
            | Self::Client(_) => false,
        }
    }
}

/// Event schema errors
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("No schema registered for event '{0}'")]
    UnknownEvent(String),
}

/// Result type alias for Finishline operations
pub type Result<T> = std::result::Result<T, FinishlineError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for page extraction
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use collector::{Collector, FixtureExtractor, HttpExtractor, PageExtractor, RawRow};
pub use config::Config;
pub use dataset::{assemble, assemble_with_report, CanonicalDataset, CanonicalRecord};
pub use schema::{CanonicalField, EventId, EventSchema, SchemaRegistry};

use crate::config::types::{Config, EventConfig, FetchConfig, OutputConfig, SourceConfig};
use crate::schema::EventId;
use crate::ConfigError;
use url::Url;

/// Upper bound on pages collected in one run
const MAX_PAGES: u32 = 10_000;

/// Upper bound on retries per page
const MAX_RETRIES: u32 = 10;

/// Upper bound on the base retry delay
const MAX_RETRY_BACKOFF_MS: u64 = 60_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_fetch_config(&config.fetch)?;
    validate_event_config(&config.event)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the results listing
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if config.sub_event.trim().is_empty() {
        return Err(ConfigError::Validation(
            "sub-event cannot be empty".to_string(),
        ));
    }

    if config.first_page < 1 {
        return Err(ConfigError::Validation(format!(
            "first-page must be >= 1, got {}",
            config.first_page
        )));
    }

    if config.last_page < config.first_page {
        return Err(ConfigError::Validation(format!(
            "last-page ({}) must not be before first-page ({})",
            config.last_page, config.first_page
        )));
    }

    if config.last_page - config.first_page >= MAX_PAGES {
        return Err(ConfigError::Validation(format!(
            "page range must cover at most {} pages",
            MAX_PAGES
        )));
    }

    Ok(())
}

/// Validates fetch timeouts and retry policy
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.request_timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-ms must be >= 100ms, got {}ms",
            config.request_timeout_ms
        )));
    }

    if config.connect_timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-ms must be >= 100ms, got {}ms",
            config.connect_timeout_ms
        )));
    }

    if config.page_timeout_ms < config.request_timeout_ms {
        return Err(ConfigError::Validation(format!(
            "page-timeout-ms ({}ms) must be >= request-timeout-ms ({}ms)",
            config.page_timeout_ms, config.request_timeout_ms
        )));
    }

    if config.max_retries > MAX_RETRIES {
        return Err(ConfigError::Validation(format!(
            "max-retries must be at most {}, got {}",
            MAX_RETRIES, config.max_retries
        )));
    }

    if config.retry_backoff_ms > MAX_RETRY_BACKOFF_MS {
        return Err(ConfigError::Validation(format!(
            "retry-backoff-ms must be at most {}ms, got {}ms",
            MAX_RETRY_BACKOFF_MS, config.retry_backoff_ms
        )));
    }

    Ok(())
}

/// Validates that the event has a registered schema
fn validate_event_config(config: &EventConfig) -> Result<(), ConfigError> {
    config
        .id
        .parse::<EventId>()
        .map_err(|e| ConfigError::Validation(e.to_string()))?;
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.raw_path.is_empty() {
        return Err(ConfigError::Validation(
            "raw-path cannot be empty".to_string(),
        ));
    }

    if config.dataset_path.is_empty() {
        return Err(ConfigError::Validation(
            "dataset-path cannot be empty".to_string(),
        ));
    }

    if config.raw_path == config.dataset_path {
        return Err(ConfigError::Validation(format!(
            "raw-path and dataset-path must differ, both are '{}'",
            config.raw_path
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> SourceConfig {
        SourceConfig {
            base_url: "https://results.example.com/v2/results".to_string(),
            sub_event: "229192".to_string(),
            first_page: 1,
            last_page: 5,
        }
    }

    #[test]
    fn test_validate_source() {
        assert!(validate_source_config(&source()).is_ok());

        let mut bad_url = source();
        bad_url.base_url = "not a url".to_string();
        assert!(matches!(
            validate_source_config(&bad_url),
            Err(ConfigError::InvalidUrl(_))
        ));

        let mut ftp = source();
        ftp.base_url = "ftp://results.example.com/".to_string();
        assert!(validate_source_config(&ftp).is_err());

        let mut reversed = source();
        reversed.first_page = 4;
        reversed.last_page = 2;
        assert!(validate_source_config(&reversed).is_err());

        let mut zero = source();
        zero.first_page = 0;
        assert!(validate_source_config(&zero).is_err());

        let mut blank = source();
        blank.sub_event = "  ".to_string();
        assert!(validate_source_config(&blank).is_err());
    }

    #[test]
    fn test_validate_fetch() {
        assert!(validate_fetch_config(&FetchConfig::default()).is_ok());

        let mut fast = FetchConfig::default();
        fast.request_timeout_ms = 10;
        assert!(validate_fetch_config(&fast).is_err());

        let mut short_page = FetchConfig::default();
        short_page.page_timeout_ms = short_page.request_timeout_ms - 1;
        assert!(validate_fetch_config(&short_page).is_err());

        let mut retries = FetchConfig::default();
        retries.max_retries = 50;
        assert!(validate_fetch_config(&retries).is_err());

        let mut huge_backoff = FetchConfig::default();
        huge_backoff.retry_backoff_ms = u64::MAX;
        assert!(validate_fetch_config(&huge_backoff).is_err());

        let mut max_backoff = FetchConfig::default();
        max_backoff.retry_backoff_ms = MAX_RETRY_BACKOFF_MS;
        assert!(validate_fetch_config(&max_backoff).is_ok());
    }

    #[test]
    fn test_validate_event() {
        assert!(validate_event_config(&EventConfig { id: "20k".to_string() }).is_ok());
        assert!(validate_event_config(&EventConfig {
            id: "10k_race_results.csv".to_string()
        })
        .is_ok());
        assert!(validate_event_config(&EventConfig { id: "ultra".to_string() }).is_err());
    }

    #[test]
    fn test_validate_output() {
        let ok = OutputConfig {
            raw_path: "raw.csv".to_string(),
            dataset_path: "dataset.csv".to_string(),
        };
        assert!(validate_output_config(&ok).is_ok());

        let same = OutputConfig {
            raw_path: "out.csv".to_string(),
            dataset_path: "out.csv".to_string(),
        };
        assert!(validate_output_config(&same).is_err());

        let empty = OutputConfig {
            raw_path: String::new(),
            dataset_path: "dataset.csv".to_string(),
        };
        assert!(validate_output_config(&empty).is_err());
    }
}

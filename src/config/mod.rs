//! Configuration module for Finishline
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use finishline::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("finishline.toml")).unwrap();
//! println!("Event {} from {}", config.event.id, config.source.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, EventConfig, FetchConfig, OutputConfig, SourceConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};

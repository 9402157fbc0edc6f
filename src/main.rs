//! Finishline main entry point
//!
//! This is the command-line interface for the Finishline results collector.

use anyhow::Context;
use clap::Parser;
use finishline::config::{load_config_with_hash, Config};
use finishline::output::{print_summary, DatasetSummary};
use finishline::pipeline::{self, NormalizedEvent};
use finishline::schema::{EventId, SchemaRegistry};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Finishline: race results collector and normalizer
///
/// Finishline collects race results from a paginated results listing,
/// drops non-finishers and normalizes the rows into a canonical dataset
/// with finish times and paces in seconds.
#[derive(Parser, Debug)]
#[command(name = "finishline")]
#[command(version)]
#[command(about = "Race results collector and normalizer", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be collected without fetching
    #[arg(long, conflicts_with_all = ["collect_only", "normalize_only", "stats"])]
    dry_run: bool,

    /// Collect pages and write the raw results file only
    #[arg(long, conflicts_with_all = ["dry_run", "normalize_only", "stats"])]
    collect_only: bool,

    /// Normalize an existing raw results file into the dataset file
    #[arg(long, conflicts_with_all = ["dry_run", "collect_only", "stats"])]
    normalize_only: bool,

    /// Show statistics for an existing raw results file and exit
    #[arg(long, conflicts_with_all = ["dry_run", "collect_only", "normalize_only"])]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config)
    } else if cli.collect_only {
        handle_collect(&config).await
    } else if cli.normalize_only {
        handle_normalize(&config)
    } else if cli.stats {
        handle_stats(&config)
    } else {
        handle_run(&config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("finishline=info,warn"),
            1 => EnvFilter::new("finishline=debug,info"),
            2 => EnvFilter::new("finishline=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Event named in the config; validation guarantees it parses
fn event_of(config: &Config) -> anyhow::Result<EventId> {
    Ok(config.event.id.parse::<EventId>()?)
}

/// Handles the --dry-run mode: shows what would be collected
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let event = event_of(config)?;
    let registry = SchemaRegistry::standard();
    let schema = registry.get(event)?;

    println!("=== Finishline Dry Run ===\n");

    println!("Source:");
    println!("  Base URL: {}", config.source.base_url);
    println!("  Sub-event: {}", config.source.sub_event);
    println!(
        "  Pages: {}..={}",
        config.source.first_page, config.source.last_page
    );

    println!("\nFetch:");
    println!("  User agent: {}", config.fetch.user_agent);
    println!("  Request timeout: {}ms", config.fetch.request_timeout_ms);
    println!("  Page timeout: {}ms", config.fetch.page_timeout_ms);
    println!(
        "  Retries: {} (backoff {}ms)",
        config.fetch.max_retries, config.fetch.retry_backoff_ms
    );

    println!("\nEvent: {} ({})", event.title(), event);
    for (field, label) in schema.columns() {
        println!("  {:<10} <- {}", field.name(), label);
    }

    println!("\nOutput:");
    println!("  Raw results: {}", config.output.raw_path);
    println!("  Dataset: {}", config.output.dataset_path);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would collect {} pages",
        config.source.last_page - config.source.first_page + 1
    );

    Ok(())
}

/// Handles the --collect-only mode: writes the raw results file
async fn handle_collect(config: &Config) -> anyhow::Result<()> {
    let registry = SchemaRegistry::standard();
    let extractor = finishline::HttpExtractor::new(&config.source, config.fetch.clone())?;

    let collected = pipeline::collect_to_file(config, &registry, extractor)
        .await
        .context("collection failed")?;

    println!(
        "✓ Collected {} finishers from {} pages into {}",
        collected.stats.rows_kept(),
        collected.stats.pages,
        config.output.raw_path
    );

    Ok(())
}

/// Handles the --normalize-only mode: writes the dataset file from the raw file
fn handle_normalize(config: &Config) -> anyhow::Result<()> {
    let registry = SchemaRegistry::standard();
    let normalized = pipeline::normalize_file(
        &registry,
        &config.event.id,
        Path::new(&config.output.raw_path),
        Path::new(&config.output.dataset_path),
    )
    .with_context(|| format!("failed to normalize {}", config.output.raw_path))?;

    report_written(config, &normalized);
    Ok(())
}

/// Handles the --stats mode: prints statistics for the raw file
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let event = event_of(config)?;
    let registry = SchemaRegistry::standard();
    let normalized = pipeline::load_event_file(
        &registry,
        &config.event.id,
        Path::new(&config.output.raw_path),
    )
    .with_context(|| format!("failed to read {}", config.output.raw_path))?;

    let summary = DatasetSummary::from_dataset(&normalized.dataset);
    print_summary(event.title(), &summary, &normalized.rejections);

    Ok(())
}

/// Handles the default mode: collect, normalize and write both files
async fn handle_run(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting run for event {} ({} pages)",
        config.event.id,
        config.source.last_page - config.source.first_page + 1
    );

    match pipeline::run_event(config).await {
        Ok(normalized) => {
            report_written(config, &normalized);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            Err(e.into())
        }
    }
}

fn report_written(config: &Config, normalized: &NormalizedEvent) {
    println!(
        "✓ Wrote {} records to {} ({} rows rejected)",
        normalized.dataset.len(),
        config.output.dataset_path,
        normalized.rejections.total()
    );
}

//! Event pipeline
//!
//! Ties the stages together for one event:
//! collection → raw table → schema mapping → normalization → dataset.
//!
//! The event schema is resolved before any page is fetched, and files are
//! only written once the stage producing them has fully succeeded.

use crate::collector::{
    CollectStats, Collector, HttpExtractor, PageExtractor, RawTable, RowLayout,
};
use crate::config::Config;
use crate::dataset::{assemble_with_report, CanonicalDataset, RejectionReport};
use crate::output::{read_raw_file, write_dataset_file, write_raw_file};
use crate::schema::{BoundSchema, EventSchema, SchemaRegistry};
use crate::FinishlineError;
use std::ops::RangeInclusive;
use std::path::Path;

/// Rows collected for one event
#[derive(Debug, Clone)]
pub struct CollectedEvent {
    pub schema: EventSchema,

    /// Collected rows under the schema's labels
    pub table: RawTable,

    pub stats: CollectStats,
}

/// Result of normalizing one event's rows
#[derive(Debug, Clone)]
pub struct NormalizedEvent {
    pub dataset: CanonicalDataset,
    pub rejections: RejectionReport,
}

/// Collects an event's pages through the given extractor
///
/// Fails with `SchemaError::UnknownEvent` before any extraction if the event
/// has no registered schema.
pub async fn collect_event<E: PageExtractor>(
    registry: &SchemaRegistry,
    event_id: &str,
    extractor: E,
    pages: RangeInclusive<u32>,
) -> Result<CollectedEvent, FinishlineError> {
    let schema = registry.resolve(event_id)?.clone();

    tracing::info!(
        "Collecting {} pages {}..={}",
        schema.event().title(),
        pages.start(),
        pages.end()
    );

    let collector = Collector::with_layout(extractor, RowLayout::for_schema(&schema));
    let (rows, stats) = collector.collect_with_stats(pages).await?;

    let header = schema.labels().iter().map(|label| label.to_string()).collect();

    Ok(CollectedEvent {
        schema,
        table: RawTable::new(header, rows),
        stats,
    })
}

/// Maps and assembles a raw table under an event schema
pub fn normalize_table(schema: &EventSchema, table: &RawTable) -> NormalizedEvent {
    let bound = BoundSchema::new(schema, &table.header);

    let missing = bound.missing_fields();
    if !missing.is_empty() {
        tracing::warn!(
            "Source is missing {} column(s): {}",
            missing.len(),
            missing
                .iter()
                .map(|field| schema.label(*field))
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    let (dataset, rejections) = assemble_with_report(table.rows.iter().map(|row| bound.apply(row)));

    tracing::info!(
        "Normalized {} rows into {} records ({} rejected)",
        table.rows.len(),
        dataset.len(),
        rejections.total()
    );

    NormalizedEvent {
        dataset,
        rejections,
    }
}

/// Reads a raw results file and normalizes it
pub fn load_event_file(
    registry: &SchemaRegistry,
    event_id: &str,
    raw_path: &Path,
) -> Result<NormalizedEvent, FinishlineError> {
    let schema = registry.resolve(event_id)?;
    let table = read_raw_file(raw_path)?;
    Ok(normalize_table(schema, &table))
}

/// Reads a raw results file, normalizes it and writes the dataset file
pub fn normalize_file(
    registry: &SchemaRegistry,
    event_id: &str,
    raw_path: &Path,
    dataset_path: &Path,
) -> Result<NormalizedEvent, FinishlineError> {
    let normalized = load_event_file(registry, event_id, raw_path)?;
    write_dataset_file(dataset_path, &normalized.dataset)?;
    Ok(normalized)
}

/// Collects the configured event through `extractor` and writes the raw file
pub async fn collect_to_file<E: PageExtractor>(
    config: &Config,
    registry: &SchemaRegistry,
    extractor: E,
) -> Result<CollectedEvent, FinishlineError> {
    let collected =
        collect_event(registry, &config.event.id, extractor, config.source.pages()).await?;
    write_raw_file(Path::new(&config.output.raw_path), &collected.table)?;
    Ok(collected)
}

/// Runs the whole pipeline for the configured event through `extractor`
///
/// Collects, writes the raw file, normalizes and writes the dataset file.
/// A failed collection leaves both files untouched.
pub async fn run_event_with<E: PageExtractor>(
    config: &Config,
    registry: &SchemaRegistry,
    extractor: E,
) -> Result<NormalizedEvent, FinishlineError> {
    let collected = collect_to_file(config, registry, extractor).await?;
    let normalized = normalize_table(&collected.schema, &collected.table);
    write_dataset_file(Path::new(&config.output.dataset_path), &normalized.dataset)?;
    Ok(normalized)
}

/// Runs the whole pipeline for the configured event over HTTP
pub async fn run_event(config: &Config) -> Result<NormalizedEvent, FinishlineError> {
    let registry = SchemaRegistry::standard();
    // Resolved up front so an unknown event fails before the client is built
    registry.resolve(&config.event.id)?;
    let extractor = HttpExtractor::new(&config.source, config.fetch.clone())?;
    run_event_with(config, &registry, extractor).await
}

//! Event identifiers and their registered column schemas

use crate::schema::fields::CanonicalField;
use crate::SchemaError;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Source column labels used by the race results listings
const STANDARD_LABELS: [&str; CanonicalField::COUNT] = [
    "Race Place",
    "Bib",
    "Full Name",
    "Gender",
    "Age",
    "City",
    "Lap Count",
    "Gun Elapsed Time",
    "Chip Elapsed Time",
    "Overall Pace",
];

/// Events with a registered schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventId {
    /// The 20 km race
    Road20k,
    /// The 10 km race
    Road10k,
}

impl EventId {
    /// Every known event
    pub const ALL: [EventId; 2] = [Self::Road20k, Self::Road10k];

    /// Short identifier used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Road20k => "20k",
            Self::Road10k => "10k",
        }
    }

    /// Default raw results file name for this event
    pub fn results_file_name(&self) -> &'static str {
        match self {
            Self::Road20k => "20k_race_results.csv",
            Self::Road10k => "10k_race_results.csv",
        }
    }

    /// Human readable event title
    pub fn title(&self) -> &'static str {
        match self {
            Self::Road20k => "20k Race",
            Self::Road10k => "10k Race",
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventId {
    type Err = SchemaError;

    /// Accepts the short id (`20k`) or the raw results file name
    /// (`20k_race_results.csv`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|id| wanted == id.as_str() || wanted == id.results_file_name())
            .ok_or_else(|| SchemaError::UnknownEvent(s.to_string()))
    }
}

/// Immutable mapping from canonical fields to one source's column labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSchema {
    event: EventId,
    labels: [&'static str; CanonicalField::COUNT],
}

impl EventSchema {
    /// Creates a schema from labels given in canonical field order
    pub const fn new(event: EventId, labels: [&'static str; CanonicalField::COUNT]) -> Self {
        Self { event, labels }
    }

    pub fn event(&self) -> EventId {
        self.event
    }

    /// Source column label for a canonical field
    pub fn label(&self, field: CanonicalField) -> &'static str {
        self.labels[field.index()]
    }

    /// Source labels in canonical column order
    pub fn labels(&self) -> &[&'static str] {
        &self.labels
    }

    /// Number of canonical columns a collected row is truncated to
    pub fn column_count(&self) -> usize {
        self.labels.len()
    }

    /// Iterates `(field, label)` pairs in canonical order
    pub fn columns(&self) -> impl Iterator<Item = (CanonicalField, &'static str)> + '_ {
        CanonicalField::ALL
            .into_iter()
            .map(move |field| (field, self.label(field)))
    }
}

/// Registry of event schemas with fail-closed lookup
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: HashMap<EventId, EventSchema>,
}

impl SchemaRegistry {
    /// Creates an empty registry
    pub fn empty() -> Self {
        Self {
            schemas: HashMap::new(),
        }
    }

    /// Registry with the schemas of every known event
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        for event in EventId::ALL {
            registry.register(EventSchema::new(event, STANDARD_LABELS));
        }
        registry
    }

    /// Registers a schema, replacing any previous schema for the same event
    pub fn register(&mut self, schema: EventSchema) {
        self.schemas.insert(schema.event(), schema);
    }

    /// Looks up the schema of a registered event
    pub fn get(&self, event: EventId) -> Result<&EventSchema, SchemaError> {
        self.schemas
            .get(&event)
            .ok_or_else(|| SchemaError::UnknownEvent(event.to_string()))
    }

    /// Resolves an event identifier string to its schema
    ///
    /// Fails with `SchemaError::UnknownEvent` when the identifier is not a
    /// known event or no schema is registered for it; there is no default.
    pub fn resolve(&self, event_id: &str) -> Result<&EventSchema, SchemaError> {
        let event: EventId = event_id.parse()?;
        self.get(event)
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_id_from_short_name() {
        assert_eq!("20k".parse::<EventId>().unwrap(), EventId::Road20k);
        assert_eq!("10K".parse::<EventId>().unwrap(), EventId::Road10k);
    }

    #[test]
    fn test_event_id_from_file_name() {
        assert_eq!(
            "20k_race_results.csv".parse::<EventId>().unwrap(),
            EventId::Road20k
        );
        assert_eq!(
            "10k_race_results.csv".parse::<EventId>().unwrap(),
            EventId::Road10k
        );
    }

    #[test]
    fn test_unknown_event_id() {
        let err = "marathon".parse::<EventId>().unwrap_err();
        assert!(matches!(err, SchemaError::UnknownEvent(ref id) if id == "marathon"));
    }

    #[test]
    fn test_resolve_standard_schema() {
        let registry = SchemaRegistry::standard();
        let schema = registry.resolve("20k").unwrap();

        assert_eq!(schema.event(), EventId::Road20k);
        assert_eq!(schema.column_count(), 10);
        assert_eq!(schema.label(CanonicalField::ChipTime), "Chip Elapsed Time");
        assert_eq!(schema.label(CanonicalField::Pace), "Overall Pace");
        assert_eq!(schema.labels()[6], "Lap Count");
    }

    #[test]
    fn test_resolve_fails_closed() {
        let registry = SchemaRegistry::standard();
        assert!(matches!(
            registry.resolve("5k"),
            Err(SchemaError::UnknownEvent(_))
        ));
    }

    #[test]
    fn test_resolve_unregistered_event() {
        let registry = SchemaRegistry::empty();
        assert!(matches!(
            registry.resolve("10k"),
            Err(SchemaError::UnknownEvent(ref id)) if id == "10k"
        ));
    }

    #[test]
    fn test_register_replaces_schema() {
        let mut registry = SchemaRegistry::empty();
        let mut labels = STANDARD_LABELS;
        labels[CanonicalField::Pace.index()] = "Pace /km";
        registry.register(EventSchema::new(EventId::Road10k, labels));

        let schema = registry.get(EventId::Road10k).unwrap();
        assert_eq!(schema.label(CanonicalField::Pace), "Pace /km");
    }

    #[test]
    fn test_columns_in_canonical_order() {
        let registry = SchemaRegistry::standard();
        let schema = registry.get(EventId::Road10k).unwrap();
        let columns: Vec<_> = schema.columns().collect();

        assert_eq!(columns[0], (CanonicalField::Place, "Race Place"));
        assert_eq!(columns[9], (CanonicalField::Pace, "Overall Pace"));
    }
}

//! Event schema module
//!
//! This module defines the canonical results layout, the per-event mapping of
//! canonical fields to source column labels, and the mapping of raw rows onto
//! canonical fields.

mod fields;
mod mapper;
mod registry;

pub use fields::CanonicalField;
pub use mapper::{apply, BoundSchema, MappedRow};
pub use registry::{EventId, EventSchema, SchemaRegistry};

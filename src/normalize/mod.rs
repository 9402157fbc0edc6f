//! Field normalization
//!
//! Converts raw string fields into typed values. Each parser is total and
//! returns `None` on failure; whether a failure excludes a record is decided
//! by the dataset assembler, not here.

mod numeric;
mod time;

pub use numeric::parse_age;
pub use time::{format_pace, parse_elapsed_time, parse_pace};

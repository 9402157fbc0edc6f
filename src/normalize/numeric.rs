//! Numeric coercion of optional fields

/// Parses an age cell into whole years
///
/// Accepts non-negative integers and integral decimals (`34`, `34.0`).
/// Anything else yields `None`; a missing age never excludes a record.
pub fn parse_age(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(age) = s.parse::<u32>() {
        return Some(age);
    }

    let value = s.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        Some(value as u32)
    } else {
        None
    }
}

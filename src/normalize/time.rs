//! Elapsed time and pace parsing
//!
//! Every parser here is total: malformed input yields `None`, never an error
//! or a panic.

use chrono::{NaiveTime, Timelike};

/// Format of a finish time cell
const ELAPSED_TIME_FORMAT: &str = "%H:%M:%S";

/// Parses an `HH:MM:SS` elapsed time into seconds
///
/// The value is read as a clock time, so hours must be 0-23 and minutes and
/// seconds 0-59; unpadded components are accepted. Anything else, including
/// `MM:SS`, trailing fractions or any whitespace, yields `None`.
///
/// # Examples
///
/// ```
/// use finishline::normalize::parse_elapsed_time;
///
/// assert_eq!(parse_elapsed_time("01:02:03"), Some(3723));
/// assert_eq!(parse_elapsed_time("29:50"), None);
/// ```
pub fn parse_elapsed_time(s: &str) -> Option<u32> {
    // chrono skips whitespace before numeric fields
    if s.chars().any(char::is_whitespace) {
        return None;
    }
    let time = NaiveTime::parse_from_str(s, ELAPSED_TIME_FORMAT).ok()?;
    // Leap seconds are not valid elapsed times
    if time.nanosecond() >= 1_000_000_000 {
        return None;
    }
    Some(time.num_seconds_from_midnight())
}

/// Parses a pace string into seconds
///
/// Accepts `MM:SS` or `HH:MM:SS` with integer components. No colon, any other
/// number of components, or a non-integer component yields `None`.
///
/// # Examples
///
/// ```
/// use finishline::normalize::parse_pace;
///
/// assert_eq!(parse_pace("4:05"), Some(245));
/// assert_eq!(parse_pace("1:04:05"), Some(3845));
/// assert_eq!(parse_pace("405"), None);
/// ```
pub fn parse_pace(s: &str) -> Option<u32> {
    if !s.contains(':') {
        return None;
    }

    let parts = s
        .split(':')
        .map(|part| part.trim().parse::<u32>().ok())
        .collect::<Option<Vec<u32>>>()?;

    match parts.as_slice() {
        [minutes, seconds] => minutes.checked_mul(60)?.checked_add(*seconds),
        [hours, minutes, seconds] => hours
            .checked_mul(3600)?
            .checked_add(minutes.checked_mul(60)?)?
            .checked_add(*seconds),
        _ => None,
    }
}

/// Renders seconds as `M:SS`
///
/// # Examples
///
/// ```
/// use finishline::normalize::format_pace;
///
/// assert_eq!(format_pace(245), "4:05");
/// ```
pub fn format_pace(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_elapsed_time() {
        assert_eq!(parse_elapsed_time("01:02:03"), Some(3723));
        assert_eq!(parse_elapsed_time("01:29:50"), Some(5390));
        assert_eq!(parse_elapsed_time("00:00:00"), Some(0));
        assert_eq!(parse_elapsed_time("23:59:59"), Some(86_399));
    }

    #[test]
    fn test_parse_elapsed_time_round_trips() {
        for seconds in [0, 59, 60, 3599, 3600, 3723, 45_296, 86_399] {
            let text = format!(
                "{:02}:{:02}:{:02}",
                seconds / 3600,
                (seconds % 3600) / 60,
                seconds % 60
            );
            assert_eq!(parse_elapsed_time(&text), Some(seconds), "{}", text);
        }
    }

    #[test]
    fn test_parse_elapsed_time_rejects_other_shapes() {
        assert_eq!(parse_elapsed_time(""), None);
        assert_eq!(parse_elapsed_time("29:50"), None);
        assert_eq!(parse_elapsed_time("01:29:50.3"), None);
        assert_eq!(parse_elapsed_time("aa:bb:cc"), None);
        assert_eq!(parse_elapsed_time("25:00:00"), None);
        assert_eq!(parse_elapsed_time("01:60:00"), None);
        assert_eq!(parse_elapsed_time("DNF"), None);
        assert_eq!(parse_elapsed_time("..."), None);
        assert_eq!(parse_elapsed_time(" 01:29:50"), None);
        assert_eq!(parse_elapsed_time("01: 29:50"), None);
        assert_eq!(parse_elapsed_time("01:29:50 "), None);
        assert_eq!(parse_elapsed_time("01:29:\t50"), None);
    }

    #[test]
    fn test_parse_pace() {
        assert_eq!(parse_pace("4:05"), Some(245));
        assert_eq!(parse_pace("4:30"), Some(270));
        assert_eq!(parse_pace("1:04:05"), Some(3845));
        assert_eq!(parse_pace("04:05"), Some(245));
        assert_eq!(parse_pace("12:00"), Some(720));
    }

    #[test]
    fn test_parse_pace_rejects_invalid() {
        assert_eq!(parse_pace("abc"), None);
        assert_eq!(parse_pace(""), None);
        assert_eq!(parse_pace("405"), None);
        assert_eq!(parse_pace(":"), None);
        assert_eq!(parse_pace("4:"), None);
        assert_eq!(parse_pace("4:x5"), None);
        assert_eq!(parse_pace("4.5:05"), None);
        assert_eq!(parse_pace("-4:05"), None);
        assert_eq!(parse_pace("1:2:3:4"), None);
        assert_eq!(parse_pace("..."), None);
    }

    #[test]
    fn test_parse_pace_overflow() {
        assert_eq!(parse_pace("4294967295:00"), None);
    }

    #[test]
    fn test_format_pace() {
        assert_eq!(format_pace(245), "4:05");
        assert_eq!(format_pace(60), "1:00");
        assert_eq!(format_pace(59), "0:59");
        assert_eq!(format_pace(270), "4:30");
        assert_eq!(format_pace(3845), "64:05");
    }
}

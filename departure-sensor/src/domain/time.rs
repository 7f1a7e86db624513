//! Departure time handling.
//!
//! Darwin reports departure times as "HH:MM" strings, but the estimated
//! departure field doubles as a status field ("On time", "Delayed",
//! "Cancelled"). Other feeds hand over full timestamps. Everything here
//! reduces to a time of day, which is all a departure sensor displays.

use chrono::{DateTime, NaiveDateTime, NaiveTime};

/// Estimate value meaning the service leaves at its scheduled time.
pub const ON_TIME: &str = "On time";

/// Error returned when a departure time cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid departure time {input:?}: {reason}")]
pub struct TimeError {
    input: String,
    reason: &'static str,
}

impl TimeError {
    pub(crate) fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// Returns true when an estimate means "leaves as scheduled".
///
/// Darwin is not consistent about capitalisation, so the comparison
/// ignores ASCII case.
pub fn is_on_time(estimate: &str) -> bool {
    estimate.trim().eq_ignore_ascii_case(ON_TIME)
}

/// Parse a departure time into a time of day.
///
/// Accepts `HH:MM`, `HH:MM:SS`, RFC 3339 timestamps and naive ISO 8601
/// datetimes. Seconds are kept; [`format_hhmm`] drops them.
///
/// # Examples
///
/// ```
/// use departure_sensor::domain::{format_hhmm, parse_departure_time};
///
/// let t = parse_departure_time("09:05").unwrap();
/// assert_eq!(format_hhmm(t), "09:05");
///
/// let t = parse_departure_time("2024-03-15T10:45:30+00:00").unwrap();
/// assert_eq!(format_hhmm(t), "10:45");
///
/// assert!(parse_departure_time("Delayed").is_err());
/// ```
pub fn parse_departure_time(s: &str) -> Result<NaiveTime, TimeError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(TimeError::new(s, "empty"));
    }

    if let Some(time) = parse_clock(trimmed.as_bytes()) {
        return Ok(time);
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(datetime.time());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(datetime.time());
        }
    }

    Err(TimeError::new(s, "expected HH:MM or an ISO 8601 timestamp"))
}

/// Format a time of day the way the sensor displays it.
pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Parse `HH:MM` or `HH:MM:SS`.
fn parse_clock(bytes: &[u8]) -> Option<NaiveTime> {
    match bytes {
        [h1, h2, b':', m1, m2] => NaiveTime::from_hms_opt(
            parse_two_digits(*h1, *h2)?,
            parse_two_digits(*m1, *m2)?,
            0,
        ),
        [h1, h2, b':', m1, m2, b':', s1, s2] => NaiveTime::from_hms_opt(
            parse_two_digits(*h1, *h2)?,
            parse_two_digits(*m1, *m2)?,
            parse_two_digits(*s1, *s2)?,
        ),
        _ => None,
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(tens: u8, units: u8) -> Option<u32> {
    let d1 = (tens as char).to_digit(10)?;
    let d2 = (units as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every valid clock time formats back to itself
        #[test]
        fn hhmm_roundtrip(h in 0u32..24, m in 0u32..60) {
            let s = format!("{h:02}:{m:02}");
            let time = parse_departure_time(&s).unwrap();
            prop_assert_eq!(format_hhmm(time), s);
        }

        /// Formatted output is always five characters with a colon in the middle
        #[test]
        fn formatted_shape(h in 0u32..24, m in 0u32..60, sec in 0u32..60) {
            let s = format!("{h:02}:{m:02}:{sec:02}");
            let out = format_hhmm(parse_departure_time(&s).unwrap());
            prop_assert_eq!(out.len(), 5);
            prop_assert_eq!(&out[2..3], ":");
        }
    }
}

//! Display state of a departure sensor.

use std::fmt;

use chrono::NaiveTime;

use crate::domain::format_hhmm;

pub const AWAITING_DATA: &str = "Waiting for departure data";
pub const NO_REPLY: &str = "There was no reply from National Rail Trains for this service";
pub const INTERNAL_ERROR: &str = "There was an internal error for this service";
pub const UNINTERPRETABLE: &str = "Cannot interpret XML for this service from National Rail";

/// What the sensor currently displays.
///
/// Always renders to a short string: an `HH:MM` departure time or one of
/// the fixed messages above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SensorState {
    /// No refresh has completed yet.
    #[default]
    Awaiting,
    /// Next departure time.
    Departure(NaiveTime),
    /// The source had nothing for this service.
    NoReply,
    /// The request failed.
    InternalError,
    /// The response could not be interpreted.
    Uninterpretable,
}

impl SensorState {
    /// The departure time, when the last refresh succeeded.
    pub fn departure(&self) -> Option<NaiveTime> {
        match self {
            SensorState::Departure(time) => Some(*time),
            _ => None,
        }
    }
}

impl fmt::Display for SensorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorState::Departure(time) => f.write_str(&format_hhmm(*time)),
            SensorState::Awaiting => f.write_str(AWAITING_DATA),
            SensorState::NoReply => f.write_str(NO_REPLY),
            SensorState::InternalError => f.write_str(INTERNAL_ERROR),
            SensorState::Uninterpretable => f.write_str(UNINTERPRETABLE),
        }
    }
}

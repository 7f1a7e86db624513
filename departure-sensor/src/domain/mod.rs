//! Domain types shared by the Darwin client, the station lookup and the sensor.
//!
//! Station codes are validated at construction time; departure times are
//! reduced to a time of day before they reach the display state.

mod station;
mod time;

pub use station::{Crs, InvalidCrs};
pub use time::{ON_TIME, TimeError, format_hhmm, is_on_time, parse_departure_time};

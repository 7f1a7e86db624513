//! Sensor identity.

use crate::domain::Crs;

/// What a sensor watches. Fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorIdentity {
    /// Name of the platform entry the sensor was configured under.
    pub platform_name: String,
    pub station: Crs,
    pub destination: Crs,
    /// Offset as configured, used verbatim in the unique id and display name.
    pub time_offset: String,
    pub time_offset_minutes: i16,
    pub time_window_minutes: u16,
}

impl SensorIdentity {
    /// Identity whose configured offset is the decimal rendering of `time_offset_minutes`.
    pub fn new(
        platform_name: impl Into<String>,
        station: Crs,
        destination: Crs,
        time_offset_minutes: i16,
        time_window_minutes: u16,
    ) -> Self {
        Self {
            platform_name: platform_name.into(),
            station,
            destination,
            time_offset: time_offset_minutes.to_string(),
            time_offset_minutes,
            time_window_minutes,
        }
    }

    /// `{station}_{destination}_{time_offset}`.
    ///
    /// Unique across every station/destination/offset triple a host configures.
    pub fn unique_id(&self) -> String {
        format!("{}_{}_{}", self.station, self.destination, self.time_offset)
    }

    /// Whether the offset is a nonzero number of minutes, shown as walking time.
    pub fn has_walk_time(&self) -> bool {
        self.time_offset
            .trim()
            .parse::<i64>()
            .is_ok_and(|minutes| minutes != 0)
    }
}

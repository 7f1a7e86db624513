//! Platform configuration.
//!
//! The host supplies one [`PlatformConfig`] per configured station. It is
//! validated into one [`SensorConfig`] per destination before any sensor
//! is built, so sensors never see malformed codes or offsets.

use serde::Deserialize;

use crate::domain::{Crs, InvalidCrs};
use crate::sensor::SensorIdentity;

/// Platform name used when none is configured.
pub const DEFAULT_NAME: &str = "National Rail";

pub const ENV_API_KEY: &str = "DARWIN_API_KEY";
pub const ENV_STATION: &str = "DEPARTURE_STATION";
pub const ENV_DESTINATIONS: &str = "DEPARTURE_DESTINATIONS";
pub const ENV_TIME_OFFSET: &str = "DEPARTURE_TIME_OFFSET";
pub const ENV_TIME_WINDOW: &str = "DEPARTURE_TIME_WINDOW";
pub const ENV_NAME: &str = "DEPARTURE_SENSOR_NAME";

/// Darwin accepts offsets of up to two hours either side of now.
const TIME_OFFSET_RANGE: (i16, i16) = (-120, 120);
const TIME_WINDOW_RANGE: (u16, u16) = (0, 120);

/// Configuration errors, reported before any sensor is created.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid {field}: {source}")]
    InvalidStation {
        field: &'static str,
        source: InvalidCrs,
    },

    #[error("{field} must be whole minutes between {min} and {max}, got {value:?}")]
    OutOfRange {
        field: &'static str,
        value: String,
        min: i32,
        max: i32,
    },

    #[error("no destinations configured")]
    NoDestinations,
}

/// Configuration for one station and its destinations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlatformConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Station code departures are read from.
    pub station: String,
    /// One sensor per non-null entry.
    pub destinations: Vec<Option<String>>,
    pub api_key: String,
    /// Minutes from now; a nonzero offset is shown as walking time.
    pub time_offset: String,
    /// Minutes after the offset to include departures for.
    pub time_window: String,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

/// Everything needed to build one departure sensor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorConfig {
    pub identity: SensorIdentity,
    pub api_key: String,
}

impl PlatformConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `get`, keyed by the `ENV_*` names.
    ///
    /// Destinations are comma separated; blank entries count as unset.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            get(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let destinations = required(ENV_DESTINATIONS)?
            .split(',')
            .map(|d| Some(d.trim().to_string()).filter(|d| !d.is_empty()))
            .collect();

        Ok(Self {
            name: get(ENV_NAME)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(default_name),
            station: required(ENV_STATION)?,
            destinations,
            api_key: required(ENV_API_KEY)?,
            time_offset: get(ENV_TIME_OFFSET).unwrap_or_else(|| "0".to_string()),
            time_window: get(ENV_TIME_WINDOW).unwrap_or_else(|| "120".to_string()),
        })
    }

    /// Validate and expand into one sensor config per destination.
    pub fn sensor_configs(&self) -> Result<Vec<SensorConfig>, ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Missing("api_key"));
        }

        let station = parse_code("station", &self.station)?;
        let time_offset = self.time_offset.trim().to_string();
        let time_offset_minutes = parse_minutes("time_offset", &time_offset, TIME_OFFSET_RANGE)?;
        let time_window_minutes =
            parse_minutes("time_window", &self.time_window, TIME_WINDOW_RANGE)?;

        let configs: Vec<SensorConfig> = self
            .destinations
            .iter()
            .flatten()
            .map(|destination| -> Result<SensorConfig, ConfigError> {
                Ok(SensorConfig {
                    identity: SensorIdentity {
                        platform_name: self.name.clone(),
                        station,
                        destination: parse_code("destination", destination)?,
                        time_offset: time_offset.clone(),
                        time_offset_minutes,
                        time_window_minutes,
                    },
                    api_key: self.api_key.clone(),
                })
            })
            .collect::<Result<_, _>>()?;

        if configs.is_empty() {
            return Err(ConfigError::NoDestinations);
        }
        Ok(configs)
    }
}

fn parse_code(field: &'static str, value: &str) -> Result<Crs, ConfigError> {
    Crs::normalize(value).map_err(|source| ConfigError::InvalidStation { field, source })
}

fn parse_minutes<T>(field: &'static str, value: &str, (min, max): (T, T)) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Copy + Into<i32>,
{
    let out_of_range = || ConfigError::OutOfRange {
        field,
        value: value.to_string(),
        min: min.into(),
        max: max.into(),
    };

    let minutes: T = value.trim().parse().map_err(|_| out_of_range())?;
    if minutes < min || minutes > max {
        return Err(out_of_range());
    }
    Ok(minutes)
}

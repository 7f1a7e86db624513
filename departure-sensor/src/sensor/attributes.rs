//! Attribute bag reported alongside the display state.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::darwin::{NrccMessage, ServiceRecord};

/// Attributes of a departure sensor.
///
/// Serializes to a flat object: only `last_refresh` before the first
/// successful refresh, the full set afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorAttributes {
    /// When the board was generated, or empty before the first refresh.
    pub last_refresh: String,

    #[serde(flatten)]
    pub departures: Option<DepartureAttributes>,
}

/// Attributes available once a board has been fetched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartureAttributes {
    /// Operator advisories for the station.
    pub message: Vec<NrccMessage>,
    pub station_name: String,
    pub destination_name: String,
    /// The next service, without its calling points.
    pub service: ServiceRecord,
    /// The services after it, in board order.
    pub services: Vec<ServiceRecord>,
    /// Names of the stops the next service makes after this station.
    pub calling_points: Vec<String>,
    pub offset: String,
    pub station_code: String,

    #[serde(flatten)]
    pub target: Option<TargetStation>,
}

/// The destination, when the station lookup knows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetStation {
    pub target_station_name: String,
    pub target_station_code: String,
}

impl SensorAttributes {
    /// Attributes of a sensor that has never fetched successfully.
    pub fn empty() -> Self {
        Self {
            last_refresh: String::new(),
            departures: None,
        }
    }

    /// The attributes as a JSON object, the shape a host stores them in.
    ///
    /// A bag that cannot be serialized is logged and reported as empty.
    pub fn to_json_map(&self) -> Map<String, Value> {
        into_object(serde_json::to_value(self))
    }
}

fn into_object(value: serde_json::Result<Value>) -> Map<String, Value> {
    match value {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            warn!(value = %other, "sensor attributes did not serialize to an object");
            Map::new()
        }
        Err(err) => {
            warn!(error = %err, "failed to serialize sensor attributes");
            Map::new()
        }
    }
}

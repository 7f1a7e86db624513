//! Darwin departure board DTOs.
//!
//! These types map directly to the Darwin LDB JSON API responses.
//! They use `Option` liberally because Darwin omits fields rather than
//! sending null values in many cases. Fields this crate does not model
//! are kept in `extra` so they still reach the sensor attributes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response from `GetDepBoardWithDetails` filtered to a destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureBoard {
    /// When this response was generated (ISO 8601 datetime).
    #[serde(default)]
    pub generated_at: String,

    /// Human-readable name of the board station.
    pub location_name: String,

    /// CRS code of the board station.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crs: Option<String>,

    /// Human-readable name of the destination the board was filtered by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_location_name: Option<String>,

    /// CRS code of the destination the board was filtered by.
    #[serde(
        default,
        rename = "filtercrs",
        skip_serializing_if = "Option::is_none"
    )]
    pub filter_crs: Option<String>,

    /// Network Rail communication messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nrcc_messages: Option<Vec<NrccMessage>>,

    /// Train services, in departure order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub train_services: Option<Vec<ServiceRecord>>,
}

impl DepartureBoard {
    /// Train services on the board, empty when Darwin omitted the list.
    pub fn services(&self) -> &[ServiceRecord] {
        self.train_services.as_deref().unwrap_or(&[])
    }
}

/// A service on the departure board, including calling points.
///
/// Only the fields the sensor reads are typed. Everything else Darwin sends
/// (`serviceID`, `platform`, `origin`, `destination`, reasons, explicit nulls)
/// stays in `extra` exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    /// Scheduled time of departure from the board station.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std: Option<String>,

    /// Estimated time of departure from the board station.
    /// May be "On time", "Delayed", "Cancelled", or a time like "10:15".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etd: Option<String>,

    /// Subsequent calling points, one group per portion of a splitting train.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsequent_calling_points: Option<Vec<CallingPointGroup>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ServiceRecord {
    /// Station names from the first subsequent calling point group, in order.
    ///
    /// Empty when Darwin sent no subsequent calling points.
    pub fn calling_point_names(&self) -> Vec<String> {
        self.subsequent_calling_points
            .as_deref()
            .and_then(|groups| groups.first())
            .map(|group| {
                group
                    .calling_point
                    .iter()
                    .map(|cp| cp.location_name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// This record with the nested calling points removed.
    pub fn without_calling_points(&self) -> Self {
        Self {
            subsequent_calling_points: None,
            ..self.clone()
        }
    }

    /// A passthrough string field such as `serviceID` or `platform`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.extra.get(name).and_then(Value::as_str)
    }
}

/// Wrapper for a list of calling points.
///
/// Darwin wraps calling points in this structure to support split/join services,
/// where multiple arrays represent different portions of a train.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallingPointGroup {
    #[serde(default)]
    pub calling_point: Vec<CallingPoint>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single calling point (station stop).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallingPoint {
    /// Human-readable station name.
    #[serde(default)]
    pub location_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crs: Option<String>,

    /// Scheduled, estimated and actual times, plus anything else Darwin sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Network Rail communication message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NrccMessage {
    /// The message content (may contain HTML).
    #[serde(rename = "Value", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

//! Departure sensor.
//!
//! A [`DepartureSensor`] watches one station/destination pair. The host
//! calls [`DepartureSensor::refresh`] on its own schedule and reads the
//! display state and attributes in between. A refresh never fails: fetch
//! errors become a fixed display message and the previous snapshot stays
//! available.

mod attributes;
mod identity;
mod snapshot;
mod state;

#[cfg(test)]
mod sensor_tests;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::darwin::{DarwinConfig, DarwinError, DarwinFeed, FetchOutcome, RailDataClient};
use crate::stations::StationLookup;

pub use attributes::{DepartureAttributes, SensorAttributes, TargetStation};
pub use identity::SensorIdentity;
pub use snapshot::{DepartureSnapshot, SnapshotError, next_departure};
pub use state::{AWAITING_DATA, INTERNAL_ERROR, NO_REPLY, SensorState, UNINTERPRETABLE};

/// Next departure from a station to a destination.
#[derive(Debug)]
pub struct DepartureSensor<C> {
    identity: SensorIdentity,
    unique_id: String,
    client: C,
    stations: Arc<StationLookup>,
    /// Station names shown in the display name. Start as the codes and
    /// keep the last fetched names across failed refreshes.
    station_name: String,
    destination_name: String,
    state: SensorState,
    snapshot: Option<DepartureSnapshot>,
}

impl DepartureSensor<DarwinFeed> {
    /// Sensor backed by the live Darwin API.
    pub fn darwin(
        identity: SensorIdentity,
        api_key: impl Into<String>,
        stations: Arc<StationLookup>,
    ) -> Result<Self, DarwinError> {
        let feed = DarwinFeed::with_config(
            DarwinConfig::new(api_key),
            identity.station,
            identity.destination,
        )?
        .with_time_offset(identity.time_offset_minutes)
        .with_time_window(identity.time_window_minutes);

        Ok(Self::new(identity, feed, stations))
    }
}

impl<C: RailDataClient> DepartureSensor<C> {
    pub fn new(identity: SensorIdentity, client: C, stations: Arc<StationLookup>) -> Self {
        Self {
            unique_id: identity.unique_id(),
            station_name: identity.station.to_string(),
            destination_name: identity.destination.to_string(),
            identity,
            client,
            stations,
            state: SensorState::default(),
            snapshot: None,
        }
    }

    pub fn identity(&self) -> &SensorIdentity {
        &self.identity
    }

    /// Stable identifier, see [`SensorIdentity::unique_id`].
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    /// `Trains {station} to {destination}`, plus ` ({offset}m walk)` for a
    /// nonzero offset.
    pub fn display_name(&self) -> String {
        let mut name = format!("Trains {} to {}", self.station_name, self.destination_name);
        if self.identity.has_walk_time() {
            name.push_str(&format!(" ({}m walk)", self.identity.time_offset));
        }
        name
    }

    pub fn state(&self) -> SensorState {
        self.state
    }

    /// The last successful fetch, if any.
    pub fn snapshot(&self) -> Option<&DepartureSnapshot> {
        self.snapshot.as_ref()
    }

    /// Fetch the board and update state.
    ///
    /// On failure the state becomes a fixed message and the snapshot is
    /// left as it was.
    pub async fn refresh(&mut self) {
        let board = match self.client.fetch().await {
            FetchOutcome::Success(board) => board,
            FetchOutcome::NoData => {
                warn!(sensor = %self.unique_id, "There was no reply from the National Rail servers");
                self.state = SensorState::NoReply;
                return;
            }
            FetchOutcome::TransportError(err) => {
                warn!(sensor = %self.unique_id, error = %err, "departure board request failed");
                self.state = SensorState::InternalError;
                return;
            }
            FetchOutcome::DataShapeError(err) => {
                warn!(sensor = %self.unique_id, error = %err, "failed to interpret departure board");
                self.state = SensorState::Uninterpretable;
                return;
            }
        };

        let snapshot = match DepartureSnapshot::try_from(*board) {
            Ok(snapshot) => snapshot,
            Err(SnapshotError::NoServices) => {
                warn!(sensor = %self.unique_id, "departure board lists no services");
                self.state = SensorState::NoReply;
                return;
            }
            Err(err) => {
                warn!(sensor = %self.unique_id, error = %err, "failed to interpret departure board");
                self.state = SensorState::Uninterpretable;
                return;
            }
        };

        self.station_name.clone_from(&snapshot.location_name);
        self.destination_name.clone_from(&snapshot.destination_name);
        self.state = SensorState::Departure(snapshot.next_departure);
        debug!(
            sensor = %self.unique_id,
            next_departure = %self.state,
            services = snapshot.other_services.len() + 1,
            "departure board refreshed"
        );
        self.snapshot = Some(snapshot);
    }

    /// Attributes derived from the current snapshot.
    pub fn attributes(&self) -> SensorAttributes {
        let Some(snapshot) = &self.snapshot else {
            return SensorAttributes::empty();
        };

        let destination = self.identity.destination;
        let target = self
            .stations
            .get(&destination)
            .map(|name| TargetStation {
                target_station_name: name.to_string(),
                target_station_code: destination.to_string(),
            });

        SensorAttributes {
            last_refresh: snapshot.generated_at.clone(),
            departures: Some(DepartureAttributes {
                message: snapshot.messages.clone(),
                station_name: snapshot.location_name.clone(),
                destination_name: snapshot.destination_name.clone(),
                service: snapshot.primary_service.without_calling_points(),
                services: snapshot.other_services.clone(),
                calling_points: snapshot.primary_service.calling_point_names(),
                offset: self.identity.time_offset.clone(),
                station_code: self.identity.station.to_string(),
                target,
            }),
        }
    }
}

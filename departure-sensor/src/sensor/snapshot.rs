//! The last successfully fetched departure board.

use chrono::NaiveTime;

use crate::darwin::{DepartureBoard, NrccMessage, ServiceRecord};
use crate::domain::{TimeError, is_on_time, parse_departure_time};

/// Why a decoded board cannot become a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// The board lists no services to the destination.
    #[error("departure board lists no services")]
    NoServices,

    /// The board was not filtered by a named destination.
    #[error("departure board has no destination name")]
    MissingDestinationName,

    #[error(transparent)]
    Time(#[from] TimeError),
}

/// A successful fetch, split the way the sensor reports it.
///
/// Replaced wholesale on every successful refresh, never merged.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartureSnapshot {
    /// When Darwin generated the board; empty if it did not say.
    pub generated_at: String,
    pub location_name: String,
    pub destination_name: String,
    /// The next service to the destination.
    pub primary_service: ServiceRecord,
    /// The services after it, in board order.
    pub other_services: Vec<ServiceRecord>,
    pub messages: Vec<NrccMessage>,
    /// Departure time of the primary service.
    pub next_departure: NaiveTime,
}

impl TryFrom<DepartureBoard> for DepartureSnapshot {
    type Error = SnapshotError;

    fn try_from(board: DepartureBoard) -> Result<Self, Self::Error> {
        let destination_name = board
            .filter_location_name
            .ok_or(SnapshotError::MissingDestinationName)?;

        let mut services = board.train_services.unwrap_or_default().into_iter();
        let primary_service = services.next().ok_or(SnapshotError::NoServices)?;
        let next_departure = next_departure(&primary_service)?;

        Ok(Self {
            generated_at: board.generated_at,
            location_name: board.location_name,
            destination_name,
            primary_service,
            other_services: services.collect(),
            messages: board.nrcc_messages.unwrap_or_default(),
            next_departure,
        })
    }
}

/// When `service` is expected to leave.
///
/// The estimate is used unless it is "On time" or absent, in which case the
/// scheduled time is. An estimate that is a status rather than a time
/// ("Delayed", "Cancelled") also falls back to the scheduled time.
pub fn next_departure(service: &ServiceRecord) -> Result<NaiveTime, TimeError> {
    let scheduled = || {
        service
            .std
            .as_deref()
            .ok_or_else(|| TimeError::new("", "no scheduled departure"))
            .and_then(parse_departure_time)
    };

    match service.etd.as_deref() {
        Some(estimate) if !is_on_time(estimate) => {
            parse_departure_time(estimate).or_else(|_| scheduled())
        }
        _ => scheduled(),
    }
}

//! Refresh and attribute behaviour of the departure sensor.

use std::collections::VecDeque;
use std::sync::Mutex;

use super::*;
use crate::darwin::{
    CallingPoint, CallingPointGroup, DepartureBoard, MockDarwinClient, NrccMessage, ServiceRecord,
};
use crate::domain::Crs;

fn crs(s: &str) -> Crs {
    Crs::parse(s).unwrap()
}

/// Client that replays a fixed sequence of outcomes, then reports no data.
struct ScriptedClient {
    outcomes: Mutex<VecDeque<FetchOutcome>>,
}

impl ScriptedClient {
    fn new(outcomes: impl IntoIterator<Item = FetchOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
        }
    }
}

impl RailDataClient for ScriptedClient {
    async fn fetch(&self) -> FetchOutcome {
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(FetchOutcome::NoData)
    }
}

fn calling_at(names: &[&str]) -> Option<Vec<CallingPointGroup>> {
    Some(vec![CallingPointGroup {
        calling_point: names
            .iter()
            .map(|name| CallingPoint {
                location_name: name.to_string(),
                ..CallingPoint::default()
            })
            .collect(),
        ..CallingPointGroup::default()
    }])
}

fn service(std: &str, etd: Option<&str>) -> ServiceRecord {
    let mut extra = serde_json::Map::new();
    extra.insert("serviceID".to_string(), format!("svc-{std}").into());
    extra.insert("platform".to_string(), "4".into());
    ServiceRecord {
        std: Some(std.to_string()),
        etd: etd.map(str::to_string),
        subsequent_calling_points: calling_at(&["Stevenage", "Peterborough"]),
        extra,
    }
}

fn board(generated_at: &str, services: Vec<ServiceRecord>) -> DepartureBoard {
    DepartureBoard {
        generated_at: generated_at.to_string(),
        location_name: "London Paddington".to_string(),
        crs: Some("PAD".to_string()),
        filter_location_name: Some("London Kings Cross".to_string()),
        filter_crs: Some("KGX".to_string()),
        nrcc_messages: Some(vec![NrccMessage {
            value: Some("Reduced service on Sundays".to_string()),
            ..NrccMessage::default()
        }]),
        train_services: Some(services),
    }
}

fn success(board: DepartureBoard) -> FetchOutcome {
    FetchOutcome::Success(Box::new(board))
}

fn identity(destination: &str, offset: i16) -> SensorIdentity {
    SensorIdentity::new("National Rail", crs("PAD"), crs(destination), offset, 120)
}

fn sensor(
    destination: &str,
    offset: i16,
    outcomes: impl IntoIterator<Item = FetchOutcome>,
) -> DepartureSensor<ScriptedClient> {
    DepartureSensor::new(
        identity(destination, offset),
        ScriptedClient::new(outcomes),
        Arc::new(StationLookup::builtin()),
    )
}

fn json_error() -> DarwinError {
    DarwinError::Json {
        message: "expected value at line 1 column 1".to_string(),
        body: Some("<html>".to_string()),
    }
}

#[test]
fn new_sensor_has_only_last_refresh() {
    let sensor = sensor("KGX", 0, []);

    assert_eq!(sensor.state(), SensorState::Awaiting);
    assert!(sensor.snapshot().is_none());

    let map = sensor.attributes().to_json_map();
    assert_eq!(map.len(), 1);
    assert_eq!(map["last_refresh"], "");
}

#[test]
fn unique_id_and_display_name() {
    let walking = sensor("KGX", 5, []);
    assert_eq!(walking.unique_id(), "PAD_KGX_5");
    assert_eq!(walking.display_name(), "Trains PAD to KGX (5m walk)");

    let no_walk = sensor("KGX", 0, []);
    assert_eq!(no_walk.unique_id(), "PAD_KGX_0");
    assert_eq!(no_walk.display_name(), "Trains PAD to KGX");
}

#[test]
fn darwin_sensor_binds_feed_to_identity() {
    let sensor =
        DepartureSensor::darwin(identity("KGX", 5), "key", Arc::new(StationLookup::new())).unwrap();
    assert_eq!(sensor.unique_id(), "PAD_KGX_5");
    assert_eq!(sensor.identity().time_offset_minutes, 5);
    assert_eq!(sensor.state(), SensorState::Awaiting);
}

#[tokio::test]
async fn successful_refresh_shows_next_departure() {
    let mut sensor = sensor(
        "KGX",
        5,
        [success(board(
            "2024-03-15T10:30:00Z",
            vec![
                service("10:45", Some("10:49")),
                service("11:15", Some("On time")),
            ],
        ))],
    );

    sensor.refresh().await;

    assert_eq!(sensor.state().to_string(), "10:49");
    assert_eq!(
        sensor.display_name(),
        "Trains London Paddington to London Kings Cross (5m walk)"
    );

    let attrs = sensor.attributes();
    assert_eq!(attrs.last_refresh, "2024-03-15T10:30:00Z");
    let departures = attrs.departures.unwrap();
    assert_eq!(departures.station_name, "London Paddington");
    assert_eq!(departures.destination_name, "London Kings Cross");
    assert_eq!(departures.station_code, "PAD");
    assert_eq!(departures.offset, "5");
    assert_eq!(departures.calling_points, vec!["Stevenage", "Peterborough"]);
    assert_eq!(
        departures.message[0].value.as_deref(),
        Some("Reduced service on Sundays")
    );
    assert_eq!(departures.service.std.as_deref(), Some("10:45"));
    assert!(departures.service.subsequent_calling_points.is_none());
    assert_eq!(departures.services.len(), 1);
    assert_eq!(departures.services[0].std.as_deref(), Some("11:15"));
    assert!(departures.services[0].subsequent_calling_points.is_some());
}

#[tokio::test]
async fn on_time_and_missing_estimates_use_scheduled_time() {
    let mut sensor = sensor(
        "KGX",
        0,
        [
            success(board("t1", vec![service("10:45", Some("On time"))])),
            success(board("t2", vec![service("11:02", None)])),
        ],
    );

    sensor.refresh().await;
    assert_eq!(sensor.state().to_string(), "10:45");

    sensor.refresh().await;
    assert_eq!(sensor.state().to_string(), "11:02");
}

#[tokio::test]
async fn known_destination_reports_target_station() {
    let mut sensor = sensor(
        "KGX",
        0,
        [success(board("t", vec![service("10:45", None)]))],
    );
    sensor.refresh().await;

    let map = sensor.attributes().to_json_map();
    assert_eq!(map["target_station_name"], "London Kings Cross");
    assert_eq!(map["target_station_code"], "KGX");
}

#[tokio::test]
async fn unknown_destination_omits_target_station() {
    let mut sensor = sensor(
        "ZZZ",
        0,
        [success(board("t", vec![service("10:45", None)]))],
    );
    sensor.refresh().await;

    let map = sensor.attributes().to_json_map();
    assert!(map.contains_key("station_name"));
    assert!(!map.contains_key("target_station_name"));
    assert!(!map.contains_key("target_station_code"));
}

#[tokio::test]
async fn no_data_keeps_previous_snapshot() {
    let mut sensor = sensor(
        "KGX",
        0,
        [
            success(board("first", vec![service("10:45", None)])),
            FetchOutcome::NoData,
        ],
    );

    sensor.refresh().await;
    let before = sensor.snapshot().cloned();
    let attrs_before = sensor.attributes();

    sensor.refresh().await;

    assert_eq!(sensor.state().to_string(), NO_REPLY);
    assert_eq!(sensor.snapshot().cloned(), before);
    assert_eq!(sensor.attributes(), attrs_before);
}

#[tokio::test]
async fn transport_error_shows_internal_error() {
    let mut sensor = sensor(
        "KGX",
        0,
        [
            success(board("first", vec![service("10:45", None)])),
            FetchOutcome::TransportError(DarwinError::RateLimited),
        ],
    );

    sensor.refresh().await;
    sensor.refresh().await;

    assert_eq!(sensor.state().to_string(), INTERNAL_ERROR);
    assert_eq!(sensor.attributes().last_refresh, "first");
}

#[tokio::test]
async fn data_shape_error_shows_uninterpretable() {
    let mut sensor = sensor("KGX", 0, [FetchOutcome::DataShapeError(json_error())]);

    sensor.refresh().await;

    assert_eq!(sensor.state().to_string(), UNINTERPRETABLE);
    assert!(sensor.snapshot().is_none());
    assert_eq!(sensor.attributes(), SensorAttributes::empty());
}

#[tokio::test]
async fn empty_service_list_is_treated_as_no_reply() {
    let mut sensor = sensor(
        "KGX",
        0,
        [
            success(board("first", vec![service("10:45", None)])),
            success(board("second", vec![])),
        ],
    );

    sensor.refresh().await;
    sensor.refresh().await;

    assert_eq!(sensor.state().to_string(), NO_REPLY);
    assert_eq!(sensor.attributes().last_refresh, "first");
}

#[tokio::test]
async fn unparseable_scheduled_time_is_uninterpretable() {
    let mut sensor = sensor(
        "KGX",
        0,
        [success(board("t", vec![service("soon", Some("On time"))]))],
    );

    sensor.refresh().await;

    assert_eq!(sensor.state().to_string(), UNINTERPRETABLE);
    assert!(sensor.snapshot().is_none());
}

#[tokio::test]
async fn fetched_names_stick_across_failures() {
    let mut sensor = sensor(
        "KGX",
        0,
        [
            success(board("t", vec![service("10:45", None)])),
            FetchOutcome::TransportError(DarwinError::Unauthorized),
        ],
    );

    sensor.refresh().await;
    sensor.refresh().await;

    assert_eq!(
        sensor.display_name(),
        "Trains London Paddington to London Kings Cross"
    );
}

#[tokio::test]
async fn later_success_replaces_snapshot() {
    let mut sensor = sensor(
        "KGX",
        0,
        [
            success(board(
                "first",
                vec![service("10:45", None), service("11:15", None)],
            )),
            success(board("second", vec![service("12:00", Some("12:03"))])),
        ],
    );

    sensor.refresh().await;
    sensor.refresh().await;

    let attrs = sensor.attributes();
    assert_eq!(sensor.state().to_string(), "12:03");
    assert_eq!(attrs.last_refresh, "second");
    assert!(attrs.departures.unwrap().services.is_empty());
}

#[tokio::test]
async fn refresh_from_mock_boards() {
    let client = MockDarwinClient::new("data/mock_boards").unwrap();
    let mut sensor = DepartureSensor::new(
        identity("OXF", 0),
        client.feed(crs("PAD"), crs("OXF")),
        Arc::new(StationLookup::builtin()),
    );

    sensor.refresh().await;

    assert_eq!(sensor.state().to_string(), "10:48");
    assert_eq!(sensor.display_name(), "Trains London Paddington to Oxford");

    let map = sensor.attributes().to_json_map();
    assert_eq!(
        map["calling_points"],
        serde_json::json!(["Slough", "Reading", "Didcot Parkway", "Oxford"])
    );
    assert_eq!(map["service"]["rsid"], "GW442300");
    assert_eq!(map["services"].as_array().unwrap().len(), 1);
    assert_eq!(map["target_station_name"], "Oxford");
}

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use departure_sensor::config::{PlatformConfig, SensorConfig};
use departure_sensor::darwin::{MockDarwinClient, RailDataClient};
use departure_sensor::sensor::DepartureSensor;
use departure_sensor::stations::{StationCache, StationClient, StationLookup};

/// Default refresh period when REFRESH_SECONDS is unset.
const DEFAULT_REFRESH: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let configs = match PlatformConfig::from_env().and_then(|c| c.sensor_configs()) {
        Ok(configs) => configs,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let stations = Arc::new(load_stations().await);
    let refresh = std::env::var("REFRESH_SECONDS")
        .ok()
        .and_then(|s| s.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_REFRESH);

    if let Ok(dir) = std::env::var("DARWIN_MOCK_DIR") {
        let client = match MockDarwinClient::new(&dir) {
            Ok(client) => client,
            Err(e) => {
                error!(error = %e, "failed to load mock boards");
                std::process::exit(1);
            }
        };
        info!(dir = %dir, stations = ?client.available_stations(), "serving mock departure boards");

        let sensors = configs
            .into_iter()
            .map(|SensorConfig { identity, .. }| {
                let feed = client.feed(identity.station, identity.destination);
                DepartureSensor::new(identity, feed, stations.clone())
            })
            .collect();
        run(sensors, refresh).await;
    } else {
        let mut sensors = Vec::with_capacity(configs.len());
        for SensorConfig { identity, api_key } in configs {
            let unique_id = identity.unique_id();
            match DepartureSensor::darwin(identity, api_key, stations.clone()) {
                Ok(sensor) => sensors.push(sensor),
                Err(e) => error!(sensor = %unique_id, error = %e, "failed to create Darwin client"),
            }
        }
        run(sensors, refresh).await;
    }
}

/// Station names: the knowledgebase feed when STATIONS_API_KEY is set,
/// otherwise (or if loading fails) the builtin table.
async fn load_stations() -> StationLookup {
    let Ok(api_key) = std::env::var("STATIONS_API_KEY") else {
        return StationLookup::builtin();
    };

    let cache_path = std::env::var("STATIONS_CACHE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("stations_cache.json"));
    let cache = StationCache::new(cache_path);

    let loaded = match StationClient::new(&api_key) {
        Ok(client) => StationLookup::load(&client, &cache).await,
        Err(e) => Err(e),
    };

    match loaded {
        Ok(lookup) => {
            info!(count = lookup.len(), "loaded station names");
            lookup
        }
        Err(e) => {
            warn!(error = %e, "failed to load station names, using builtin table");
            StationLookup::builtin()
        }
    }
}

/// Refresh every sensor on a fixed interval, logging what each displays.
async fn run<C: RailDataClient>(mut sensors: Vec<DepartureSensor<C>>, period: Duration) {
    if sensors.is_empty() {
        error!("no sensors to run");
        std::process::exit(1);
    }

    info!(sensors = sensors.len(), period_secs = period.as_secs(), "starting departure sensors");

    let mut interval = tokio::time::interval(period);
    loop {
        interval.tick().await;
        join_all(sensors.iter_mut().map(|sensor| sensor.refresh())).await;

        for sensor in &sensors {
            let attributes = serde_json::Value::Object(sensor.attributes().to_json_map());
            info!(
                sensor = sensor.unique_id(),
                name = %sensor.display_name(),
                state = %sensor.state(),
                "departure sensor updated"
            );
            debug!(sensor = sensor.unique_id(), %attributes, "attributes");
        }
    }
}

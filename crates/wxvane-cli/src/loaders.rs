//! Data loaders composing the NWS client with the failure-handling
//! strategies and the snapshot cache.
//!
//! Must-have data goes through `with_error_handling`, so the caller always
//! receives a `LoaderResult`; best-effort data (an observation for an
//! already-resolved station, active alerts) degrades gracefully instead of
//! failing the whole load.

use wxvane_core::{with_error_handling, with_graceful_fallback, LoaderResult};
use wxvane_nws::{ForecastDay, Hazard, NwsClient, SnapshotCache, WeatherSnapshot};

/// Load current conditions for a coordinate pair, consulting the snapshot
/// cache before calling out at all.
pub async fn load_current_conditions(
    client: &NwsClient,
    cache: &SnapshotCache,
    lat: f64,
    lon: f64,
) -> LoaderResult<WeatherSnapshot> {
    if let Some(snapshot) = cache.get(lat, lon) {
        return LoaderResult::ok(snapshot);
    }

    with_error_handling("load current conditions", async {
        let location = client.get_location_by_point(lat, lon).await?;
        let stations = client
            .get_stations_by_gridpoint(&location.grid_id, location.grid_x, location.grid_y)
            .await?;

        let snapshot = match stations.into_iter().next() {
            None => WeatherSnapshot::default(),
            Some(station) => {
                // Station info is still useful when its latest observation
                // is unavailable.
                let observation = with_graceful_fallback(
                    &format!("load observation for station {}", station.id),
                    async {
                        let observation = client.get_latest_observation(&station.id).await?;
                        Ok(Some(observation))
                    },
                    None,
                )
                .await;

                WeatherSnapshot {
                    station: Some(station),
                    observation,
                }
            }
        };

        cache.set(lat, lon, snapshot.clone());
        Ok(snapshot)
    })
    .await
}

/// Load the forecast periods for a coordinate pair.
pub async fn load_forecast(
    client: &NwsClient,
    lat: f64,
    lon: f64,
) -> LoaderResult<Vec<ForecastDay>> {
    with_error_handling("load forecast", async {
        let location = client.get_location_by_point(lat, lon).await?;
        let forecast = client.get_forecast_by_url(&location.forecast_url).await?;
        Ok(forecast)
    })
    .await
}

/// Load active alerts for a coordinate pair.
pub async fn load_alerts(client: &NwsClient, lat: f64, lon: f64) -> LoaderResult<Vec<Hazard>> {
    with_error_handling("load active alerts", async {
        let hazards = client.get_active_alerts(lat, lon).await?;
        Ok(hazards)
    })
    .await
}

/// Best-effort alerts for augmenting another view; failures degrade to an
/// empty list and never block the primary response.
pub async fn load_alerts_or_empty(client: &NwsClient, lat: f64, lon: f64) -> Vec<Hazard> {
    with_graceful_fallback(
        "load active alerts",
        async {
            let hazards = client.get_active_alerts(lat, lon).await?;
            Ok(hazards)
        },
        Vec::new(),
    )
    .await
}

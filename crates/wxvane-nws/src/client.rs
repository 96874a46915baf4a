//! NWS API client façade.
//!
//! One method per upstream operation, each wiring the same pipeline:
//! build the URL, fetch with retry, classify non-success statuses, validate
//! the payload structurally, map it to a domain model.

use serde_json::Value;
use tracing::instrument;

use wxvane_core::{NwsConfig, RetryPolicy, WeatherError};

use crate::http::fetch_with_retry;
use crate::mapper::{map_alerts, map_forecast, map_observation, map_points, map_stations};
use crate::schema::{
    validate_alerts, validate_forecast, validate_observation, validate_points, validate_stations,
};
use crate::types::{ForecastDay, Hazard, LocationInfo, Observation, Station};

const GEO_JSON: &str = "application/geo+json";

#[derive(Debug, Clone)]
pub struct NwsClient {
    client: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl NwsClient {
    /// Client against the production NWS endpoint with the default policy.
    pub fn new() -> Result<Self, WeatherError> {
        Self::from_config(NwsConfig::default())
    }

    pub fn from_config(config: NwsConfig) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                WeatherError::network(format!("failed to build HTTP client: {}", e), None)
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry: config.retry,
        })
    }

    /// Resolve grid metadata for a coordinate pair.
    #[instrument(skip(self), level = "info")]
    pub async fn get_location_by_point(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<LocationInfo, WeatherError> {
        let url = format!("{}/points/{:.4},{:.4}", self.base_url, lat, lon);
        let raw = self.get_geo_json("points", &url).await?;
        Ok(map_points(validate_points(&raw)?))
    }

    /// Observation stations serving a gridpoint, closest first.
    #[instrument(skip(self), level = "info")]
    pub async fn get_stations_by_gridpoint(
        &self,
        grid_id: &str,
        x: u32,
        y: u32,
    ) -> Result<Vec<Station>, WeatherError> {
        let url = format!(
            "{}/gridpoints/{}/{},{}/stations",
            self.base_url,
            urlencoding::encode(grid_id),
            x,
            y
        );
        let raw = self.get_geo_json("stations", &url).await?;
        Ok(map_stations(validate_stations(&raw)?))
    }

    /// Latest observation reported by a station.
    #[instrument(skip(self), level = "info")]
    pub async fn get_latest_observation(
        &self,
        station_id: &str,
    ) -> Result<Observation, WeatherError> {
        let url = format!(
            "{}/stations/{}/observations/latest",
            self.base_url,
            urlencoding::encode(station_id)
        );
        let raw = self.get_geo_json("observation", &url).await?;
        Ok(map_observation(validate_observation(&raw)?))
    }

    /// Forecast periods from a gridpoint forecast URL (as handed out by
    /// [`get_location_by_point`]).
    #[instrument(skip(self), level = "info")]
    pub async fn get_forecast_by_url(
        &self,
        forecast_url: &str,
    ) -> Result<Vec<ForecastDay>, WeatherError> {
        let raw = self.get_geo_json("forecast", forecast_url).await?;
        Ok(map_forecast(validate_forecast(&raw)?))
    }

    /// Active alerts covering a coordinate pair.
    #[instrument(skip(self), level = "info")]
    pub async fn get_active_alerts(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<Vec<Hazard>, WeatherError> {
        let url = format!("{}/alerts/active?point={:.4},{:.4}", self.base_url, lat, lon);
        let raw = self.get_geo_json("alerts", &url).await?;
        Ok(map_alerts(validate_alerts(&raw)?))
    }

    /// Fetch one endpoint and return the raw JSON body. Non-success
    /// statuses become API errors; an undecodable body is a validation
    /// failure, since the payload never reached a trusted shape.
    async fn get_geo_json(&self, what: &str, url: &str) -> Result<Value, WeatherError> {
        tracing::debug!("fetching {}: {}", what, url);

        let request = self.client.get(url).header(reqwest::header::ACCEPT, GEO_JSON);
        let response = fetch_with_retry(request, &self.retry).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::api(
                format!("{} request failed: {}", what, status),
                Some(status.as_u16()),
            ));
        }

        response.json::<Value>().await.map_err(|e| {
            WeatherError::validation(
                format!("{} response body is not valid JSON: {}", what, e),
                vec![],
            )
        })
    }
}

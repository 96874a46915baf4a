//! Wire DTOs for the NWS API and the domain models mapped from them.
//!
//! DTO types mirror the on-the-wire shapes and are only ever produced by the
//! schema validators; domain types are the stable representation everything
//! else consumes.

use serde::{Deserialize, Serialize};

// ── Wire DTOs ─────────────────────────────────────────────────────────

/// Response from `/points/{lat},{lon}`.
#[derive(Debug, Deserialize)]
pub struct PointsResponse {
    pub properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsProperties {
    pub forecast: String,
    pub forecast_hourly: String,
    pub observation_stations: String,
    pub grid_id: String,
    pub grid_x: u32,
    pub grid_y: u32,
}

/// Response from a gridpoint `/forecast` URL.
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
pub struct ForecastProperties {
    pub periods: Vec<ForecastPeriodDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriodDto {
    pub name: String,
    pub start_time: String,
    pub is_daytime: bool,
    pub temperature: f64,
    pub short_forecast: String,
    #[serde(default)]
    pub detailed_forecast: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Response from `/gridpoints/{wfo}/{x},{y}/stations`.
#[derive(Debug, Deserialize)]
pub struct StationsResponse {
    pub features: Vec<StationFeature>,
}

#[derive(Debug, Deserialize)]
pub struct StationFeature {
    pub properties: StationProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationProperties {
    pub station_identifier: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Response from `/stations/{id}/observations/latest`.
#[derive(Debug, Deserialize)]
pub struct ObservationResponse {
    pub properties: ObservationProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationProperties {
    #[serde(default)]
    pub temperature: Option<Measurement>,
    #[serde(default)]
    pub text_description: Option<String>,
    #[serde(default)]
    pub relative_humidity: Option<Measurement>,
    #[serde(default)]
    pub dewpoint: Option<Measurement>,
    #[serde(default)]
    pub visibility: Option<Measurement>,
    #[serde(default)]
    pub wind_chill: Option<Measurement>,
    #[serde(default)]
    pub wind_direction: Option<Measurement>,
    #[serde(default)]
    pub wind_speed: Option<Measurement>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Quantitative value wrapper used by NWS observation fields; the `value`
/// is null when the station did not report the measurement.
#[derive(Debug, Deserialize)]
pub struct Measurement {
    #[serde(default)]
    pub value: Option<f64>,
}

/// Response from `/alerts/active?point={lat},{lon}`.
#[derive(Debug, Deserialize)]
pub struct AlertsResponse {
    pub features: Vec<AlertFeature>,
}

#[derive(Debug, Deserialize)]
pub struct AlertFeature {
    pub properties: AlertProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertProperties {
    pub headline: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub urgency: Option<String>,
    #[serde(default)]
    pub certainty: Option<String>,
    #[serde(default)]
    pub area_desc: Option<String>,
}

// ── Domain models ─────────────────────────────────────────────────────

/// Grid metadata resolved for a coordinate pair, including the follow-up
/// URLs the API hands out for forecasts and stations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationInfo {
    pub forecast_url: String,
    pub forecast_hourly_url: String,
    pub observation_stations_url: String,
    pub grid_id: String,
    pub grid_x: u32,
    pub grid_y: u32,
}

/// An observation station. `name` falls back to the identifier when the
/// upstream record has no usable display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub id: String,
    pub name: String,
}

/// Latest conditions from one station. Measurements the station did not
/// report are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Observation {
    pub temperature_c: Option<f64>,
    pub text_description: Option<String>,
    pub relative_humidity: Option<f64>,
    pub dewpoint_c: Option<f64>,
    pub visibility_m: Option<f64>,
    pub wind_chill_c: Option<f64>,
    pub wind_direction_deg: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
    pub icon: Option<String>,
    /// ISO-8601 observation time, format-checked during validation.
    pub timestamp: Option<String>,
}

/// One named forecast period ("Tonight", "Thursday", ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastDay {
    pub day_name: String,
    /// ISO-8601 period start, format-checked during validation.
    pub start_time: String,
    pub is_daytime: bool,
    pub temperature: f64,
    pub short_forecast: String,
    pub detailed_forecast: Option<String>,
    pub icon: Option<String>,
}

/// An active weather alert for a location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hazard {
    pub headline: String,
    pub description: Option<String>,
    pub severity: Option<String>,
    pub urgency: Option<String>,
    pub certainty: Option<String>,
    pub areas: Option<String>,
}

//! Pure mappers from validated DTOs to domain models.
//!
//! One function per domain type. Each accepts only a validator's output,
//! is total over it (absent-or-null upstream fields map to explicit `None`
//! sentinels), and consults no external state.

use crate::types::{
    AlertsResponse, ForecastDay, ForecastResponse, Hazard, LocationInfo, Measurement,
    Observation, ObservationResponse, PointsResponse, Station, StationsResponse,
};

pub fn map_points(dto: PointsResponse) -> LocationInfo {
    let p = dto.properties;
    LocationInfo {
        forecast_url: p.forecast,
        forecast_hourly_url: p.forecast_hourly,
        observation_stations_url: p.observation_stations,
        grid_id: p.grid_id,
        grid_x: p.grid_x,
        grid_y: p.grid_y,
    }
}

pub fn map_stations(dto: StationsResponse) -> Vec<Station> {
    dto.features
        .into_iter()
        .map(|feature| {
            let p = feature.properties;
            let id = p.station_identifier;
            // Empty display names fall back to the identifier too
            let name = p.name.filter(|n| !n.is_empty()).unwrap_or_else(|| id.clone());
            Station { id, name }
        })
        .collect()
}

pub fn map_observation(dto: ObservationResponse) -> Observation {
    let p = dto.properties;
    Observation {
        temperature_c: reading(p.temperature),
        text_description: p.text_description,
        relative_humidity: reading(p.relative_humidity),
        dewpoint_c: reading(p.dewpoint),
        visibility_m: reading(p.visibility),
        wind_chill_c: reading(p.wind_chill),
        wind_direction_deg: reading(p.wind_direction),
        wind_speed_kmh: reading(p.wind_speed),
        icon: p.icon,
        timestamp: p.timestamp,
    }
}

pub fn map_forecast(dto: ForecastResponse) -> Vec<ForecastDay> {
    dto.properties
        .periods
        .into_iter()
        .map(|period| ForecastDay {
            day_name: period.name,
            start_time: period.start_time,
            is_daytime: period.is_daytime,
            temperature: period.temperature,
            short_forecast: period.short_forecast,
            detailed_forecast: period.detailed_forecast,
            icon: period.icon,
        })
        .collect()
}

pub fn map_alerts(dto: AlertsResponse) -> Vec<Hazard> {
    dto.features
        .into_iter()
        .map(|feature| {
            let p = feature.properties;
            Hazard {
                headline: p.headline,
                description: p.description,
                severity: p.severity,
                urgency: p.urgency,
                certainty: p.certainty,
                areas: p.area_desc,
            }
        })
        .collect()
}

/// A measurement that is absent, or present with a null value, reads as
/// "not reported".
fn reading(measurement: Option<Measurement>) -> Option<f64> {
    measurement.and_then(|m| m.value)
}

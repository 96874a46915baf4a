//! Structural validation of raw NWS payloads.
//!
//! Each endpoint family has an explicit schema description (field names,
//! constraints, optionality) covering only the fields we use. One generic
//! routine walks the raw JSON against the schema and collects every
//! violation with its full field path before anything is deserialized into
//! a typed DTO. Unknown fields are ignored, so additive upstream changes
//! pass. Validation performs no I/O and never mutates its input.

use chrono::DateTime;
use serde_json::Value;
use url::Url;

use wxvane_core::{ValidationIssue, WeatherError};

use crate::types::{
    AlertsResponse, ForecastResponse, ObservationResponse, PointsResponse, StationsResponse,
};

/// Closed CAP value sets for alert classification fields.
const ALERT_SEVERITIES: &[&str] = &["Extreme", "Severe", "Moderate", "Minor", "Unknown"];
const ALERT_URGENCIES: &[&str] = &["Immediate", "Expected", "Future", "Past", "Unknown"];
const ALERT_CERTAINTIES: &[&str] = &["Observed", "Likely", "Possible", "Unlikely", "Unknown"];

/// A single field constraint, described as data so the schema itself is the
/// artifact rather than any validation library's API.
#[derive(Debug)]
enum Constraint {
    String,
    /// String parseable as an absolute URL.
    UrlString,
    /// String in ISO-8601 / RFC 3339 format.
    Timestamp,
    Bool,
    Number { min: Option<f64>, max: Option<f64> },
    /// Whole number, optionally bounded below.
    Integer { min: Option<i64> },
    /// String restricted to a closed value set.
    OneOf(&'static [&'static str]),
    /// NWS quantitative value: an object whose `value` is a number or null.
    Measurement,
    Object(&'static [FieldSpec]),
    /// Array of objects, each checked against the element schema.
    Array(&'static [FieldSpec]),
}

#[derive(Debug)]
struct FieldSpec {
    name: &'static str,
    constraint: Constraint,
    required: bool,
    /// Whether an explicit `null` is acceptable for this field.
    nullable: bool,
}

impl FieldSpec {
    const fn required(name: &'static str, constraint: Constraint) -> Self {
        Self {
            name,
            constraint,
            required: true,
            nullable: false,
        }
    }

    const fn optional(name: &'static str, constraint: Constraint) -> Self {
        Self {
            name,
            constraint,
            required: false,
            nullable: false,
        }
    }

    const fn optional_nullable(name: &'static str, constraint: Constraint) -> Self {
        Self {
            name,
            constraint,
            required: false,
            nullable: true,
        }
    }
}

// ── Per-endpoint schemas ──────────────────────────────────────────────

const POINTS: &[FieldSpec] = &[FieldSpec::required(
    "properties",
    Constraint::Object(&[
        FieldSpec::required("forecast", Constraint::UrlString),
        FieldSpec::required("forecastHourly", Constraint::UrlString),
        FieldSpec::required("observationStations", Constraint::UrlString),
        FieldSpec::required("gridId", Constraint::String),
        FieldSpec::required("gridX", Constraint::Integer { min: Some(0) }),
        FieldSpec::required("gridY", Constraint::Integer { min: Some(0) }),
    ]),
)];

const FORECAST: &[FieldSpec] = &[FieldSpec::required(
    "properties",
    Constraint::Object(&[FieldSpec::required(
        "periods",
        Constraint::Array(&[
            FieldSpec::required("name", Constraint::String),
            FieldSpec::required("startTime", Constraint::Timestamp),
            FieldSpec::required("isDaytime", Constraint::Bool),
            FieldSpec::required("temperature", Constraint::Number { min: None, max: None }),
            FieldSpec::required("shortForecast", Constraint::String),
            FieldSpec::optional("detailedForecast", Constraint::String),
            FieldSpec::optional_nullable("icon", Constraint::String),
        ]),
    )]),
)];

const STATIONS: &[FieldSpec] = &[FieldSpec::required(
    "features",
    Constraint::Array(&[FieldSpec::required(
        "properties",
        Constraint::Object(&[
            FieldSpec::required("stationIdentifier", Constraint::String),
            FieldSpec::optional("name", Constraint::String),
        ]),
    )]),
)];

const OBSERVATION: &[FieldSpec] = &[FieldSpec::required(
    "properties",
    Constraint::Object(&[
        FieldSpec::optional("temperature", Constraint::Measurement),
        FieldSpec::optional_nullable("textDescription", Constraint::String),
        FieldSpec::optional("relativeHumidity", Constraint::Measurement),
        FieldSpec::optional("dewpoint", Constraint::Measurement),
        FieldSpec::optional("visibility", Constraint::Measurement),
        FieldSpec::optional("windChill", Constraint::Measurement),
        FieldSpec::optional("windDirection", Constraint::Measurement),
        FieldSpec::optional("windSpeed", Constraint::Measurement),
        FieldSpec::optional_nullable("icon", Constraint::String),
        FieldSpec::optional_nullable("timestamp", Constraint::Timestamp),
    ]),
)];

const ALERTS: &[FieldSpec] = &[FieldSpec::required(
    "features",
    Constraint::Array(&[FieldSpec::required(
        "properties",
        Constraint::Object(&[
            FieldSpec::required("headline", Constraint::String),
            FieldSpec::optional("description", Constraint::String),
            FieldSpec::optional("severity", Constraint::OneOf(ALERT_SEVERITIES)),
            FieldSpec::optional("urgency", Constraint::OneOf(ALERT_URGENCIES)),
            FieldSpec::optional("certainty", Constraint::OneOf(ALERT_CERTAINTIES)),
            FieldSpec::optional("areaDesc", Constraint::String),
        ]),
    )]),
)];

// ── Generic evaluation ────────────────────────────────────────────────

fn issue(field: &str, message: impl Into<String>) -> ValidationIssue {
    ValidationIssue {
        field: field.to_string(),
        message: message.into(),
    }
}

fn check_object(fields: &[FieldSpec], value: &Value, path: &str, issues: &mut Vec<ValidationIssue>) {
    let Some(map) = value.as_object() else {
        issues.push(issue(path, "expected an object"));
        return;
    };

    for spec in fields {
        let field_path = if path.is_empty() {
            spec.name.to_string()
        } else {
            format!("{}.{}", path, spec.name)
        };

        match map.get(spec.name) {
            None => {
                if spec.required {
                    issues.push(issue(&field_path, "required field is missing"));
                }
            }
            Some(Value::Null) => {
                if !spec.nullable {
                    issues.push(issue(&field_path, "must not be null"));
                }
            }
            Some(found) => check_constraint(&spec.constraint, found, &field_path, issues),
        }
    }
}

fn check_constraint(
    constraint: &Constraint,
    value: &Value,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    match constraint {
        Constraint::String => {
            if !value.is_string() {
                issues.push(issue(path, "expected a string"));
            }
        }
        Constraint::UrlString => match value.as_str() {
            None => issues.push(issue(path, "expected a string")),
            Some(s) if Url::parse(s).is_err() => issues.push(issue(path, "not a valid URL")),
            Some(_) => {}
        },
        Constraint::Timestamp => match value.as_str() {
            None => issues.push(issue(path, "expected a string")),
            Some(s) if DateTime::parse_from_rfc3339(s).is_err() => {
                issues.push(issue(path, "not an ISO-8601 timestamp"));
            }
            Some(_) => {}
        },
        Constraint::Bool => {
            if !value.is_boolean() {
                issues.push(issue(path, "expected a boolean"));
            }
        }
        Constraint::Number { min, max } => match value.as_f64() {
            None => issues.push(issue(path, "expected a number")),
            Some(n) => {
                if let Some(min) = min {
                    if n < *min {
                        issues.push(issue(path, format!("below the minimum of {}", min)));
                    }
                }
                if let Some(max) = max {
                    if n > *max {
                        issues.push(issue(path, format!("above the maximum of {}", max)));
                    }
                }
            }
        },
        Constraint::Integer { min } => match value.as_i64() {
            None => issues.push(issue(path, "expected an integer")),
            Some(n) => {
                if let Some(min) = min {
                    if n < *min {
                        issues.push(issue(path, format!("must be at least {}", min)));
                    }
                }
            }
        },
        Constraint::OneOf(allowed) => match value.as_str() {
            None => issues.push(issue(path, "expected a string")),
            Some(s) if !allowed.contains(&s) => {
                issues.push(issue(path, format!("unexpected value \"{}\"", s)));
            }
            Some(_) => {}
        },
        Constraint::Measurement => {
            let Some(map) = value.as_object() else {
                issues.push(issue(path, "expected an object"));
                return;
            };
            if let Some(v) = map.get("value") {
                if !v.is_null() && v.as_f64().is_none() {
                    issues.push(issue(&format!("{}.value", path), "expected a number or null"));
                }
            }
        }
        Constraint::Object(fields) => check_object(fields, value, path, issues),
        Constraint::Array(fields) => {
            let Some(items) = value.as_array() else {
                issues.push(issue(path, "expected an array"));
                return;
            };
            for (index, item) in items.iter().enumerate() {
                check_object(fields, item, &format!("{}[{}]", path, index), issues);
            }
        }
    }
}

fn validate<T: serde::de::DeserializeOwned>(
    what: &str,
    schema: &[FieldSpec],
    raw: &Value,
) -> Result<T, WeatherError> {
    let mut issues = Vec::new();
    check_object(schema, raw, "", &mut issues);

    if !issues.is_empty() {
        tracing::debug!("{} validation failed with {} issue(s)", what, issues.len());
        return Err(WeatherError::validation(
            format!("invalid {} response", what),
            issues,
        ));
    }

    serde_json::from_value(raw.clone()).map_err(|e| {
        WeatherError::validation(format!("invalid {} response: {}", what, e), vec![])
    })
}

// ── Per-endpoint entry points ─────────────────────────────────────────

pub fn validate_points(raw: &Value) -> Result<PointsResponse, WeatherError> {
    validate("points", POINTS, raw)
}

pub fn validate_forecast(raw: &Value) -> Result<ForecastResponse, WeatherError> {
    validate("forecast", FORECAST, raw)
}

pub fn validate_stations(raw: &Value) -> Result<StationsResponse, WeatherError> {
    validate("stations", STATIONS, raw)
}

pub fn validate_observation(raw: &Value) -> Result<ObservationResponse, WeatherError> {
    validate("observation", OBSERVATION, raw)
}

pub fn validate_alerts(raw: &Value) -> Result<AlertsResponse, WeatherError> {
    validate("alerts", ALERTS, raw)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use serde_json::json;

    fn valid_points() -> Value {
        json!({
            "properties": {
                "forecast": "https://api.weather.gov/gridpoints/BOX/64,77/forecast",
                "forecastHourly": "https://api.weather.gov/gridpoints/BOX/64,77/forecast/hourly",
                "observationStations": "https://api.weather.gov/gridpoints/BOX/64,77/stations",
                "gridId": "BOX",
                "gridX": 64,
                "gridY": 77
            }
        })
    }

    #[test]
    fn test_points_accepts_valid_response() {
        let dto = validate_points(&valid_points()).unwrap();
        assert_eq!(dto.properties.grid_id, "BOX");
        assert_eq!(dto.properties.grid_x, 64);
    }

    #[test]
    fn test_points_rejects_invalid_url() {
        let mut raw = valid_points();
        raw["properties"]["forecast"] = json!("not-a-url");

        let err = validate_points(&raw).unwrap_err();
        match err {
            WeatherError::Validation { issues, .. } => {
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].field, "properties.forecast");
                assert_eq!(issues[0].message, "not a valid URL");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_points_rejects_negative_grid_coordinate() {
        let mut raw = valid_points();
        raw["properties"]["gridX"] = json!(-1);

        let err = validate_points(&raw).unwrap_err();
        match err {
            WeatherError::Validation { issues, .. } => {
                assert_eq!(issues[0].field, "properties.gridX");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_points_rejects_missing_properties() {
        let err = validate_points(&json!({})).unwrap_err();
        assert!(!err.retryable());
        match err {
            WeatherError::Validation { issues, .. } => {
                assert_eq!(issues[0].field, "properties");
                assert_eq!(issues[0].message, "required field is missing");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_forecast_accepts_minimal_period() {
        let raw = json!({
            "properties": {
                "periods": [{
                    "name": "Today",
                    "startTime": "2025-10-02T12:00:00-04:00",
                    "isDaytime": true,
                    "temperature": 72,
                    "shortForecast": "Partly Cloudy"
                }]
            }
        });

        let dto = validate_forecast(&raw).unwrap();
        assert_eq!(dto.properties.periods.len(), 1);
        assert_eq!(dto.properties.periods[0].name, "Today");
        assert_eq!(dto.properties.periods[0].detailed_forecast, None);
    }

    #[test]
    fn test_forecast_rejects_missing_periods() {
        let err = validate_forecast(&json!({"properties": {}})).unwrap_err();
        match err {
            WeatherError::Validation { issues, .. } => {
                assert_eq!(issues[0].field, "properties.periods");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_forecast_rejects_bad_start_time() {
        let raw = json!({
            "properties": {
                "periods": [{
                    "name": "Today",
                    "startTime": "next tuesday",
                    "isDaytime": true,
                    "temperature": 72,
                    "shortForecast": "Sunny"
                }]
            }
        });

        let err = validate_forecast(&raw).unwrap_err();
        match err {
            WeatherError::Validation { issues, .. } => {
                assert_eq!(issues[0].field, "properties.periods[0].startTime");
                assert_eq!(issues[0].message, "not an ISO-8601 timestamp");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_stations_accepts_optional_name() {
        let raw = json!({
            "features": [
                {"properties": {"stationIdentifier": "KBOS", "name": "Boston Logan"}},
                {"properties": {"stationIdentifier": "KPWM"}}
            ]
        });

        let dto = validate_stations(&raw).unwrap();
        assert_eq!(dto.features.len(), 2);
        assert_eq!(dto.features[1].properties.name, None);
    }

    #[test]
    fn test_stations_reports_indexed_paths() {
        let raw = json!({
            "features": [
                {"properties": {"stationIdentifier": "KBOS"}},
                {"properties": {}}
            ]
        });

        let err = validate_stations(&raw).unwrap_err();
        match err {
            WeatherError::Validation { issues, .. } => {
                assert_eq!(issues[0].field, "features[1].properties.stationIdentifier");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_observation_accepts_null_measurements() {
        let raw = json!({
            "properties": {
                "temperature": {"value": null},
                "textDescription": null,
                "relativeHumidity": {"value": 65}
            }
        });

        let dto = validate_observation(&raw).unwrap();
        assert!(dto.properties.temperature.unwrap().value.is_none());
        assert_eq!(dto.properties.text_description, None);
    }

    #[test]
    fn test_observation_accepts_empty_properties() {
        let dto = validate_observation(&json!({"properties": {}})).unwrap();
        assert!(dto.properties.temperature.is_none());
    }

    #[test]
    fn test_observation_rejects_non_numeric_measurement() {
        let raw = json!({
            "properties": {
                "temperature": {"value": "warm"}
            }
        });

        let err = validate_observation(&raw).unwrap_err();
        match err {
            WeatherError::Validation { issues, .. } => {
                assert_eq!(issues[0].field, "properties.temperature.value");
                assert_eq!(issues[0].message, "expected a number or null");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_observation_rejects_bad_timestamp() {
        let raw = json!({
            "properties": {
                "timestamp": "yesterday-ish"
            }
        });

        assert!(validate_observation(&raw).is_err());
    }

    #[test]
    fn test_alerts_accepts_known_classifications() {
        let raw = json!({
            "features": [{
                "properties": {
                    "headline": "Winter Storm Warning",
                    "severity": "Severe",
                    "urgency": "Expected",
                    "certainty": "Likely",
                    "areaDesc": "Suffolk County"
                }
            }]
        });

        let dto = validate_alerts(&raw).unwrap();
        assert_eq!(dto.features[0].properties.severity.as_deref(), Some("Severe"));
    }

    #[test]
    fn test_alerts_rejects_unknown_severity() {
        let raw = json!({
            "features": [{
                "properties": {
                    "headline": "Something",
                    "severity": "Apocalyptic"
                }
            }]
        });

        let err = validate_alerts(&raw).unwrap_err();
        match err {
            WeatherError::Validation { issues, .. } => {
                assert_eq!(issues[0].field, "features[0].properties.severity");
                assert!(issues[0].message.contains("Apocalyptic"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let mut raw = valid_points();
        raw["properties"]["cwa"] = json!("BOX");
        raw["@context"] = json!(["https://geojson.org/geojson-ld/geojson-context.jsonld"]);

        assert!(validate_points(&raw).is_ok());
    }

    #[test]
    fn test_multiple_issues_collected_in_one_pass() {
        let raw = json!({
            "properties": {
                "forecast": "not-a-url",
                "forecastHourly": 7,
                "observationStations": "https://api.weather.gov/stations",
                "gridId": "BOX",
                "gridX": 64
            }
        });

        let err = validate_points(&raw).unwrap_err();
        match err {
            WeatherError::Validation { issues, .. } => {
                // bad URL, wrong type, missing gridY
                assert_eq!(issues.len(), 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_number_bounds() {
        let schema: &[FieldSpec] = &[FieldSpec::required(
            "value",
            Constraint::Number {
                min: Some(0.0),
                max: Some(100.0),
            },
        )];

        let mut issues = Vec::new();
        check_object(schema, &json!({"value": -3.5}), "", &mut issues);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("minimum"));

        issues.clear();
        check_object(schema, &json!({"value": 130.0}), "", &mut issues);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("maximum"));

        issues.clear();
        check_object(schema, &json!({"value": 55.0}), "", &mut issues);
        assert!(issues.is_empty());
    }
}

use anyhow::Result;
use clap::{Parser, Subcommand};

use wxvane_core::{ErrorKind, LoaderResult, ValidationIssue, WeatherError};
use wxvane_nws::{ForecastDay, Hazard, NwsClient, SnapshotCache, WeatherSnapshot};

use crate::loaders::{load_alerts, load_alerts_or_empty, load_current_conditions, load_forecast};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "wxvane", version, about = "National Weather Service client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current conditions for a location.
    Current {
        /// Coordinates as "lat,lon", e.g. "42.3601,-71.0589".
        coords: String,
    },

    /// Show the local forecast.
    Forecast {
        /// Coordinates as "lat,lon".
        coords: String,
    },

    /// Show active weather alerts.
    Alerts {
        /// Coordinates as "lat,lon".
        coords: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let client = NwsClient::new().map_err(report)?;

        match self.command {
            Command::Current { coords } => {
                let (lat, lon) = parse_coords(&coords).map_err(report)?;
                let cache = SnapshotCache::new();
                let result = load_current_conditions(&client, &cache, lat, lon).await;
                // Alerts augment the view; their failure must not block it
                let hazards = load_alerts_or_empty(&client, lat, lon).await;
                finish(result, |snapshot| {
                    print_current(snapshot);
                    print_hazard_summary(&hazards);
                })
            }
            Command::Forecast { coords } => {
                let (lat, lon) = parse_coords(&coords).map_err(report)?;
                let result = load_forecast(&client, lat, lon).await;
                finish(result, |days| print_forecast(days))
            }
            Command::Alerts { coords } => {
                let (lat, lon) = parse_coords(&coords).map_err(report)?;
                let result = load_alerts(&client, lat, lon).await;
                finish(result, |hazards| print_alerts(hazards))
            }
        }
    }
}

/// Parse and range-check a "lat,lon" argument.
pub fn parse_coords(raw: &str) -> Result<(f64, f64), WeatherError> {
    let mut parts = raw.split(',');
    let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid_coords("coords", "expected \"lat,lon\""));
    };

    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| invalid_coords("lat", "must be a valid number"))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| invalid_coords("lon", "must be a valid number"))?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err(invalid_coords("lat", "must be between -90 and 90"));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(invalid_coords("lon", "must be between -180 and 180"));
    }

    Ok((lat, lon))
}

fn invalid_coords(field: &str, message: &str) -> WeatherError {
    WeatherError::validation(
        format!("invalid coordinates: {} {}", field, message),
        vec![ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
        }],
    )
}

fn finish<T>(result: LoaderResult<T>, render: impl FnOnce(&T)) -> Result<()> {
    match result.into_result() {
        Ok(data) => {
            render(&data);
            Ok(())
        }
        Err(error) => Err(report(error)),
    }
}

/// Print a user-facing line for the failure, then hand it back for the
/// process exit status. How an error reads to the user depends only on its
/// kind and status.
fn report(error: WeatherError) -> anyhow::Error {
    eprintln!("{}", user_message(&error));
    error.into()
}

fn user_message(error: &WeatherError) -> &'static str {
    match error.kind() {
        ErrorKind::Validation => "Invalid input or malformed weather data. Check the coordinates and try again.",
        ErrorKind::Timeout => "The weather service took too long to respond. Please try again.",
        ErrorKind::Network => "Unable to reach the weather service. Check your connection.",
        ErrorKind::Api => match error.status_code() {
            Some(code) if code >= 500 => "The weather service is having issues. Please try again later.",
            _ => "The weather service rejected the request.",
        },
        ErrorKind::Unknown => "An unexpected error occurred. Please try again.",
    }
}

fn print_current(snapshot: &WeatherSnapshot) {
    let Some(station) = &snapshot.station else {
        println!("No observation stations available for this location.");
        return;
    };
    println!("Station: {} ({})", station.name, station.id);

    let Some(observation) = &snapshot.observation else {
        println!("No recent observation available.");
        return;
    };
    if let Some(description) = &observation.text_description {
        println!("Conditions: {}", description);
    }
    if let Some(t) = observation.temperature_c {
        println!("Temperature: {:.1} C", t);
    }
    if let Some(h) = observation.relative_humidity {
        println!("Humidity: {:.0}%", h);
    }
    if let Some(d) = observation.dewpoint_c {
        println!("Dewpoint: {:.1} C", d);
    }
    if let Some(w) = observation.wind_speed_kmh {
        match observation.wind_direction_deg {
            Some(deg) => println!("Wind: {:.0} km/h from {:.0} degrees", w, deg),
            None => println!("Wind: {:.0} km/h", w),
        }
    }
    if let Some(v) = observation.visibility_m {
        println!("Visibility: {:.1} km", v / 1000.0);
    }
    if let Some(ts) = &observation.timestamp {
        println!("Observed at: {}", ts);
    }
}

fn print_hazard_summary(hazards: &[Hazard]) {
    if hazards.is_empty() {
        return;
    }
    println!("Active alerts:");
    for hazard in hazards {
        println!("  {}", hazard.headline);
    }
}

fn print_forecast(days: &[ForecastDay]) {
    if days.is_empty() {
        println!("No forecast periods available.");
        return;
    }
    for day in days {
        println!("{}: {}. {}", day.day_name, day.temperature, day.short_forecast);
        if let Some(detail) = &day.detailed_forecast {
            println!("  {}", detail);
        }
    }
}

fn print_alerts(hazards: &[Hazard]) {
    if hazards.is_empty() {
        println!("No active alerts.");
        return;
    }
    for hazard in hazards {
        println!("{}", hazard.headline);
        if let Some(severity) = &hazard.severity {
            println!("  Severity: {}", severity);
        }
        if let Some(areas) = &hazard.areas {
            println!("  Areas: {}", areas);
        }
    }
}

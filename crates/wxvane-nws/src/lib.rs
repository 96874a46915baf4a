//! Resilient National Weather Service API client.
//!
//! Fetches point metadata, stations, observations, forecasts, and active
//! alerts from `api.weather.gov`, with retry/backoff/timeout on every
//! request, structural validation of every payload before it is trusted,
//! and mapping into stable domain models. Responses can be cached with a
//! TTL keyed by normalized coordinates.

pub mod cache;
pub mod client;
pub mod http;
pub mod mapper;
pub mod schema;
pub mod snapshot;
pub mod types;

pub use cache::{CacheMetadata, TtlCache};
pub use client::NwsClient;
pub use snapshot::{SnapshotCache, WeatherSnapshot, SNAPSHOT_TTL};
pub use types::{ForecastDay, Hazard, LocationInfo, Observation, Station};

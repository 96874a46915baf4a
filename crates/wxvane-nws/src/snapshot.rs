//! Coordinate-keyed cache of the latest station/observation pair.
//!
//! Keys derive from the normalized coordinate pair, never from full request
//! URLs, so the same location always hits the same entry regardless of how
//! the request was phrased.

use std::time::Duration;

use serde::Serialize;

use crate::cache::{format_age, format_remaining, CacheMetadata, TtlCache};
use crate::types::{Observation, Station};

/// Observation data cached per location.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WeatherSnapshot {
    pub station: Option<Station>,
    pub observation: Option<Observation>,
}

/// Observations refresh upstream every few minutes; five is conservative.
pub const SNAPSHOT_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug)]
pub struct SnapshotCache {
    cache: TtlCache<WeatherSnapshot>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::with_ttl(SNAPSHOT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            cache: TtlCache::new(ttl),
        }
    }

    /// Cache key for a coordinate pair, normalized to 4 decimal places.
    pub fn cache_key(lat: f64, lon: f64) -> String {
        format!("weather:{:.4},{:.4}", lat, lon)
    }

    pub fn get(&self, lat: f64, lon: f64) -> Option<WeatherSnapshot> {
        let key = Self::cache_key(lat, lon);
        let snapshot = self.cache.get(&key);

        match &snapshot {
            Some(_) => {
                if let Some(meta) = self.cache.metadata(&key) {
                    tracing::debug!(
                        "cache hit for {} (age {}, {} remaining)",
                        key,
                        format_age(meta.age),
                        format_remaining(meta.remaining)
                    );
                }
            }
            None => tracing::debug!("cache miss for {}", key),
        }

        snapshot
    }

    pub fn set(&self, lat: f64, lon: f64, snapshot: WeatherSnapshot) {
        let key = Self::cache_key(lat, lon);
        tracing::debug!("cache set for {}", key);
        self.cache.set(key, snapshot);
    }

    pub fn invalidate(&self, lat: f64, lon: f64) {
        let key = Self::cache_key(lat, lon);
        tracing::debug!("cache invalidated for {}", key);
        self.cache.invalidate(&key);
    }

    pub fn clear(&self) {
        tracing::debug!("cache cleared");
        self.cache.clear();
    }

    pub fn metadata(&self, lat: f64, lon: f64) -> Option<CacheMetadata> {
        self.cache.metadata(&Self::cache_key(lat, lon))
    }

    /// Drop every expired entry; meant to run on a fixed interval.
    pub fn cleanup(&self) -> usize {
        let removed = self.cache.cleanup();
        if removed > 0 {
            tracing::debug!("cache cleanup removed {} expired entries", removed);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new()
    }
}

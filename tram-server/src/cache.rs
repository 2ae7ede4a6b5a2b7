//! Caching layer for transit API responses.
//!
//! The tram station list barely changes, so it is kept for a day. Waiting
//! times and timetables move quickly but are queried repeatedly within a
//! conversation (the user asks, then asks again for the other direction), so
//! they are kept for a few seconds.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::{Coordinates, Departure, Direction, NearbyStation, ScheduleEntry, Station};
use crate::tan::{TanError, TransitClient};

/// Cache key for timetables: (station code, line, direction).
type ScheduleKey = (String, String, Direction);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for the tram station list.
    pub stations_ttl: Duration,

    /// TTL for waiting-time boards and timetables.
    pub board_ttl: Duration,

    /// Maximum number of cached boards and timetables (each).
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stations_ttl: Duration::from_secs(24 * 60 * 60),
            board_ttl: Duration::from_secs(30),
            max_capacity: 1000,
        }
    }
}

/// Transit client with caching.
///
/// Wraps any [`TransitClient`]. Proximity searches pass straight through:
/// they are keyed by a coordinate and rarely repeat.
pub struct CachedTransit {
    inner: Arc<dyn TransitClient>,

    /// Single-entry cache for the station list.
    stations: MokaCache<(), Arc<Vec<Station>>>,

    /// Waiting-time boards, keyed by station code.
    boards: MokaCache<String, Arc<Vec<Departure>>>,

    schedules: MokaCache<ScheduleKey, Arc<Vec<ScheduleEntry>>>,
}

impl CachedTransit {
    /// Create a new cached client.
    pub fn new(inner: Arc<dyn TransitClient>, config: &CacheConfig) -> Self {
        Self {
            inner,
            stations: MokaCache::builder()
                .time_to_live(config.stations_ttl)
                .build(),
            boards: MokaCache::builder()
                .time_to_live(config.board_ttl)
                .max_capacity(config.max_capacity)
                .build(),
            schedules: MokaCache::builder()
                .time_to_live(config.board_ttl)
                .max_capacity(config.max_capacity)
                .build(),
        }
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.stations.invalidate_all();
        self.boards.invalidate_all();
        self.schedules.invalidate_all();
    }
}

#[async_trait]
impl TransitClient for CachedTransit {
    async fn tram_stations(&self) -> Result<Vec<Station>, TanError> {
        if let Some(cached) = self.stations.get(&()).await {
            return Ok(cached.as_ref().clone());
        }

        let stations = self.inner.tram_stations().await?;
        debug!(count = stations.len(), "caching tram station list");

        // Empty lists are never cached
        if !stations.is_empty() {
            self.stations.insert((), Arc::new(stations.clone())).await;
        }
        Ok(stations)
    }

    async fn wait_times(&self, station: &Station) -> Result<Vec<Departure>, TanError> {
        if let Some(cached) = self.boards.get(&station.code).await {
            return Ok(cached.as_ref().clone());
        }

        let departures = self.inner.wait_times(station).await?;
        if !departures.is_empty() {
            self.boards
                .insert(station.code.clone(), Arc::new(departures.clone()))
                .await;
        }
        Ok(departures)
    }

    async fn scheduled_times(
        &self,
        station: &Station,
        line: &str,
        direction: Direction,
    ) -> Result<Vec<ScheduleEntry>, TanError> {
        let key = (station.code.clone(), line.to_string(), direction);
        if let Some(cached) = self.schedules.get(&key).await {
            return Ok(cached.as_ref().clone());
        }

        let entries = self.inner.scheduled_times(station, line, direction).await?;
        if !entries.is_empty() {
            self.schedules.insert(key, Arc::new(entries.clone())).await;
        }
        Ok(entries)
    }

    async fn stations_near(&self, at: Coordinates) -> Result<Vec<NearbyStation>, TanError> {
        self.inner.stations_near(at).await
    }
}

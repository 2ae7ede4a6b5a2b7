//! The transit backend abstraction the assistant depends on.

use async_trait::async_trait;

use crate::domain::{Coordinates, Departure, Direction, NearbyStation, ScheduleEntry, Station};

use super::error::TanError;

/// Source of station, waiting-time and timetable data.
///
/// Implemented by the HTTP client, the fixture-backed mock, and the caching
/// wrapper. Every method may fail or return an empty list; callers treat both
/// as recoverable.
#[async_trait]
pub trait TransitClient: Send + Sync {
    /// All stop areas served by at least one tram line.
    async fn tram_stations(&self) -> Result<Vec<Station>, TanError>;

    /// Live departures from a station, in upstream order.
    async fn wait_times(&self, station: &Station) -> Result<Vec<Departure>, TanError>;

    /// Upcoming timetable slots at a station for one line and direction.
    async fn scheduled_times(
        &self,
        station: &Station,
        line: &str,
        direction: Direction,
    ) -> Result<Vec<ScheduleEntry>, TanError>;

    /// Stop areas within the service radius of a point, nearest first.
    async fn stations_near(&self, at: Coordinates) -> Result<Vec<NearbyStation>, TanError>;
}

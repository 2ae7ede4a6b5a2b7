//! In-memory transit backend for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Coordinates, Departure, Direction, NearbyStation, ScheduleEntry, Station};

use super::error::TanError;
use super::transit::TransitClient;

/// Transit backend holding canned data and counting every call.
#[derive(Debug, Default)]
pub struct FakeTransit {
    stations: Vec<Station>,
    waiting: HashMap<String, Vec<Departure>>,
    schedules: HashMap<(String, String, Direction), Vec<ScheduleEntry>>,
    nearby: Vec<NearbyStation>,
    failing: bool,
    call_count: Mutex<usize>,
}

impl FakeTransit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_station(mut self, station: Station) -> Self {
        self.stations.push(station);
        self
    }

    pub fn with_departures(mut self, code: &str, departures: Vec<Departure>) -> Self {
        self.waiting.insert(code.to_string(), departures);
        self
    }

    pub fn with_schedule(
        mut self,
        code: &str,
        line: &str,
        direction: Direction,
        entries: Vec<ScheduleEntry>,
    ) -> Self {
        self.schedules
            .insert((code.to_string(), line.to_string(), direction), entries);
        self
    }

    pub fn with_nearby(mut self, nearby: Vec<NearbyStation>) -> Self {
        self.nearby = nearby;
        self
    }

    /// Make every call fail with an upstream error.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    fn record(&self) -> Result<(), TanError> {
        *self.call_count.lock().unwrap() += 1;
        if self.failing {
            return Err(TanError::Api {
                status: 503,
                message: "unavailable".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl TransitClient for FakeTransit {
    async fn tram_stations(&self) -> Result<Vec<Station>, TanError> {
        self.record()?;
        Ok(self.stations.clone())
    }

    async fn wait_times(&self, station: &Station) -> Result<Vec<Departure>, TanError> {
        self.record()?;
        Ok(self.waiting.get(&station.code).cloned().unwrap_or_default())
    }

    async fn scheduled_times(
        &self,
        station: &Station,
        line: &str,
        direction: Direction,
    ) -> Result<Vec<ScheduleEntry>, TanError> {
        self.record()?;
        let key = (station.code.clone(), line.to_string(), direction);
        Ok(self.schedules.get(&key).cloned().unwrap_or_default())
    }

    async fn stations_near(&self, _at: Coordinates) -> Result<Vec<NearbyStation>, TanError> {
        self.record()?;
        Ok(self.nearby.clone())
    }
}

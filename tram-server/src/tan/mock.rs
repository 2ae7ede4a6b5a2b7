//! Mock TAN client for running without network access.
//!
//! Loads captured API responses from a directory and serves them as if they
//! were live. Layout:
//!
//! ```text
//! stations.json                       arrets.json listing (required)
//! nearby.json                         arrets.json/{lat}/{lng} result
//! tempsattente/{codeLieu}.json        waiting times per stop area
//! horaires/{codeLieu}_{ligne}_{sens}.json   timetable per line/direction
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::domain::{Coordinates, Departure, Direction, NearbyStation, ScheduleEntry, Station};

use super::convert::{convert_nearby, convert_schedule, convert_tram_stations, convert_waiting_times};
use super::error::TanError;
use super::transit::TransitClient;
use super::types::{ArretDto, HorairesArretDto, TempsAttenteDto};

/// Timetable key: (codeLieu, line number, direction).
type ScheduleKey = (String, String, Direction);

#[derive(Debug, Default)]
struct MockData {
    stations: Vec<Station>,
    nearby: Vec<NearbyStation>,
    waiting: HashMap<String, Vec<Departure>>,
    schedules: HashMap<ScheduleKey, Vec<ScheduleEntry>>,
}

/// Mock TAN client that serves data from JSON files.
#[derive(Debug, Clone)]
pub struct MockTanClient {
    data: Arc<MockData>,
}

impl MockTanClient {
    /// Create a new mock client by loading JSON files from a directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, TanError> {
        let data_dir = data_dir.as_ref();

        let stations_path = data_dir.join("stations.json");
        if !stations_path.is_file() {
            return Err(TanError::Mock(format!(
                "no stations.json in {}",
                data_dir.display()
            )));
        }
        let arrets: Vec<ArretDto> = read_json(&stations_path)?;

        let nearby_path = data_dir.join("nearby.json");
        let nearby = if nearby_path.is_file() {
            let arrets: Vec<ArretDto> = read_json(&nearby_path)?;
            convert_nearby(&arrets)
        } else {
            Vec::new()
        };

        let mut waiting = HashMap::new();
        for (stem, path) in json_files(&data_dir.join("tempsattente"))? {
            let entries: Vec<TempsAttenteDto> = read_json(&path)?;
            waiting.insert(stem, convert_waiting_times(&entries));
        }

        let mut schedules = HashMap::new();
        for (stem, path) in json_files(&data_dir.join("horaires"))? {
            let key = parse_schedule_stem(&stem).ok_or_else(|| {
                TanError::Mock(format!(
                    "invalid timetable file name {stem:?}, expected CODE_LINE_DIRECTION"
                ))
            })?;
            let horaires: HorairesArretDto = read_json(&path)?;
            schedules.insert(key, convert_schedule(horaires));
        }

        Ok(Self {
            data: Arc::new(MockData {
                stations: convert_tram_stations(&arrets),
                nearby,
                waiting,
                schedules,
            }),
        })
    }

    /// Number of tram stations loaded.
    pub fn station_count(&self) -> usize {
        self.data.stations.len()
    }
}

#[async_trait]
impl TransitClient for MockTanClient {
    async fn tram_stations(&self) -> Result<Vec<Station>, TanError> {
        Ok(self.data.stations.clone())
    }

    async fn wait_times(&self, station: &Station) -> Result<Vec<Departure>, TanError> {
        Ok(self
            .data
            .waiting
            .get(&station.code)
            .cloned()
            .unwrap_or_default())
    }

    async fn scheduled_times(
        &self,
        station: &Station,
        line: &str,
        direction: Direction,
    ) -> Result<Vec<ScheduleEntry>, TanError> {
        let key = (station.code.clone(), line.to_string(), direction);
        Ok(self.data.schedules.get(&key).cloned().unwrap_or_default())
    }

    /// The coordinate is ignored; mock data is static.
    async fn stations_near(&self, _at: Coordinates) -> Result<Vec<NearbyStation>, TanError> {
        Ok(self.data.nearby.clone())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, TanError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| TanError::Mock(format!("failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&json)
        .map_err(|e| TanError::Mock(format!("failed to parse {}: {e}", path.display())))
}

/// List `(file stem, path)` of the `.json` files in `dir`. A missing
/// directory yields nothing.
fn json_files(dir: &Path) -> Result<Vec<(String, std::path::PathBuf)>, TanError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(dir)
        .map_err(|e| TanError::Mock(format!("failed to read {}: {e}", dir.display())))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| TanError::Mock(format!("failed to read entry: {e}")))?;
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            files.push((stem.to_string(), path.clone()));
        }
    }
    Ok(files)
}

/// Parse `COMM_1_2` into (code, line, direction).
fn parse_schedule_stem(stem: &str) -> Option<ScheduleKey> {
    let mut parts = stem.rsplitn(3, '_');
    let direction = parts.next()?.parse::<u8>().ok()?;
    let line = parts.next()?;
    let code = parts.next()?;
    if code.is_empty() || line.is_empty() {
        return None;
    }
    let direction = Direction::try_from(direction).ok()?;
    Some((code.to_string(), line.to_string(), direction))
}

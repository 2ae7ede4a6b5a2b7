//! TAN open API HTTP client.
//!
//! Provides async methods for querying the Nantes transit API and
//! converting its responses to domain types.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{Coordinates, Departure, Direction, NearbyStation, ScheduleEntry, Station};

use super::convert::{convert_nearby, convert_schedule, convert_tram_stations, convert_waiting_times};
use super::error::TanError;
use super::transit::TransitClient;
use super::types::{ArretDto, HorairesArretDto, TempsAttenteDto};

/// Default base URL for the TAN API.
pub const DEFAULT_BASE_URL: &str = "https://open.tan.fr/ewp";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the TAN client.
#[derive(Debug, Clone)]
pub struct TanConfig {
    /// Base URL for the API (defaults to production TAN)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TanConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// TAN open API client.
#[derive(Debug, Clone)]
pub struct TanClient {
    http: reqwest::Client,
    base_url: String,
}

impl TanClient {
    /// Create a new TAN client with the given configuration.
    pub fn new(config: TanConfig) -> Result<Self, TanError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch every stop area on the network.
    pub async fn fetch_stations(&self) -> Result<Vec<ArretDto>, TanError> {
        self.get_json("arrets.json").await
    }

    /// Fetch the stop areas around a point.
    pub async fn fetch_stations_near(&self, at: Coordinates) -> Result<Vec<ArretDto>, TanError> {
        let path = format!(
            "arrets.json/{}/{}",
            decimal_comma(at.latitude),
            decimal_comma(at.longitude)
        );
        self.get_json(&path).await
    }

    /// Fetch live waiting times at a stop area.
    pub async fn fetch_waiting_times(
        &self,
        code_lieu: &str,
    ) -> Result<Vec<TempsAttenteDto>, TanError> {
        self.get_json(&format!("tempsattente.json/{code_lieu}")).await
    }

    /// Fetch the timetable of a stop point for one line and direction.
    pub async fn fetch_schedule(
        &self,
        code_arret: &str,
        line: &str,
        direction: Direction,
    ) -> Result<HorairesArretDto, TanError> {
        let path = format!("horairesarret.json/{code_arret}/{line}/{}", direction.code());
        self.get_json(&path).await
    }

    /// Find the stop-point code for a line and direction at a stop area.
    ///
    /// The timetable endpoint is addressed by stop point, which only the
    /// waiting-time board exposes. Tram stop points are `{codeLieu}1` when
    /// the board has nothing for the line.
    async fn stop_point_code(
        &self,
        station: &Station,
        line: &str,
        direction: Direction,
    ) -> Result<String, TanError> {
        let departures = self.wait_times(station).await?;
        Ok(stop_point_for(station, &departures, line, direction))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, TanError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "TAN request");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TanError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| TanError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

#[async_trait]
impl TransitClient for TanClient {
    async fn tram_stations(&self) -> Result<Vec<Station>, TanError> {
        let arrets = self.fetch_stations().await?;
        Ok(convert_tram_stations(&arrets))
    }

    async fn wait_times(&self, station: &Station) -> Result<Vec<Departure>, TanError> {
        let entries = self.fetch_waiting_times(&station.code).await?;
        Ok(convert_waiting_times(&entries))
    }

    async fn scheduled_times(
        &self,
        station: &Station,
        line: &str,
        direction: Direction,
    ) -> Result<Vec<ScheduleEntry>, TanError> {
        let code_arret = self.stop_point_code(station, line, direction).await?;
        let horaires = self.fetch_schedule(&code_arret, line, direction).await?;
        Ok(convert_schedule(horaires))
    }

    async fn stations_near(&self, at: Coordinates) -> Result<Vec<NearbyStation>, TanError> {
        let arrets = self.fetch_stations_near(at).await?;
        Ok(convert_nearby(&arrets))
    }
}

/// Stop point serving `line` towards `direction`, taken from a live board.
///
/// Falls back to the station's first stop point (`{code}1`).
fn stop_point_for(
    station: &Station,
    departures: &[Departure],
    line: &str,
    direction: Direction,
) -> String {
    departures
        .iter()
        .filter(|d| d.line.number == line && d.direction == direction)
        .find_map(|d| d.stop_code.clone())
        .unwrap_or_else(|| format!("{}1", station.code))
}

/// Format a coordinate the way the TAN API expects it: `47,261`.
fn decimal_comma(value: f64) -> String {
    value.to_string().replace('.', ",")
}

//! TAN (Nantes transit) open API client.
//!
//! This module provides an HTTP client for the TAN "ewp" API, which serves
//! stop listings, live waiting times and stop timetables, plus a mock client
//! backed by captured responses.
//!
//! Key characteristics of the API:
//! - Stop areas (`codeLieu`) group several stop points (`codeArret`); the
//!   timetable endpoint needs a stop point, the others a stop area
//! - Coordinates in URLs use a decimal comma (`47,261`)
//! - Waiting times are free text ("4mn", "Proche")

mod client;
mod convert;
mod error;
#[cfg(test)]
pub(crate) mod fake;
mod matching;
mod mock;
mod transit;
mod types;

pub use client::{DEFAULT_BASE_URL, TanClient, TanConfig};
pub use error::TanError;
pub use matching::{closest_station, similarity};
pub use mock::MockTanClient;
pub use transit::TransitClient;
pub use types::{ArretDto, HorairesArretDto, HoraireDto, TempsAttenteDto};

//! TAN open API response DTOs.
//!
//! These types map directly to the JSON served under `open.tan.fr/ewp`.
//! Field names are French on the wire; only the fields the assistant reads
//! are declared, everything else is ignored by serde.

use serde::Deserialize;

/// A stop area from `arrets.json` (optionally with a distance when the
/// coordinate variant of the endpoint is used).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArretDto {
    /// Stop area code, e.g. "COMM".
    pub code_lieu: String,

    /// Display name, e.g. "Commerce".
    pub libelle: String,

    /// Distance from the queried point, e.g. "120 m". Absent on the plain
    /// listing.
    #[serde(default)]
    pub distance: Option<String>,

    /// Lines stopping here.
    #[serde(default)]
    pub ligne: Vec<LigneNumDto>,
}

/// Line reference inside a stop listing: number only.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LigneNumDto {
    pub num_ligne: String,
}

/// One upcoming vehicle from `tempsattente.json/{codeLieu}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TempsAttenteDto {
    /// Direction code, 1 or 2.
    pub sens: u8,

    /// Terminus name for this direction.
    pub terminus: String,

    /// Time to arrival, e.g. "4mn" or "Proche".
    pub temps: String,

    pub ligne: LigneDto,

    /// Stop point the vehicle calls at.
    #[serde(default)]
    pub arret: Option<ArretRefDto>,
}

/// Line description inside a waiting-time entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LigneDto {
    pub num_ligne: String,

    /// 1 = tram, 2 = busway, 3 = bus, 4 = navibus.
    pub type_ligne: u8,
}

/// Stop point reference.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArretRefDto {
    pub code_arret: String,
}

/// Response from `horairesarret.json/{codeArret}/{ligne}/{sens}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorairesArretDto {
    /// The next slots from now. May be null outside service hours.
    #[serde(default)]
    pub prochains_horaires: Option<Vec<HoraireDto>>,
}

/// One hour slot with its minute labels.
#[derive(Debug, Clone, Deserialize)]
pub struct HoraireDto {
    pub heure: String,

    #[serde(default)]
    pub passages: Option<Vec<String>>,
}

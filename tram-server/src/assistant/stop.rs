//! Stop resolution: which station the user is talking about.

use tracing::debug;

use crate::conversation::Conversation;
use crate::domain::Station;
use crate::tan::{TransitClient, closest_station};

use super::error::{AssistantError, Subject};

/// Request parameter carrying the spoken stop name.
pub const STOP_PARAMETER: &str = "arret";

/// The stop name for this turn: the `arret` parameter, else the saved
/// favorite.
///
/// Resolved before any upstream call so a turn without a stop costs nothing.
pub fn requested_stop(conv: &Conversation) -> Result<String, AssistantError> {
    if let Some(stop) = conv.parameter_text(STOP_PARAMETER) {
        return Ok(stop);
    }

    conv.storage()
        .favorite_stop()
        .map(str::to_string)
        .ok_or(AssistantError::MissingStop)
}

/// Match a spoken stop name against the tram station list.
pub async fn resolve_station(
    transit: &dyn TransitClient,
    query: &str,
) -> Result<Station, AssistantError> {
    let stations = transit.tram_stations().await?;

    let station = closest_station(query, &stations)
        .cloned()
        .ok_or(AssistantError::NoData(Subject::Station))?;

    debug!(query, station = %station.name, code = %station.code, "resolved stop");
    Ok(station)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::UserStorage;
    use crate::tan::fake::FakeTransit;
    use serde_json::json;

    fn storage_with_favorite(name: &str) -> UserStorage {
        let mut storage = UserStorage::new();
        storage.set("arret", json!(name));
        storage
    }

    #[test]
    fn parameter_wins_over_favorite() {
        let conv = Conversation::new("temps_attente_arret")
            .with_parameter("arret", json!("Foch"))
            .with_storage(storage_with_favorite("Jamet"));
        assert_eq!(requested_stop(&conv).unwrap(), "Foch");
    }

    #[test]
    fn favorite_used_when_no_parameter() {
        let conv = Conversation::new("temps_attente_arret")
            .with_parameter("arret", json!(""))
            .with_storage(storage_with_favorite("Jamet"));
        assert_eq!(requested_stop(&conv).unwrap(), "Jamet");
    }

    #[test]
    fn neither_is_missing_stop() {
        let conv = Conversation::new("temps_attente_arret");
        assert!(matches!(
            requested_stop(&conv),
            Err(AssistantError::MissingStop)
        ));
    }

    #[tokio::test]
    async fn resolves_closest_station() {
        let transit = FakeTransit::new()
            .with_station(Station::new("COMM", "Commerce"))
            .with_station(Station::new("FOCH", "Foch - Cathédrale"));

        let station = resolve_station(&transit, "foch").await.unwrap();
        assert_eq!(station.code, "FOCH");
        assert_eq!(transit.call_count(), 1);
    }

    #[tokio::test]
    async fn empty_station_list_is_no_data() {
        let transit = FakeTransit::new();
        let err = resolve_station(&transit, "foch").await.unwrap_err();
        assert!(matches!(err, AssistantError::NoData(Subject::Station)));
    }

    #[tokio::test]
    async fn upstream_failure_propagates() {
        let transit = FakeTransit::new().failing();
        let err = resolve_station(&transit, "foch").await.unwrap_err();
        assert!(matches!(err, AssistantError::UpstreamUnavailable(_)));
    }
}

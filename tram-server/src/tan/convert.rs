//! Conversion from TAN DTOs to domain types.

use tracing::warn;

use crate::domain::{
    Departure, Direction, EtaLabel, LineKind, LineRef, NearbyStation, ScheduleEntry, Station,
};

use super::types::{ArretDto, HorairesArretDto, TempsAttenteDto};

/// Convert a stop listing entry.
pub fn convert_station(arret: &ArretDto) -> Station {
    let lines = arret
        .ligne
        .iter()
        .map(|l| LineRef::from_number(l.num_ligne.trim()))
        .collect();

    Station::new(arret.code_lieu.trim(), arret.libelle.trim()).with_lines(lines)
}

/// Keep only the stop areas served by a tram line.
pub fn convert_tram_stations(arrets: &[ArretDto]) -> Vec<Station> {
    arrets
        .iter()
        .map(convert_station)
        .filter(Station::serves_tram)
        .collect()
}

/// Convert the result of a proximity search. Entries without a distance
/// are kept with an empty distance label.
pub fn convert_nearby(arrets: &[ArretDto]) -> Vec<NearbyStation> {
    arrets
        .iter()
        .map(|a| NearbyStation {
            station: convert_station(a),
            distance: a.distance.clone().unwrap_or_default(),
        })
        .collect()
}

/// Convert waiting-time entries, preserving upstream order.
///
/// Entries with an unknown direction code are skipped rather than failing
/// the whole board.
pub fn convert_waiting_times(entries: &[TempsAttenteDto]) -> Vec<Departure> {
    entries
        .iter()
        .filter_map(|e| match Direction::try_from(e.sens) {
            Ok(direction) => Some(Departure {
                line: LineRef::new(
                    e.ligne.num_ligne.trim(),
                    LineKind::from_type_code(e.ligne.type_ligne),
                ),
                direction,
                eta: EtaLabel::new(&e.temps),
                terminus: e.terminus.trim().to_string(),
                stop_code: e.arret.as_ref().map(|a| a.code_arret.clone()),
            }),
            Err(err) => {
                warn!(line = %e.ligne.num_ligne, error = %err, "skipping waiting-time entry");
                None
            }
        })
        .collect()
}

/// Convert the upcoming slots of a stop timetable.
pub fn convert_schedule(horaires: HorairesArretDto) -> Vec<ScheduleEntry> {
    horaires
        .prochains_horaires
        .unwrap_or_default()
        .into_iter()
        .map(|h| ScheduleEntry::new(h.heure, h.passages.unwrap_or_default()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrets(json: &str) -> Vec<ArretDto> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn tram_stations_filter_out_bus_only_stops() {
        let listing = arrets(
            r#"[
                {"codeLieu":"COMM","libelle":"Commerce","ligne":[{"numLigne":"1"},{"numLigne":"C1"}]},
                {"codeLieu":"BOUF","libelle":"Bouffay","ligne":[{"numLigne":"C1"},{"numLigne":"11"}]},
                {"codeLieu":"NEUS","libelle":"Neustrie ","ligne":[{"numLigne":"3"}]}
            ]"#,
        );

        let stations = convert_tram_stations(&listing);
        let names: Vec<_> = stations.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Commerce", "Neustrie"]);
        assert_eq!(stations[0].code, "COMM");
        assert_eq!(stations[0].lines.len(), 2);
    }

    #[test]
    fn nearby_keeps_distance() {
        let listing = arrets(
            r#"[{"codeLieu":"FOCH","libelle":"Foch - Cathédrale","distance":"120 m","ligne":[{"numLigne":"1"}]},
                {"codeLieu":"XXXX","libelle":"Sans distance","ligne":[]}]"#,
        );

        let nearby = convert_nearby(&listing);
        assert_eq!(nearby[0].distance, "120 m");
        assert_eq!(nearby[0].station.name, "Foch - Cathédrale");
        assert_eq!(nearby[1].distance, "");
    }

    #[test]
    fn waiting_times_keep_order_and_skip_bad_direction() {
        let entries: Vec<TempsAttenteDto> = serde_json::from_str(
            r#"[
                {"sens":2,"terminus":"François Mitterrand","temps":"Proche",
                 "ligne":{"numLigne":"1","typeLigne":1},"arret":{"codeArret":"FOCH2"}},
                {"sens":3,"terminus":"Nowhere","temps":"2mn","ligne":{"numLigne":"1","typeLigne":1}},
                {"sens":1,"terminus":"Beaujoire","temps":"5mn","ligne":{"numLigne":"C1","typeLigne":3}}
            ]"#,
        )
        .unwrap();

        let departures = convert_waiting_times(&entries);
        assert_eq!(departures.len(), 2);

        assert_eq!(departures[0].direction, Direction::Two);
        assert_eq!(departures[0].eta.as_str(), "moins de 2 minutes");
        assert!(departures[0].line.is_tram());
        assert_eq!(departures[0].stop_code.as_deref(), Some("FOCH2"));

        assert_eq!(departures[1].direction, Direction::One);
        assert_eq!(departures[1].eta.as_str(), "5 minutes");
        assert!(!departures[1].line.is_tram());
        assert_eq!(departures[1].stop_code, None);
    }

    #[test]
    fn schedule_conversion() {
        let horaires: HorairesArretDto = serde_json::from_str(
            r#"{"prochainsHoraires":[{"heure":"14h","passages":["05","25"]},{"heure":"15h"}]}"#,
        )
        .unwrap();

        let entries = convert_schedule(horaires);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].slot(0).as_deref(), Some("14h05"));
        assert!(entries[1].passages.is_empty());

        let none: HorairesArretDto = serde_json::from_str(r#"{"prochainsHoraires":null}"#).unwrap();
        assert!(convert_schedule(none).is_empty());
    }
}

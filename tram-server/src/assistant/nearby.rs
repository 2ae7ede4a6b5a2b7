//! Nearby tram stops.

use crate::conversation::Outcome;
use crate::domain::{Coordinates, NearbyStation};
use crate::tan::TransitClient;

use super::error::{AssistantError, Subject};

/// List the tram stops around `origin`.
///
/// The origin is a fixed reference point, never the user's position.
pub async fn handle(
    transit: &dyn TransitClient,
    origin: Coordinates,
) -> Result<Outcome, AssistantError> {
    let nearby = transit.stations_near(origin).await?;

    let trams: Vec<&NearbyStation> = nearby
        .iter()
        .filter(|n| n.station.serves_tram())
        .collect();

    let prefix = match trams.len() {
        0 => return Err(AssistantError::NoData(Subject::NearbyStops)),
        1 => "L'arrêt le plus proche est ",
        _ => "Les arrêts les plus proches sont ",
    };

    let listed = trams
        .iter()
        .map(|n| format!("{} à {}", n.station.name, n.distance))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(Outcome::say(format!("{prefix}{listed}.")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LineRef, Station};
    use crate::tan::fake::FakeTransit;

    const ORIGIN: Coordinates = Coordinates {
        latitude: 47.261,
        longitude: -1.583,
    };

    fn nearby(name: &str, lines: &[&str], distance: &str) -> NearbyStation {
        NearbyStation {
            station: Station::new(name.to_uppercase(), name)
                .with_lines(lines.iter().map(|l| LineRef::from_number(*l)).collect()),
            distance: distance.to_string(),
        }
    }

    #[tokio::test]
    async fn lists_tram_stops_only() {
        let transit = FakeTransit::new().with_nearby(vec![
            nearby("Ranzay", &["1"], "120 m"),
            nearby("Haluchère", &["C6", "75"], "200 m"),
            nearby("Beaujoire", &["1", "80"], "450 m"),
        ]);

        let outcome = handle(&transit, ORIGIN).await.unwrap();
        assert_eq!(
            outcome.text(),
            "Les arrêts les plus proches sont Ranzay à 120 m, Beaujoire à 450 m."
        );
    }

    #[tokio::test]
    async fn single_stop_uses_singular() {
        let transit = FakeTransit::new().with_nearby(vec![nearby("Ranzay", &["1"], "120 m")]);

        let outcome = handle(&transit, ORIGIN).await.unwrap();
        assert_eq!(outcome.text(), "L'arrêt le plus proche est Ranzay à 120 m.");
    }

    #[tokio::test]
    async fn no_tram_stop_is_no_data() {
        let transit = FakeTransit::new().with_nearby(vec![nearby("Haluchère", &["C6"], "200 m")]);

        let err = handle(&transit, ORIGIN).await.unwrap_err();
        assert!(matches!(err, AssistantError::NoData(Subject::NearbyStops)));
    }
}

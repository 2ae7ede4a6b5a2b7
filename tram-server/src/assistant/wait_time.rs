//! Live wait-time lookup.

use std::collections::BTreeMap;

use crate::conversation::{Conversation, Outcome};
use crate::domain::{Departure, Direction};
use crate::tan::TransitClient;

use super::error::{AssistantError, Subject};
use super::stop::{requested_stop, resolve_station};

/// Answer "when is the next tram at this stop".
pub async fn handle(
    transit: &dyn TransitClient,
    conv: &Conversation,
) -> Result<Outcome, AssistantError> {
    let stop = requested_stop(conv)?;
    let station = resolve_station(transit, &stop).await?;
    let departures = transit.wait_times(&station).await?;

    let next = next_per_direction(&departures);
    if next.is_empty() {
        return Err(AssistantError::NoData(Subject::WaitTimes));
    }

    let sentence = next
        .values()
        .map(|d| describe(d))
        .collect::<Vec<_>>()
        .join(" ");
    Ok(Outcome::say(sentence))
}

/// First tram departure in each direction, in fetch order.
///
/// The scan stops as soon as both directions are known.
pub fn next_per_direction(departures: &[Departure]) -> BTreeMap<Direction, &Departure> {
    let mut next = BTreeMap::new();
    for departure in departures.iter().filter(|d| d.line.is_tram()) {
        next.entry(departure.direction).or_insert(departure);
        if next.len() == 2 {
            break;
        }
    }
    next
}

fn describe(departure: &Departure) -> String {
    format!(
        "Le prochain tram de la ligne {} passe dans {} en direction de {}.",
        departure.line.number, departure.eta, departure.terminus
    )
}

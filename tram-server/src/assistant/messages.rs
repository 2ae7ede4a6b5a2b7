//! Fixed sentences spoken by the assistant.

use crate::domain::Coordinates;

pub const NOT_UNDERSTOOD: &str = "Désolé, je n'ai pas compris.";

pub const MISSING_STOP: &str = "Je n'ai pas compris le nom de l'arrêt.";
pub const UNKNOWN_STOP: &str = "Désolé, je ne trouve pas cet arrêt.";
pub const MISSING_DIRECTION: &str = "Je n'ai pas compris la direction demandée.";
pub const MISSING_LINE: &str = "Je n'ai pas compris la ligne demandée.";

pub const NO_WAIT_TIMES: &str = "Je n'ai aucun horaires à vous proposer.";
pub const NO_SCHEDULE: &str = "Désolé, je n'ai pas d'horaires à vous proposer.";
pub const SCHEDULE_EXHAUSTED: &str = "Je n'ai plus d'horaires à vous proposer.";
pub const NO_NEARBY_STOPS: &str = "Désolé, je ne parviens pas à trouver d'arrêts.";
pub const UPSTREAM_UNAVAILABLE: &str =
    "Désolé, je n'arrive pas à obtenir les horaires pour le moment.";

pub const SAVE_NOT_ALLOWED: &str = "Désolé, je ne peux pas sauvegarder votre arrêt préféré.";
pub const SAVE_MISSING_STOP: &str = "Désolé, je n'ai pas saisi le nom de l'arrêt.";
pub const NO_FAVORITE: &str = "Vous n'avez pas d'arrêt préféré.";
pub const FAVORITE_DELETED: &str = "Votre arrêt préféré a été supprimé.";

pub const LOCATION_PERMISSION_CONTEXT: &str = "Pour vous localiser";
pub const LOCATION_PERMISSION_NEEDED: &str =
    "J'ai besoin de votre autorisation pour vous localiser.";
pub const LOCATION_UNAVAILABLE: &str = "Désolé, je ne parviens pas à vous localiser.";

pub fn favorite_saved(stop: &str) -> String {
    format!("L'arrêt {stop} a bien été sauvegardé.")
}

pub fn favorite_is(stop: &str) -> String {
    format!("Votre arrêt préféré est {stop}.")
}

pub fn next_departure(slot: &str) -> String {
    format!("Voici le prochain horaire de passage: {slot}")
}

pub fn located_at(at: Coordinates) -> String {
    format!("Vous êtes à {at}.")
}

//! Intent registry.
//!
//! Intent names are classified upstream; this table is the single place that
//! maps them to the handlers this webhook implements.

use std::fmt;

/// An intent the webhook knows how to fulfil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    RequestLocation,
    UserLocation,
    SaveFavorite,
    DeleteFavorite,
    ReadFavorite,
    WaitTime,
    NearbyStops,
    Schedule,
    ScheduleNext,
}

/// Registered intent names.
const INTENTS: &[(&str, Intent)] = &[
    ("geolocalisation", Intent::RequestLocation),
    ("position_utilisateur", Intent::UserLocation),
    ("sauvegarder_arret", Intent::SaveFavorite),
    ("supprimer_arret", Intent::DeleteFavorite),
    ("demander_arret_favori", Intent::ReadFavorite),
    ("temps_attente_arret", Intent::WaitTime),
    ("arrets_a_proximite", Intent::NearbyStops),
    ("horaires_arret", Intent::Schedule),
    ("horaires_arret_suivant", Intent::ScheduleNext),
];

impl Intent {
    /// Look up an intent by its Dialogflow display name.
    pub fn from_name(name: &str) -> Option<Self> {
        INTENTS
            .iter()
            .find(|(registered, _)| *registered == name)
            .map(|(_, intent)| *intent)
    }

    /// The Dialogflow display name.
    pub fn name(self) -> &'static str {
        INTENTS
            .iter()
            .find(|(_, intent)| *intent == self)
            .map_or("", |(name, _)| name)
    }

    /// All registered intents.
    pub fn all() -> impl Iterator<Item = Intent> {
        INTENTS.iter().map(|(_, intent)| *intent)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

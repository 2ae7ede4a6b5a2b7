//! Device location permission and capture.

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::conversation::{Conversation, LOCATION_KEY, Outcome, Permission, Reply};

use super::messages;

/// Turn context marking an outstanding permission request.
pub const PERMISSION_CONTEXT: &str = "permission_localisation";

/// The permission answer arrives on the very next turn.
const PERMISSION_LIFESPAN: u32 = 2;

/// Ask the platform for the device's precise location.
pub fn request_permission(_conv: &Conversation) -> Outcome {
    let mut parameters = Map::new();
    parameters.insert(
        "permission".into(),
        Value::String(Permission::DevicePreciseLocation.as_str().into()),
    );

    Outcome::default()
        .with_reply(Reply::Permission {
            context: messages::LOCATION_PERMISSION_CONTEXT.to_string(),
            permission: Permission::DevicePreciseLocation,
        })
        .set_turn_context(PERMISSION_CONTEXT, PERMISSION_LIFESPAN, parameters)
}

/// Record the location granted after a permission request.
pub fn record_location(conv: &Conversation) -> Outcome {
    if conv.turn_context(PERMISSION_CONTEXT).is_none() {
        return Outcome::say(messages::LOCATION_PERMISSION_NEEDED);
    }

    let Some(at) = conv.device_location().filter(|c| c.is_valid()) else {
        warn!("permission granted but no device coordinates");
        return Outcome::say(messages::LOCATION_UNAVAILABLE);
    };

    let mut storage = conv.storage().clone();
    match serde_json::to_value(at) {
        Ok(value) => storage.set(LOCATION_KEY, value),
        Err(e) => {
            warn!(error = %e, "cannot store device location");
            return Outcome::say(messages::LOCATION_UNAVAILABLE);
        }
    }
    info!(latitude = at.latitude, longitude = at.longitude, "recorded device location");

    Outcome::say(messages::located_at(at))
        .with_user_storage(storage)
        .clear_turn_context(PERMISSION_CONTEXT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::TurnContext;
    use crate::domain::Coordinates;

    fn after_permission() -> Conversation {
        Conversation::new("position_utilisateur").with_context(TurnContext::new(
            PERMISSION_CONTEXT,
            1,
            Map::new(),
        ))
    }

    #[test]
    fn request_sets_context_and_prompt() {
        let outcome = request_permission(&Conversation::new("geolocalisation"));

        assert_eq!(
            outcome.replies,
            vec![Reply::Permission {
                context: "Pour vous localiser".into(),
                permission: Permission::DevicePreciseLocation,
            }]
        );
        assert_eq!(outcome.context(PERMISSION_CONTEXT).unwrap().lifespan, 2);
        assert!(outcome.user_storage.is_none());
    }

    #[test]
    fn location_without_request() {
        let conv = Conversation::new("position_utilisateur")
            .with_device_location(Coordinates::new(47.2, -1.55));

        let outcome = record_location(&conv);
        assert_eq!(
            outcome.text(),
            "J'ai besoin de votre autorisation pour vous localiser."
        );
        assert!(outcome.user_storage.is_none());
    }

    #[test]
    fn location_without_coordinates() {
        let outcome = record_location(&after_permission());
        assert_eq!(outcome.text(), "Désolé, je ne parviens pas à vous localiser.");
    }

    #[test]
    fn location_is_stored() {
        let conv = after_permission().with_device_location(Coordinates::new(47.2, -1.55));

        let outcome = record_location(&conv);
        assert_eq!(outcome.text(), "Vous êtes à 47.2, -1.55.");
        assert_eq!(outcome.context(PERMISSION_CONTEXT).unwrap().lifespan, 0);
        assert_eq!(
            outcome.user_storage.unwrap().last_known_location(),
            Some(Coordinates::new(47.2, -1.55))
        );
    }
}

//! Favorite stop management.
//!
//! The favorite lives in durable user storage, so only verified users can
//! keep one.

use serde_json::Value;
use tracing::info;

use crate::conversation::{Conversation, FAVORITE_STOP_KEY, Outcome};

use super::messages;
use super::stop::STOP_PARAMETER;

pub fn save(conv: &Conversation) -> Outcome {
    if !conv.profile().verified {
        return Outcome::say(messages::SAVE_NOT_ALLOWED);
    }

    let Some(stop) = conv.parameter_text(STOP_PARAMETER) else {
        return Outcome::say(messages::SAVE_MISSING_STOP);
    };

    let mut storage = conv.storage().clone();
    storage.set(FAVORITE_STOP_KEY, Value::String(stop.clone()));
    info!(stop = %stop, "saved favorite stop");

    Outcome::say(messages::favorite_saved(&stop)).with_user_storage(storage)
}

pub fn delete(conv: &Conversation) -> Outcome {
    if conv.storage().favorite_stop().is_none() {
        return Outcome::say(messages::NO_FAVORITE);
    }

    let mut storage = conv.storage().clone();
    storage.remove(FAVORITE_STOP_KEY);
    info!("deleted favorite stop");

    Outcome::say(messages::FAVORITE_DELETED).with_user_storage(storage)
}

pub fn read(conv: &Conversation) -> Outcome {
    match conv.storage().favorite_stop() {
        Some(stop) => Outcome::say(messages::favorite_is(stop)),
        None => Outcome::say(messages::NO_FAVORITE),
    }
}

//! Intent handlers for the tram assistant.
//!
//! [`Assistant::handle`] is the single dispatcher: it maps the turn's intent
//! to a handler and turns every recoverable [`AssistantError`] into the
//! matching spoken sentence, so a turn always produces an [`Outcome`].

mod error;
mod favorite;
mod intent;
mod location;
mod messages;
mod nearby;
mod schedule;
mod stop;
mod wait_time;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::conversation::{Conversation, Outcome};
use crate::domain::Coordinates;
use crate::tan::TransitClient;

pub use error::{AssistantError, Parameter, Subject};
pub use intent::Intent;
pub use location::PERMISSION_CONTEXT;
pub use schedule::{
    Advance, Cursor, PaginationSession, PagingPolicy, SCHEDULE_CONTEXT, SESSION_LIFESPAN,
    UnknownPagingPolicy,
};

/// Reference point for the nearby-stops lookup (Nantes centre-east).
pub const DEFAULT_NEARBY_ORIGIN: Coordinates = Coordinates {
    latitude: 47.261,
    longitude: -1.583,
};

/// The webhook's fulfilment logic.
pub struct Assistant {
    transit: Arc<dyn TransitClient>,
    paging: PagingPolicy,
    nearby_origin: Coordinates,
}

impl Assistant {
    pub fn new(transit: Arc<dyn TransitClient>) -> Self {
        Self {
            transit,
            paging: PagingPolicy::default(),
            nearby_origin: DEFAULT_NEARBY_ORIGIN,
        }
    }

    pub fn with_paging(mut self, paging: PagingPolicy) -> Self {
        self.paging = paging;
        self
    }

    pub fn with_nearby_origin(mut self, origin: Coordinates) -> Self {
        self.nearby_origin = origin;
        self
    }

    pub fn paging(&self) -> PagingPolicy {
        self.paging
    }

    /// Fulfil one conversational turn.
    pub async fn handle(&self, conv: &Conversation) -> Outcome {
        let Some(intent) = Intent::from_name(conv.intent()) else {
            warn!(intent = conv.intent(), "unknown intent");
            return Outcome::say(messages::NOT_UNDERSTOOD);
        };

        debug!(%intent, "handling intent");

        let transit = self.transit.as_ref();
        let result = match intent {
            Intent::RequestLocation => Ok(location::request_permission(conv)),
            Intent::UserLocation => Ok(location::record_location(conv)),
            Intent::SaveFavorite => Ok(favorite::save(conv)),
            Intent::DeleteFavorite => Ok(favorite::delete(conv)),
            Intent::ReadFavorite => Ok(favorite::read(conv)),
            Intent::WaitTime => wait_time::handle(transit, conv).await,
            Intent::NearbyStops => nearby::handle(transit, self.nearby_origin).await,
            Intent::Schedule => schedule::query(transit, conv).await,
            Intent::ScheduleNext => schedule::next(conv, self.paging),
        };

        result.unwrap_or_else(|e| {
            warn!(%intent, error = %e, "answering with fallback sentence");
            Outcome::say(e.user_message())
        })
    }
}

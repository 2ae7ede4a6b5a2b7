//! Dialogflow / Actions on Google conversation plumbing.
//!
//! Decodes the webhook request into an immutable [`Conversation`], and
//! encodes a handler's [`Outcome`] back into a webhook response, including
//! the context and user-storage writes it carries.

mod request;
mod response;
mod store;

pub use request::{
    AssistantDevice, AssistantPayload, AssistantUser, ContextDto, DeviceLocation, IntentDto,
    LatLng, OriginalDetectIntentRequest, QueryResult, WebhookRequest,
};
pub use response::WebhookResponse;
pub use store::{
    Conversation, FAVORITE_STOP_KEY, LOCATION_KEY, Outcome, Permission, Reply, TurnContext,
    UserProfile, UserStorage,
};

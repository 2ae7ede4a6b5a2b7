//! Conversation state: the immutable view of one turn, and the outcome a
//! handler returns.
//!
//! Two storage scopes exist. User storage is durable across conversations
//! and carried by the platform as a serialized JSON string. Turn contexts
//! are ephemeral, named, and expire after a number of turns. Handlers read
//! both from [`Conversation`] and describe every change in an [`Outcome`];
//! nothing is mutated in place.

use serde_json::{Map, Value, json};
use tracing::warn;

use crate::domain::Coordinates;

use super::request::WebhookRequest;

/// Verification status the platform reports for a signed-in user.
const VERIFIED: &str = "VERIFIED";

/// User storage key holding the favorite stop name.
pub const FAVORITE_STOP_KEY: &str = "arret";

/// User storage key holding the last known device location.
pub const LOCATION_KEY: &str = "location";

/// Durable per-user key/value storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserStorage {
    data: Map<String, Value>,
}

impl UserStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the platform's `userStorage` string (`{"data":{...}}`).
    ///
    /// Missing or unreadable storage yields an empty store; a corrupt blob
    /// must not block the conversation.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return Self::default();
        };

        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(mut root)) => match root.remove("data") {
                Some(Value::Object(data)) => Self { data },
                _ => Self::default(),
            },
            Ok(_) => Self::default(),
            Err(e) => {
                warn!(error = %e, "ignoring unreadable user storage");
                Self::default()
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.data.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    /// Serialize back to the platform's `userStorage` string.
    pub fn to_payload_string(&self) -> String {
        json!({ "data": self.data }).to_string()
    }

    /// The saved favorite stop, if any.
    ///
    /// Only a non-blank string counts; older clients cleared the favorite by
    /// writing an empty object.
    pub fn favorite_stop(&self) -> Option<&str> {
        self.get(FAVORITE_STOP_KEY)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn last_known_location(&self) -> Option<Coordinates> {
        self.get(LOCATION_KEY)
            .and_then(|v| serde_json::from_value::<Coordinates>(v.clone()).ok())
    }
}

/// The user as seen by the handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub favorite_stop: Option<String>,
    pub last_known_location: Option<Coordinates>,
    pub verified: bool,
}

/// An ephemeral named context with a lifespan counted in turns.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnContext {
    pub name: String,
    pub lifespan: u32,
    pub parameters: Map<String, Value>,
}

impl TurnContext {
    pub fn new(name: impl Into<String>, lifespan: u32, parameters: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            lifespan,
            parameters,
        }
    }
}

/// Immutable view of one conversational turn.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    session: String,
    intent: String,
    parameters: Map<String, Value>,
    contexts: Vec<TurnContext>,
    storage: UserStorage,
    verified: bool,
    device_location: Option<Coordinates>,
}

impl Conversation {
    /// Start a conversation turn for `intent` with no parameters, contexts
    /// or stored data.
    pub fn new(intent: impl Into<String>) -> Self {
        Self {
            intent: intent.into(),
            ..Self::default()
        }
    }

    pub fn from_request(request: WebhookRequest) -> Self {
        let query = request.query_result;
        let payload = request
            .original_detect_intent_request
            .and_then(|o| o.payload)
            .unwrap_or_default();
        let user = payload.user.unwrap_or_default();

        let contexts = query
            .output_contexts
            .iter()
            .map(|c| {
                TurnContext::new(
                    c.short_name(),
                    c.lifespan_count.unwrap_or(0),
                    c.parameters.clone(),
                )
            })
            .collect();

        let device_location = payload
            .device
            .and_then(|d| d.location)
            .and_then(|l| l.coordinates)
            .map(|c| Coordinates::new(c.latitude, c.longitude));

        Self {
            session: request.session,
            intent: query.intent.map(|i| i.display_name).unwrap_or_default(),
            parameters: query.parameters,
            contexts,
            storage: UserStorage::parse(user.user_storage.as_deref()),
            verified: user.user_verification_status.as_deref() == Some(VERIFIED),
            device_location,
        }
    }

    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = session.into();
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: Value) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }

    pub fn with_context(mut self, context: TurnContext) -> Self {
        self.contexts.retain(|c| c.name != context.name);
        self.contexts.push(context);
        self
    }

    pub fn with_storage(mut self, storage: UserStorage) -> Self {
        self.storage = storage;
        self
    }

    pub fn with_verified(mut self, verified: bool) -> Self {
        self.verified = verified;
        self
    }

    pub fn with_device_location(mut self, location: Coordinates) -> Self {
        self.device_location = Some(location);
        self
    }

    pub fn session(&self) -> &str {
        &self.session
    }

    pub fn intent(&self) -> &str {
        &self.intent
    }

    /// A slot-filled parameter as text.
    ///
    /// Numbers are rendered without a fractional part when integral (the
    /// platform sends `1.0` for "ligne 1"). Blank strings count as absent.
    pub fn parameter_text(&self, name: &str) -> Option<String> {
        match self.parameters.get(name)? {
            Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            Value::Number(n) => match (n.as_u64(), n.as_f64()) {
                (Some(u), _) => Some(u.to_string()),
                (None, Some(f)) if f.fract() == 0.0 && f >= 0.0 => Some(format!("{f:.0}")),
                (None, Some(f)) => Some(f.to_string()),
                (None, None) => None,
            },
            _ => None,
        }
    }

    /// A durable user value.
    pub fn user_value(&self, key: &str) -> Option<&Value> {
        self.storage.get(key)
    }

    /// An active turn context by short name.
    pub fn turn_context(&self, name: &str) -> Option<&TurnContext> {
        self.contexts.iter().find(|c| c.name == name)
    }

    pub fn storage(&self) -> &UserStorage {
        &self.storage
    }

    pub fn device_location(&self) -> Option<Coordinates> {
        self.device_location
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            favorite_stop: self.storage.favorite_stop().map(str::to_string),
            last_known_location: self.storage.last_known_location(),
            verified: self.verified,
        }
    }
}

/// Permission the assistant may ask the platform for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    DevicePreciseLocation,
}

impl Permission {
    pub fn as_str(self) -> &'static str {
        match self {
            Permission::DevicePreciseLocation => "DEVICE_PRECISE_LOCATION",
        }
    }
}

/// One segment of the assistant's answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Text spoken and displayed to the user.
    Text(String),

    /// Ask the platform to prompt the user for a permission.
    Permission {
        context: String,
        permission: Permission,
    },
}

/// Everything a handler produces for one turn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub replies: Vec<Reply>,

    /// Contexts to set; a lifespan of 0 deletes the context.
    pub contexts: Vec<TurnContext>,

    /// Replacement user storage, when it changed.
    pub user_storage: Option<UserStorage>,
}

impl Outcome {
    /// An outcome with a single text reply.
    pub fn say(text: impl Into<String>) -> Self {
        Self {
            replies: vec![Reply::Text(text.into())],
            ..Self::default()
        }
    }

    pub fn with_reply(mut self, reply: Reply) -> Self {
        self.replies.push(reply);
        self
    }

    pub fn set_turn_context(
        mut self,
        name: impl Into<String>,
        lifespan: u32,
        parameters: Map<String, Value>,
    ) -> Self {
        let context = TurnContext::new(name, lifespan, parameters);
        self.contexts.retain(|c| c.name != context.name);
        self.contexts.push(context);
        self
    }

    pub fn clear_turn_context(self, name: impl Into<String>) -> Self {
        self.set_turn_context(name, 0, Map::new())
    }

    pub fn with_user_storage(mut self, storage: UserStorage) -> Self {
        self.user_storage = Some(storage);
        self
    }

    /// The text replies joined by a space.
    pub fn text(&self) -> String {
        self.replies
            .iter()
            .filter_map(|r| match r {
                Reply::Text(t) => Some(t.as_str()),
                Reply::Permission { .. } => None,
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The context set under `name` by this outcome, if any.
    pub fn context(&self, name: &str) -> Option<&TurnContext> {
        self.contexts.iter().find(|c| c.name == name)
    }
}

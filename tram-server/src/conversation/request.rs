//! Dialogflow v2 webhook request DTOs.
//!
//! Only the fields the assistant reads are declared. The Actions on Google
//! payload rides along in `originalDetectIntentRequest.payload`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of a fulfillment webhook call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    #[serde(default)]
    pub response_id: Option<String>,

    /// Full session path, e.g. `projects/p/agent/sessions/123`.
    #[serde(default)]
    pub session: String,

    pub query_result: QueryResult,

    #[serde(default)]
    pub original_detect_intent_request: Option<OriginalDetectIntentRequest>,
}

/// Result of intent classification for this turn.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(default)]
    pub query_text: Option<String>,

    /// Slot-filled parameters; values may be strings, numbers or empty.
    #[serde(default)]
    pub parameters: Map<String, Value>,

    /// Contexts active in this turn, lifespans already counted down.
    #[serde(default)]
    pub output_contexts: Vec<ContextDto>,

    #[serde(default)]
    pub intent: Option<IntentDto>,

    #[serde(default)]
    pub language_code: Option<String>,
}

/// The matched intent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentDto {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub display_name: String,
}

/// A conversational context, inbound or outbound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextDto {
    /// Full path, `{session}/contexts/{short name}`.
    pub name: String,

    #[serde(default)]
    pub lifespan_count: Option<u32>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
}

impl ContextDto {
    /// The short context name after `/contexts/`.
    pub fn short_name(&self) -> &str {
        self.name
            .rsplit_once("/contexts/")
            .map_or(self.name.as_str(), |(_, short)| short)
    }
}

/// The platform request that triggered Dialogflow.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginalDetectIntentRequest {
    #[serde(default)]
    pub source: Option<String>,

    #[serde(default)]
    pub payload: Option<AssistantPayload>,
}

/// Actions on Google conversation payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantPayload {
    #[serde(default)]
    pub user: Option<AssistantUser>,

    #[serde(default)]
    pub device: Option<AssistantDevice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantUser {
    /// Durable storage, serialized JSON: `{"data":{...}}`.
    #[serde(default)]
    pub user_storage: Option<String>,

    /// `"VERIFIED"` or `"GUEST"`.
    #[serde(default)]
    pub user_verification_status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantDevice {
    #[serde(default)]
    pub location: Option<DeviceLocation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceLocation {
    #[serde(default)]
    pub coordinates: Option<LatLng>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "responseId": "abc-123",
        "session": "projects/tan/agent/sessions/42",
        "queryResult": {
            "queryText": "quand passe le tram à Foch",
            "parameters": {"arret": "Foch", "ligne": 1, "direction": ""},
            "outputContexts": [
                {"name": "projects/tan/agent/sessions/42/contexts/horaires_arret_suivant",
                 "lifespanCount": 4,
                 "parameters": {"arret": "Foch - Cathédrale"}},
                {"name": "projects/tan/agent/sessions/42/contexts/actions_capability_screen_output"}
            ],
            "intent": {"name": "projects/tan/agent/intents/1", "displayName": "temps_attente_arret"},
            "languageCode": "fr"
        },
        "originalDetectIntentRequest": {
            "source": "google",
            "payload": {
                "user": {"userStorage": "{\"data\":{\"arret\":\"Commerce\"}}", "userVerificationStatus": "VERIFIED"},
                "device": {"location": {"coordinates": {"latitude": 47.21, "longitude": -1.55}}}
            }
        }
    }"#;

    #[test]
    fn parse_full_request() {
        let req: WebhookRequest = serde_json::from_str(SAMPLE).unwrap();

        assert_eq!(req.session, "projects/tan/agent/sessions/42");
        let intent = req.query_result.intent.as_ref().unwrap();
        assert_eq!(intent.display_name, "temps_attente_arret");
        assert_eq!(req.query_result.parameters["arret"], "Foch");
        assert_eq!(req.query_result.output_contexts.len(), 2);
        assert_eq!(req.query_result.output_contexts[0].lifespan_count, Some(4));
        assert_eq!(req.query_result.output_contexts[1].lifespan_count, None);

        let payload = req
            .original_detect_intent_request
            .and_then(|o| o.payload)
            .unwrap();
        let user = payload.user.unwrap();
        assert_eq!(user.user_verification_status.as_deref(), Some("VERIFIED"));
        assert!(user.user_storage.unwrap().contains("Commerce"));
        let coords = payload.device.unwrap().location.unwrap().coordinates.unwrap();
        assert_eq!(coords.latitude, 47.21);
    }

    #[test]
    fn parse_minimal_request() {
        let req: WebhookRequest = serde_json::from_str(
            r#"{"queryResult": {"intent": {"displayName": "arrets_a_proximite"}}}"#,
        )
        .unwrap();
        assert!(req.session.is_empty());
        assert!(req.query_result.parameters.is_empty());
        assert!(req.original_detect_intent_request.is_none());
    }

    #[test]
    fn context_short_name() {
        let ctx = ContextDto {
            name: "projects/p/agent/sessions/1/contexts/horaires_arret_suivant".into(),
            lifespan_count: Some(5),
            parameters: Map::new(),
        };
        assert_eq!(ctx.short_name(), "horaires_arret_suivant");

        let bare = ContextDto {
            name: "permission_localisation".into(),
            lifespan_count: None,
            parameters: Map::new(),
        };
        assert_eq!(bare.short_name(), "permission_localisation");
    }
}

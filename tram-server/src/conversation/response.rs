//! Dialogflow v2 webhook response DTOs.

use serde::Serialize;
use serde_json::{Value, json};

use super::request::ContextDto;
use super::store::{Outcome, Reply};

/// Actions on Google helper intent for permission prompts.
const PERMISSION_INTENT: &str = "actions.intent.PERMISSION";

/// Type tag of the permission helper's value spec.
const PERMISSION_VALUE_SPEC: &str = "type.googleapis.com/google.actions.v2.PermissionValueSpec";

/// Body returned to Dialogflow.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub fulfillment_text: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub output_contexts: Vec<ContextDto>,

    pub payload: ResponsePayload,
}

#[derive(Debug, Serialize)]
pub struct ResponsePayload {
    pub google: GooglePayload,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GooglePayload {
    pub expect_user_response: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_storage: Option<String>,

    pub rich_response: RichResponse,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_intent: Option<SystemIntent>,
}

#[derive(Debug, Serialize)]
pub struct RichResponse {
    pub items: Vec<RichItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RichItem {
    pub simple_response: SimpleResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleResponse {
    pub text_to_speech: String,
}

#[derive(Debug, Serialize)]
pub struct SystemIntent {
    pub intent: String,
    pub data: Value,
}

impl WebhookResponse {
    /// Render a handler outcome for the given session path.
    pub fn from_outcome(outcome: &Outcome, session: &str) -> Self {
        let mut items = Vec::new();
        let mut system_intent = None;

        for reply in &outcome.replies {
            match reply {
                Reply::Text(text) => items.push(simple(text)),
                Reply::Permission {
                    context,
                    permission,
                } => {
                    system_intent = Some(SystemIntent {
                        intent: PERMISSION_INTENT.to_string(),
                        data: json!({
                            "@type": PERMISSION_VALUE_SPEC,
                            "optContext": context,
                            "permissions": [permission.as_str()],
                        }),
                    });
                }
            }
        }

        // The platform rejects a rich response without a simple response,
        // even when a helper intent does the talking.
        if items.is_empty() {
            items.push(simple("PLACEHOLDER"));
        }

        let output_contexts = outcome
            .contexts
            .iter()
            .map(|c| ContextDto {
                name: context_path(session, &c.name),
                lifespan_count: Some(c.lifespan),
                parameters: c.parameters.clone(),
            })
            .collect();

        Self {
            fulfillment_text: outcome.text(),
            output_contexts,
            payload: ResponsePayload {
                google: GooglePayload {
                    expect_user_response: true,
                    user_storage: outcome.user_storage.as_ref().map(|s| s.to_payload_string()),
                    rich_response: RichResponse { items },
                    system_intent,
                },
            },
        }
    }
}

fn simple(text: &str) -> RichItem {
    RichItem {
        simple_response: SimpleResponse {
            text_to_speech: text.to_string(),
        },
    }
}

fn context_path(session: &str, name: &str) -> String {
    if session.is_empty() {
        name.to_string()
    } else {
        format!("{session}/contexts/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::store::{Permission, UserStorage};
    use serde_json::Map;

    const SESSION: &str = "projects/p/agent/sessions/7";

    #[test]
    fn text_outcome_serializes() {
        let mut params = Map::new();
        params.insert("ligne".into(), json!("1"));
        let outcome = Outcome::say("Bonjour.").set_turn_context("horaires_arret_suivant", 5, params);

        let body = serde_json::to_value(WebhookResponse::from_outcome(&outcome, SESSION)).unwrap();

        assert_eq!(body["fulfillmentText"], "Bonjour.");
        assert_eq!(
            body["outputContexts"][0]["name"],
            "projects/p/agent/sessions/7/contexts/horaires_arret_suivant"
        );
        assert_eq!(body["outputContexts"][0]["lifespanCount"], 5);
        assert_eq!(body["outputContexts"][0]["parameters"]["ligne"], "1");
        assert_eq!(body["payload"]["google"]["expectUserResponse"], true);
        assert_eq!(
            body["payload"]["google"]["richResponse"]["items"][0]["simpleResponse"]["textToSpeech"],
            "Bonjour."
        );
        assert!(body["payload"]["google"].get("userStorage").is_none());
        assert!(body["payload"]["google"].get("systemIntent").is_none());
    }

    #[test]
    fn no_contexts_omits_field() {
        let body =
            serde_json::to_value(WebhookResponse::from_outcome(&Outcome::say("x"), SESSION)).unwrap();
        assert!(body.get("outputContexts").is_none());
    }

    #[test]
    fn cleared_context_has_zero_lifespan_and_no_parameters() {
        let outcome = Outcome::say("fin").clear_turn_context("horaires_arret_suivant");
        let body = serde_json::to_value(WebhookResponse::from_outcome(&outcome, SESSION)).unwrap();
        assert_eq!(body["outputContexts"][0]["lifespanCount"], 0);
        assert!(body["outputContexts"][0].get("parameters").is_none());
    }

    #[test]
    fn user_storage_is_serialized_as_string() {
        let mut storage = UserStorage::new();
        storage.set("arret", json!("Commerce"));
        let outcome = Outcome::say("ok").with_user_storage(storage);

        let body = serde_json::to_value(WebhookResponse::from_outcome(&outcome, SESSION)).unwrap();
        let raw = body["payload"]["google"]["userStorage"].as_str().unwrap();
        let parsed: Value = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed["data"]["arret"], "Commerce");
    }

    #[test]
    fn permission_reply_becomes_system_intent() {
        let outcome = Outcome {
            replies: vec![Reply::Permission {
                context: "Pour vous localiser".into(),
                permission: Permission::DevicePreciseLocation,
            }],
            ..Outcome::default()
        };

        let body = serde_json::to_value(WebhookResponse::from_outcome(&outcome, SESSION)).unwrap();
        let system = &body["payload"]["google"]["systemIntent"];
        assert_eq!(system["intent"], "actions.intent.PERMISSION");
        assert_eq!(system["data"]["optContext"], "Pour vous localiser");
        assert_eq!(system["data"]["permissions"][0], "DEVICE_PRECISE_LOCATION");
        assert_eq!(
            body["payload"]["google"]["richResponse"]["items"][0]["simpleResponse"]["textToSpeech"],
            "PLACEHOLDER"
        );
        assert_eq!(body["fulfillmentText"], "");
    }
}

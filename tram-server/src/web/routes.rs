//! HTTP route handlers.

use std::any::Any;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::conversation::{Conversation, WebhookRequest, WebhookResponse};

use super::dto::{ErrorResponse, StatusResponse};
use super::state::AppState;

/// Body of every 500 response.
const INTERNAL_ERROR_MESSAGE: &str = "Oops, something went wrong..";

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(status).post(fulfil))
        .route("/health", get(health))
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn status() -> Json<StatusResponse> {
    Json(StatusResponse { api: "ok" })
}

/// Dialogflow fulfilment webhook.
///
/// Every well-formed request gets a 200 with a spoken answer; only a body
/// that is not a webhook request is rejected.
async fn fulfil(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let request: WebhookRequest =
        serde_json::from_slice(&body).map_err(|e| AppError::BadRequest {
            message: format!("Invalid webhook request: {e}"),
        })?;

    let conv = Conversation::from_request(request);
    info!(intent = conv.intent(), session = conv.session(), "webhook request");

    let outcome = state.assistant.handle(&conv).await;
    Ok(Json(WebhookResponse::from_outcome(&outcome, conv.session())).into_response())
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    AppError::Internal {
        message: format!("handler panicked: {detail}"),
    }
    .into_response()
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(%message, "rejected request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Internal { message } => {
                error!(%message, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

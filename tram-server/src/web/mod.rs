//! Web layer: the Dialogflow fulfilment endpoint and liveness routes.

mod dto;
mod routes;
mod state;

pub use dto::{ErrorResponse, StatusResponse};
pub use routes::{AppError, create_router};
pub use state::AppState;

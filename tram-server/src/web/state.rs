//! Application state for the web layer.

use std::sync::Arc;

use crate::assistant::Assistant;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<Assistant>,
}

impl AppState {
    pub fn new(assistant: Assistant) -> Self {
        Self {
            assistant: Arc::new(assistant),
        }
    }
}

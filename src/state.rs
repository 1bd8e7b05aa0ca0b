//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkRegistry;
use crate::domain::repositories::LinkStore;

/// Handles shared by all requests.
///
/// The registry is the only component with access to the store; handlers
/// never talk to the store directly.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<LinkRegistry<dyn LinkStore>>,
}

impl AppState {
    pub fn new(registry: Arc<LinkRegistry<dyn LinkStore>>) -> Self {
        Self { registry }
    }
}

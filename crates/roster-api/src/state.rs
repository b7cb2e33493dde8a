//! Application state

use roster_core::RegistrationService;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RegistrationService>,
}

impl AppState {
    pub fn new(service: Arc<RegistrationService>) -> Self {
        Self { service }
    }
}

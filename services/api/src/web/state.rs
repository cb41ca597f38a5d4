//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use company_directory_core::ports::CompanyStore;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn CompanyStore>,
}

impl AppState {
    pub fn new(db: Arc<dyn CompanyStore>) -> Self {
        Self { db }
    }
}

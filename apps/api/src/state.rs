use std::sync::Arc;

use crate::store::ComplianceStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable store. `PgStore` in production, `MemoryStore` for local runs and tests.
    pub store: Arc<dyn ComplianceStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ComplianceStore>) -> Self {
        Self { store }
    }
}

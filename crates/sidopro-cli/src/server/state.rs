use std::sync::Arc;

use sidopro_core::{GeocodeClient, ProgressStore, RoleResolver};

/// Shared handles of the HTTP server.
#[derive(Clone)]
pub struct AppState {
    pub store: ProgressStore,
    pub geocoder: GeocodeClient,
    pub resolver: Arc<RoleResolver>,
}

impl AppState {
    pub fn new(store: ProgressStore, geocoder: GeocodeClient, resolver: RoleResolver) -> Self {
        Self {
            store,
            geocoder,
            resolver: Arc::new(resolver),
        }
    }
}

//! Shared state of the site service

use saray_client::ResourceClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Hosted database access; nothing is cached locally
    pub client: Arc<dyn ResourceClient>,
}

impl AppState {
    pub fn new(client: Arc<dyn ResourceClient>) -> Self {
        Self { client }
    }
}

use std::sync::Arc;

use crate::config::AppConfig;

/// Shared, read-only state for request handlers. Engine state is never
/// shared: each request builds its own analyzer.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

use anyway_config::Config;
use std::sync::Arc;

use crate::messaging_service::MessagingService;

/// Application context containing shared dependencies
///
/// Built once in `main` (or by the test harness) and shared by every
/// request handler through axum state.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub messaging: MessagingService,
}

impl AppContext {
    /// Creates a new application context
    pub fn new(config: Arc<Config>, messaging: MessagingService) -> Self {
        Self { config, messaging }
    }
}

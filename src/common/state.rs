// Application state shared across all modules

use std::sync::Arc;

use crate::services::directory::Directory;

/// Application state containing the Directory handle and token configuration
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn Directory>,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

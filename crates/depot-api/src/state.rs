//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use depot_auth::AccessController;
use depot_core::config::AppConfig;
use depot_service::{AuthService, FileService, SystemService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Every field is cheap
/// to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Token to user resolution
    pub access: AccessController,
    /// Registration and profiles
    pub users: UserService,
    /// Connect / disconnect
    pub auth: AuthService,
    /// File nodes and content
    pub files: FileService,
    /// Status and stats
    pub system: SystemService,
}

//! Application state - Dependency injection container.
//!
//! Provides handlers with the services and the session manager. Built once at
//! startup from an immutable `Config`.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::SessionManager;
use crate::services::{AuthService, ServiceContainer, Services, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Credential verification
    pub auth_service: Arc<dyn AuthService>,
    /// Password changes
    pub user_service: Arc<dyn UserService>,
    /// Session token issuing and verification
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    /// Create application state backed by the configured directory.
    pub fn from_config(config: &Config) -> Self {
        let container = Services::from_directory(config.directory.clone());
        Self::from_container(&container, Arc::new(SessionManager::new(&config.session)))
    }

    /// Create application state from a service container.
    pub fn from_container(container: &dyn ServiceContainer, sessions: Arc<SessionManager>) -> Self {
        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            sessions,
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        sessions: Arc<SessionManager>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            sessions,
        }
    }
}

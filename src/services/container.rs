//! Service Container - Centralized service access.
//!
//! Wires the directory adapter into both services once at startup.

use std::sync::Arc;

use super::{AuthService, Authenticator, UserManager, UserService};
use crate::config::DirectoryConfig;
use crate::infra::LdapDirectory;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
}

impl Services {
    /// Create service container backed by the configured directory
    pub fn from_directory(config: DirectoryConfig) -> Self {
        let directory = Arc::new(LdapDirectory::new(config));
        let auth_service = Arc::new(Authenticator::new(directory.clone()));
        let user_service = Arc::new(UserManager::new(directory));

        Self {
            auth_service,
            user_service,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }
}

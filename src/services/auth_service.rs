//! Authentication service - Verifies credentials against the directory.
//!
//! Obviously invalid input is rejected locally; everything else is delegated
//! to the directory, whose result is passed through unchanged.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Credentials, User};
use crate::errors::{AppError, AppResult};
use crate::infra::AuthRepository;

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Confirm the identity behind `credentials`
    async fn authenticate(&self, credentials: Credentials) -> AppResult<User>;
}

/// Concrete implementation of AuthService backed by a directory repository.
pub struct Authenticator {
    repo: Arc<dyn AuthRepository>,
}

impl Authenticator {
    pub fn new(repo: Arc<dyn AuthRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn authenticate(&self, credentials: Credentials) -> AppResult<User> {
        if credentials.username.is_empty() || credentials.password.is_empty() {
            return Err(AppError::validation("username and password are required"));
        }

        self.repo
            .authenticate(&credentials.username, &credentials.password)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockAuthRepository;

    const DN: &str = "CN=Alice,OU=Users,DC=example,DC=com";

    fn service(repo: MockAuthRepository) -> Authenticator {
        Authenticator::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_empty_credentials_never_reach_directory() {
        for (username, password) in [("", "correct"), ("alice", ""), ("", "")] {
            let mut repo = MockAuthRepository::new();
            repo.expect_authenticate().times(0);

            let result = service(repo)
                .authenticate(Credentials::new(username, password))
                .await;

            assert!(matches!(result, Err(AppError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut repo = MockAuthRepository::new();
        repo.expect_authenticate()
            .withf(|username, password| username == "alice" && password == "correct")
            .times(1)
            .returning(|username, _| Ok(User::new(username, DN)));

        let user = service(repo)
            .authenticate(Credentials::new("alice", "correct"))
            .await
            .unwrap();

        assert_eq!(user, User::new("alice", DN));
    }

    #[tokio::test]
    async fn test_directory_error_passes_through() {
        let mut repo = MockAuthRepository::new();
        repo.expect_authenticate()
            .times(1)
            .returning(|_, _| Err(AppError::DirectoryBind("invalid credentials".into())));

        let result = service(repo)
            .authenticate(Credentials::new("alice", "wrong"))
            .await;

        assert!(matches!(result, Err(AppError::DirectoryBind(_))));
    }
}

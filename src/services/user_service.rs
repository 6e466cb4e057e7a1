//! User service - Self-service password changes.
//!
//! Applies the minimal local policy (non-empty, minimum length) and delegates
//! the write to the directory.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{NewPassword, PasswordChange};
use crate::errors::AppResult;
use crate::infra::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Replace the user's password after verifying the current one
    async fn change_password(&self, change: PasswordChange) -> AppResult<()>;
}

/// Concrete implementation of UserService backed by a directory repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn change_password(&self, change: PasswordChange) -> AppResult<()> {
        let new_password = NewPassword::parse(&change.new_password)?;
        self.repo.change_password(&change, &new_password).await
    }
}

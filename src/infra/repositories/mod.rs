//! Repository layer - Directory access abstraction
//!
//! Two narrow capabilities over the directory backend: verifying a credential
//! pair and writing a password. Both are implemented by `LdapDirectory`; the
//! services depend only on these traits so they can be tested against fakes.

use async_trait::async_trait;

use crate::domain::{NewPassword, PasswordChange, User};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Can verify a credential pair.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Resolve the user's entry and bind as it with `password`.
    async fn authenticate(&self, username: &str, password: &str) -> AppResult<User>;
}

/// Can write a password.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Verify the current password, then replace it with `new_password`.
    async fn change_password(
        &self,
        change: &PasswordChange,
        new_password: &NewPassword,
    ) -> AppResult<()>;
}

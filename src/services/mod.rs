//! Application services layer - Use cases and business logic.
//!
//! Services apply local input checks and delegate to the directory through
//! the repository traits.

mod auth_service;
pub mod container;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;

//! Infrastructure layer - External systems integration
//!
//! - Directory (LDAP) client behind the repository traits
//! - Signed client-side session tokens

pub mod ldap;
pub mod repositories;
pub mod session;

pub use ldap::LdapDirectory;
pub use repositories::{AuthRepository, UserRepository};
pub use session::{SessionManager, SessionState};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockAuthRepository, MockUserRepository};

//! Domain layer - Core business entities and logic
//!
//! Directory users, the ephemeral credential and password-change requests,
//! and the new-password value object.

pub mod password;
pub mod user;

pub use password::NewPassword;
pub use user::{Credentials, PasswordChange, User};

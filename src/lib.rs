//! sspr-ldap - Self-service password reset against an LDAP directory
//!
//! Users sign in with their directory credentials and change their own
//! password. Identity is confirmed by binding to the directory as the user;
//! the session lives in a signed cookie.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Users, credentials and password values
//! - **services**: Credential verification and password changes
//! - **infra**: LDAP client and session tokens
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: htmx response fragments
//! - **utils**: HTML templates
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Test the directory settings
//! cargo run -- check
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;
pub mod utils;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Credentials, PasswordChange, User};
pub use errors::{AppError, AppResult};
pub use infra::{LdapDirectory, SessionManager};

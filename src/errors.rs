//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::response::{IntoResponse, Redirect, Response};
use thiserror::Error;

use crate::config::ROUTE_LOGIN;
use crate::types::Fragment;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Input rejected before the directory is contacted
    #[error("{0}")]
    Validation(String),

    #[error("Authentication required")]
    Unauthorized,

    // Directory stages
    #[error("directory connection failed: {0}")]
    DirectoryConnection(String),

    #[error("directory bind failed: {0}")]
    DirectoryBind(String),

    #[error("directory search failed: {0}")]
    DirectorySearch(String),

    #[error("directory modify failed: {0}")]
    DirectoryModify(String),

    // Corrupted, forged or expired session token
    #[error("session integrity check failed: {0}")]
    SessionIntegrity(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Validation reveals nothing about directory state
            AppError::Validation(msg) => msg.clone(),
            AppError::Unauthorized => self.to_string(),

            // Never leak which directory stage failed
            _ => "An internal error occurred".to_string(),
        }
    }

    /// Validation messages are shown as-is; everything else becomes `generic`.
    pub fn public_message(&self, generic: &str) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            _ => generic.to_string(),
        }
    }
}

/// htmx only swaps 2xx responses, so errors are rendered as inline fragments.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthorized => Redirect::to(ROUTE_LOGIN).into_response(),
            AppError::Validation(msg) => Fragment::error(msg).into_response(),
            other => {
                tracing::error!("{}", other);
                Fragment::error(other.user_message()).into_response()
            }
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

//! Session authentication middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::api::AppState;
use crate::errors::AppError;
use crate::infra::SessionState;

/// Authenticated user extracted from the session token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub username: String,
    pub user_dn: String,
}

/// Session authentication middleware.
///
/// Reads the session cookie and injects the CurrentUser into the request
/// extensions. Anonymous requests are redirected to the login page.
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let SessionState::Authenticated { username, user_dn } = state.sessions.state(&jar) else {
        tracing::debug!("{} access denied - not authenticated", request.uri().path());
        return Err(AppError::Unauthorized);
    };

    request
        .extensions_mut()
        .insert(CurrentUser { username, user_dn });

    Ok(next.run(request).await)
}

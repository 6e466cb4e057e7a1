//! Authentication handlers.

use axum::{
    extract::{rejection::FormRejection, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::api::AppState;
use crate::config::{
    MSG_AUTHENTICATION_FAILED, MSG_SESSION_FAILED, ROUTE_DASHBOARD, ROUTE_LOGIN, ROUTE_LOGOUT,
};
use crate::domain::Credentials;
use crate::types::{Fragment, HxRedirect};
use crate::utils::templates;

/// Login form body
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route(ROUTE_LOGIN, get(login_page).post(login))
        .route(ROUTE_LOGOUT, get(logout).post(logout))
}

/// Send visitors to the dashboard or the login page
pub async fn home(State(state): State<AppState>, jar: CookieJar) -> Redirect {
    if state.sessions.is_authenticated(&jar) {
        Redirect::to(ROUTE_DASHBOARD)
    } else {
        Redirect::to(ROUTE_LOGIN)
    }
}

/// Render the login form, or skip it when already signed in
pub async fn login_page(State(state): State<AppState>, jar: CookieJar) -> Response {
    if state.sessions.is_authenticated(&jar) {
        return Redirect::to(ROUTE_DASHBOARD).into_response();
    }

    Html(templates::login_page()).into_response()
}

/// Verify credentials and start an authenticated session
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Response {
    let Form(form) = match form {
        Ok(form) => form,
        Err(e) => {
            tracing::warn!("Rejected login request: {}", e);
            return Fragment::error(MSG_AUTHENTICATION_FAILED).into_response();
        }
    };

    let username = form.username.clone();
    let credentials = Credentials::new(form.username, form.password);

    let user = match state.auth_service.authenticate(credentials).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(%username, "Authentication failed: {}", e);
            return Fragment::error(MSG_AUTHENTICATION_FAILED).into_response();
        }
    };

    // The cookie must travel with this response's headers
    let jar = match state.sessions.set_authenticated(jar, &user.username, &user.dn) {
        Ok(jar) => jar,
        Err(e) => {
            tracing::error!("Failed to save session: {}", e);
            return Fragment::error(MSG_SESSION_FAILED).into_response();
        }
    };

    tracing::info!("Session created for user: {}", user.username);

    (jar, HxRedirect(ROUTE_DASHBOARD)).into_response()
}

/// End the session and return to the login page
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    match state.sessions.clear(jar) {
        Ok(jar) => (jar, Redirect::to(ROUTE_LOGIN)).into_response(),
        Err(e) => {
            tracing::error!("Failed to clear session: {}", e);
            Redirect::to(ROUTE_LOGIN).into_response()
        }
    }
}

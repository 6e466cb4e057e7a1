//! User handlers - dashboard and password change.
//!
//! All routes here sit behind `session_middleware`.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use validator::Validate;

use crate::api::extractors::ValidatedForm;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::{
    MSG_PASSWORD_CHANGED, MSG_PASSWORD_CHANGE_FAILED, ROUTE_CHANGE_PASSWORD, ROUTE_DASHBOARD,
};
use crate::domain::PasswordChange;
use crate::types::Fragment;
use crate::utils::templates;

/// Change-password form body
#[derive(Deserialize, Validate)]
pub struct ChangePasswordForm {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    #[validate(must_match(other = "new_password", message = "New passwords do not match"))]
    pub confirm_password: String,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(ROUTE_DASHBOARD, get(dashboard))
        .route(
            ROUTE_CHANGE_PASSWORD,
            get(change_password_page).post(change_password),
        )
}

pub async fn dashboard(Extension(user): Extension<CurrentUser>) -> Html<String> {
    tracing::info!("Dashboard accessed by user: {}", user.username);
    Html(templates::dashboard_page(&user.username))
}

pub async fn change_password_page(Extension(user): Extension<CurrentUser>) -> Html<String> {
    Html(templates::change_password_page(&user.username))
}

/// Change the signed-in user's directory password
pub async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedForm(form): ValidatedForm<ChangePasswordForm>,
) -> Response {
    let change = PasswordChange {
        username: user.username.clone(),
        user_dn: user.user_dn,
        current_password: form.current_password,
        new_password: form.new_password,
    };

    match state.user_service.change_password(change).await {
        Ok(()) => {
            tracing::info!("Password changed for user: {}", user.username);
            Fragment::success(MSG_PASSWORD_CHANGED).into_response()
        }
        Err(e) => {
            // Full detail stays in the log; the client only sees validation messages
            tracing::warn!("Password change failed for user {}: {}", user.username, e);
            Fragment::error(e.public_message(MSG_PASSWORD_CHANGE_FAILED)).into_response()
        }
    }
}

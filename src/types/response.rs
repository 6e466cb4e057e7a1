use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::config::{ERROR_TARGET, SUCCESS_TARGET};
use crate::utils::templates::escape_html;

pub const HX_RETARGET: HeaderName = HeaderName::from_static("hx-retarget");
pub const HX_RESWAP: HeaderName = HeaderName::from_static("hx-reswap");
pub const HX_REDIRECT: HeaderName = HeaderName::from_static("hx-redirect");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    Error,
    Success,
}

/// Inline htmx fragment swapped into the error or success container.
#[derive(Debug)]
pub struct Fragment {
    pub kind: FragmentKind,
    pub message: String,
}

impl Fragment {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FragmentKind::Error,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FragmentKind::Success,
            message: message.into(),
        }
    }

    fn target(&self) -> &'static str {
        match self.kind {
            FragmentKind::Error => ERROR_TARGET,
            FragmentKind::Success => SUCCESS_TARGET,
        }
    }

    /// Rendered markup for the fragment body.
    pub fn render(&self) -> String {
        let class = match self.kind {
            FragmentKind::Error => "text-red-600 text-sm",
            FragmentKind::Success => "text-green-600 text-sm",
        };
        format!(
            r#"<div class="{}">{}</div>"#,
            class,
            escape_html(&self.message)
        )
    }
}

impl IntoResponse for Fragment {
    fn into_response(self) -> Response {
        let body = self.render();
        (
            StatusCode::OK,
            [
                (HX_RETARGET, HeaderValue::from_static(self.target())),
                (HX_RESWAP, HeaderValue::from_static("innerHTML")),
            ],
            Html(body),
        )
            .into_response()
    }
}

/// Client-side redirect instruction for htmx requests.
#[derive(Debug)]
pub struct HxRedirect(pub &'static str);

impl IntoResponse for HxRedirect {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [(HX_REDIRECT, HeaderValue::from_static(self.0))],
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_fragment_headers() {
        let response = Fragment::error("Authentication failed").into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(HX_RETARGET).unwrap(), "#error-message");
        assert_eq!(response.headers().get(HX_RESWAP).unwrap(), "innerHTML");
    }

    #[test]
    fn test_success_fragment_targets_success_container() {
        let response = Fragment::success("done").into_response();
        assert_eq!(response.headers().get(HX_RETARGET).unwrap(), "#success-message");
    }

    #[test]
    fn test_fragment_escapes_message() {
        let fragment = Fragment::error("<script>");
        assert_eq!(
            fragment.render(),
            r#"<div class="text-red-600 text-sm">&lt;script&gt;</div>"#
        );
    }

    #[test]
    fn test_hx_redirect() {
        let response = HxRedirect("/dashboard").into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(HX_REDIRECT).unwrap(), "/dashboard");
    }
}

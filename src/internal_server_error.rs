//! The page shown when the server cannot finish a request.
//!
//! Handlers reach it through [crate::Error]'s `IntoResponse` impl, the logging
//! middleware uses it when a body cannot be read, and it is also served at
//! [crate::endpoints::INTERNAL_ERROR_VIEW].
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// A 500 page with a short description of what failed and what the user can do.
#[derive(Debug, Clone, PartialEq)]
pub struct InternalServerError {
    pub description: String,
    pub fix: String,
}

impl InternalServerError {
    pub fn new(description: impl Into<String>, fix: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            fix: fix.into(),
        }
    }

    /// The page for a server configured with a timezone that `time-tz` does not know.
    pub fn invalid_timezone(timezone: &str) -> Self {
        Self::new(
            "The server's timezone setting is not valid.",
            format!(
                "\"{timezone}\" is not a canonical timezone name such as \"Asia/Kolkata\". \
                Fix the --timezone option or the LOCAL_TIMEZONE variable and restart the server."
            ),
        )
    }

    fn into_html(self) -> Html<String> {
        Html(error_view("Internal Server Error", "500", &self.description, &self.fix).into_string())
    }
}

impl Default for InternalServerError {
    fn default() -> Self {
        Self::new(
            "Your expenses could not be loaded or saved right now.",
            "Try again in a moment. If it keeps happening, check the server logs.",
        )
    }
}

impl IntoResponse for InternalServerError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.into_html()).into_response()
    }
}

pub async fn get_internal_server_error_page() -> Response {
    InternalServerError::default().into_response()
}

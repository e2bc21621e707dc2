//! Error handling module for the OG image service.
//!
//! Provides the service error type with mapping to HTTP status codes and
//! plain-text response bodies. Internal details are logged, never sent to clients.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const UPSTREAM_ERROR: &str = "UPSTREAM_ERROR";
    pub const RENDER_ERROR: &str = "RENDER_ERROR";
    pub const CONFIGURATION_ERROR: &str = "CONFIGURATION_ERROR";
}

/// Body sent for any failure while producing a preview image.
pub const IMAGE_FAILURE_MESSAGE: &str = "Failed to generate OG image";

/// Body sent when the SPA shell cannot be served.
pub const PAGE_FAILURE_MESSAGE: &str = "Failed to render page.";

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Caller omitted a required parameter
    BadRequest(String),
    /// Repository metadata could not be fetched
    Upstream(String),
    /// Browser automation failed
    Render(String),
    /// A required local asset or setting is missing or invalid
    Configuration(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => codes::BAD_REQUEST,
            AppError::Upstream(_) => codes::UPSTREAM_ERROR,
            AppError::Render(_) => codes::RENDER_ERROR,
            AppError::Configuration(_) => codes::CONFIGURATION_ERROR,
        }
    }

    /// Get the internal error message.
    pub fn message(&self) -> &str {
        match self {
            AppError::BadRequest(msg) => msg,
            AppError::Upstream(msg) => msg,
            AppError::Render(msg) => msg,
            AppError::Configuration(msg) => msg,
        }
    }

    /// The body shown to clients.
    ///
    /// Caller errors echo their message; server-side failures use a fixed text.
    pub fn public_message(&self) -> &str {
        match self {
            AppError::BadRequest(msg) => msg,
            AppError::Upstream(_) | AppError::Render(_) => IMAGE_FAILURE_MESSAGE,
            AppError::Configuration(_) => PAGE_FAILURE_MESSAGE,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("Upstream error: {:?}", err);
        AppError::Upstream(format!("Upstream error: {}", err))
    }
}

impl From<chromiumoxide::error::CdpError> for AppError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        tracing::error!("Browser error: {:?}", err);
        AppError::Render(format!("Browser error: {}", err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.public_message().to_string(),
        )
            .into_response()
    }
}

//! Application error types and HTTP response mapping.
//!
//! Defines `AppError` enum for every failure the browser can hit and
//! implements Axum's `IntoResponse` (JSON error body) for the `/api/v1`
//! routes. The htmx fragment routes render the same errors through
//! `AppError::to_fragment` instead.
//!
//! Error mappings:
//! - `InvalidReference`, `InvalidPath`, `InvalidParams`, `NotAFile`,
//!   `NotADirectory` → 400
//! - `RemoteRateLimited` → 429
//! - `RemoteApi` → 404 when upstream said 404, otherwise 502
//! - `DownloadFailed`, `MissingDownloadUrl`, `Http` → 502
//! - `Internal` → 500

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use maud::html;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid repository reference: {0}")]
    InvalidReference(String),

    #[error("Remote API error: HTTP {status}")]
    RemoteApi { status: u16 },

    #[error("Remote API rate limit reached, wait a moment or configure an access token")]
    RemoteRateLimited,

    #[error("Not a file: {0}")]
    NotAFile(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Download failed: HTTP {status}")]
    DownloadFailed { status: u16 },

    #[error("File has no download location: {0}")]
    MissingDownloadUrl(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Request to remote API failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidReference(_)
            | AppError::InvalidPath(_)
            | AppError::InvalidParams(_)
            | AppError::NotAFile(_)
            | AppError::NotADirectory(_) => StatusCode::BAD_REQUEST,
            AppError::RemoteRateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::RemoteApi { status: 404 } => StatusCode::NOT_FOUND,
            AppError::RemoteApi { .. }
            | AppError::DownloadFailed { .. }
            | AppError::MissingDownloadUrl(_)
            | AppError::Http(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-facing message. Transport errors are summarized so upstream URLs
    /// (which may carry query tokens) are not echoed back.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Http(e) if e.is_timeout() => "Remote API did not answer in time".to_string(),
            AppError::Http(e) if e.is_decode() => {
                "Unexpected response from the remote API".to_string()
            }
            AppError::Http(_) => "Could not reach the remote API".to_string(),
            other => other.to_string(),
        }
    }

    /// Render the error as an HTML fragment for htmx swaps.
    pub fn to_fragment(&self) -> Response {
        let rate_limited = matches!(self, AppError::RemoteRateLimited);
        let markup = html! {
            div class="error" role="alert" {
                p { (self.user_message()) }
                @if rate_limited {
                    p class="hint" {
                        "Start the server with --token (or GITHUB_TOKEN) for a higher limit."
                    }
                }
            }
        };
        (self.status_code(), Html(markup.into_string())).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.user_message(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_is_distinct_from_other_remote_failures() {
        assert_eq!(AppError::RemoteRateLimited.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(AppError::RemoteApi { status: 500 }.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(AppError::RemoteApi { status: 404 }.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn user_errors_are_bad_requests() {
        assert_eq!(AppError::InvalidReference("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotAFile("src".into()).status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn messages_report_the_status() {
        let msg = AppError::DownloadFailed { status: 503 }.user_message();
        assert!(msg.contains("503"));
    }
}

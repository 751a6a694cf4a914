//! HTTP mapping for core errors.

use api_shared::ErrorRes;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use folio_core::{BlogError, ErrorKind};

/// Error returned by every handler.
///
/// Client errors carry their message; server errors are logged and answered generically so
/// storage paths and parser internals never leave the process.
#[derive(Debug)]
pub struct ApiError(BlogError);

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Parse | ErrorKind::Storage | ErrorKind::Config => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<BlogError> for ApiError {
    fn from(err: BlogError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(BlogError::InvalidInput(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
            "internal error".to_owned()
        } else {
            tracing::debug!(status = status.as_u16(), error = %self.0, "request rejected");
            self.0.to_string()
        };

        (status, Json(ErrorRes { error })).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

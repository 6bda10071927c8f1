use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Trait for converting errors into JSON HTTP responses.
///
/// # Example
///
/// ```ignore
/// use greeter_kit::HttpError;
///
/// #[derive(Debug)]
/// struct NotFound;
///
/// impl HttpError for NotFound {
///     fn status_code(&self) -> StatusCode {
///         StatusCode::NOT_FOUND
///     }
///
///     fn message(&self) -> String {
///         "Resource not found".into()
///     }
/// }
/// ```
pub trait HttpError: std::fmt::Debug {
    fn status_code(&self) -> StatusCode;
    fn message(&self) -> String;

    fn error_code(&self) -> String {
        status_to_error_code(self.status_code())
    }

    fn into_http_response(self) -> Response
    where
        Self: Sized,
    {
        let body = ErrorResponse::new(self.error_code(), self.message());
        (self.status_code(), axum::Json(body)).into_response()
    }
}

/// JSON error body: `{"code": "NOT_FOUND", "message": "..."}`.
#[derive(Debug, Serialize, Clone)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn from_status(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: status_to_error_code(status),
            message: message.into(),
        }
    }
}

/// "Not Found" -> "NOT_FOUND".
pub(crate) fn status_to_error_code(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("ERROR")
        .to_uppercase()
        .replace(' ', "_")
}

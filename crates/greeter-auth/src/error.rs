use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use greeter_kit::HttpError;
use std::fmt;

/// Reasons a request fails authentication. All map to 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization` header, or no principal on the request.
    MissingToken,
    /// `Authorization` names a scheme nobody registered.
    UnknownScheme(String),
    /// Malformed token, bad signature, wrong issuer or audience.
    InvalidToken(String),
    /// Token has expired.
    TokenExpired,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingToken => write!(f, "Missing authorization token"),
            Self::UnknownScheme(scheme) => {
                write!(f, "Unsupported authentication scheme: {}", scheme)
            }
            Self::InvalidToken(msg) => write!(f, "Invalid token: {}", msg),
            Self::TokenExpired => write!(f, "Token has expired"),
        }
    }
}

impl std::error::Error for AuthError {}

impl HttpError for AuthError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn message(&self) -> String {
        self.to_string()
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn display_messages() {
        assert_eq!(AuthError::TokenExpired.to_string(), "Token has expired");
        assert_eq!(
            AuthError::UnknownScheme("Basic".into()).to_string(),
            "Unsupported authentication scheme: Basic"
        );
    }

    #[tokio::test]
    async fn renders_json_401() {
        let response = AuthError::InvalidToken("InvalidSignature".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "UNAUTHORIZED");
        assert_eq!(json["message"], "Invalid token: InvalidSignature");
    }
}

use axum::http::HeaderMap;

use crate::{AuthError, Principal};

/// Outcome of running one authentication scheme against a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationResult {
    Success(Principal),
    Failure(AuthError),
    /// The scheme had nothing to say about this request.
    NoResult,
}

impl AuthenticationResult {
    /// `Failure` and `NoResult` both reject; `NoResult` becomes `MissingToken`.
    pub fn into_result(self) -> Result<Principal, AuthError> {
        match self {
            Self::Success(principal) => Ok(principal),
            Self::Failure(err) => Err(err),
            Self::NoResult => Err(AuthError::MissingToken),
        }
    }
}

/// Turns request credentials into an [`AuthenticationResult`].
///
/// Implementations are registered by [`name`](Self::name) in a
/// [`SchemeRegistry`](crate::SchemeRegistry) and shared across requests.
pub trait AuthenticationScheme: Send + Sync + 'static {
    /// Scheme token as it appears in `Authorization: <name> ...`.
    fn name(&self) -> &str;

    fn authenticate(&self, headers: &HeaderMap) -> AuthenticationResult;
}

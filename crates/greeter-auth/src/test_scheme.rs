//! Header-driven scheme for integration tests.
//!
//! Skips credential checks entirely: the caller's identifier comes from the
//! `UserId` header, or from [`TestAuthOptions::default_user_id`] when absent.

use axum::http::HeaderMap;

use crate::{AuthenticationResult, AuthenticationScheme, Claim, ClaimType, Identity, Principal};

/// Fixed when the scheme is built.
#[derive(Debug, Clone, Default)]
pub struct TestAuthOptions {
    pub default_user_id: String,
}

/// Always succeeds. Never register this outside tests.
#[derive(Debug, Clone)]
pub struct TestAuthScheme {
    options: TestAuthOptions,
}

impl TestAuthScheme {
    pub const SCHEME: &'static str = "Test";
    pub const USER_ID_HEADER: &'static str = "UserId";
    pub const DISPLAY_NAME: &'static str = "Test user";

    pub fn new(options: TestAuthOptions) -> Self {
        Self { options }
    }

    /// Identity for a request carrying `headers`.
    pub fn resolve(&self, headers: &HeaderMap) -> Principal {
        let user_id = headers
            .get(Self::USER_ID_HEADER)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .unwrap_or_else(|| self.options.default_user_id.clone());

        tracing::debug!(%user_id, "Test scheme resolved identity");

        Principal::new(Identity::new(
            Self::SCHEME,
            vec![
                Claim::new(ClaimType::Name, Self::DISPLAY_NAME),
                Claim::new(ClaimType::NameIdentifier, user_id),
            ],
        ))
    }
}

impl AuthenticationScheme for TestAuthScheme {
    fn name(&self) -> &str {
        Self::SCHEME
    }

    fn authenticate(&self, headers: &HeaderMap) -> AuthenticationResult {
        AuthenticationResult::Success(self.resolve(headers))
    }
}

use axum::http::{header, HeaderMap};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::{AuthError, AuthenticationResult, AuthenticationScheme};

/// Schemes keyed by case-insensitive name.
///
/// The scheme token of the `Authorization` header picks which scheme runs:
///
/// ```rust,ignore
/// let registry = SchemeRegistry::new().with_scheme(JwtBearerScheme::new(jwt_config));
/// // `Authorization: Bearer eyJ...` -> JwtBearerScheme
/// ```
#[derive(Clone, Default)]
pub struct SchemeRegistry {
    schemes: BTreeMap<String, Arc<dyn AuthenticationScheme>>,
}

impl SchemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `scheme`, replacing any scheme with the same name.
    pub fn with_scheme(mut self, scheme: impl AuthenticationScheme) -> Self {
        let key = scheme.name().to_ascii_lowercase();
        if self.schemes.insert(key, Arc::new(scheme)).is_some() {
            tracing::debug!("Replaced previously registered authentication scheme");
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn AuthenticationScheme> {
        self.schemes
            .get(&name.to_ascii_lowercase())
            .map(|scheme| &**scheme)
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }

    /// Value for `WWW-Authenticate` on rejected requests, e.g. `Bearer, Test`.
    pub fn challenge(&self) -> String {
        self.schemes
            .values()
            .map(|scheme| scheme.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Dispatch to the scheme named by the `Authorization` header.
    pub fn authenticate(&self, headers: &HeaderMap) -> AuthenticationResult {
        let Some(value) = headers.get(header::AUTHORIZATION) else {
            return AuthenticationResult::NoResult;
        };

        let Ok(value) = value.to_str() else {
            return AuthenticationResult::Failure(AuthError::InvalidToken(
                "authorization header is not valid ASCII".to_string(),
            ));
        };

        let requested = value.split_whitespace().next().unwrap_or_default();

        match self.get(requested) {
            Some(scheme) => scheme.authenticate(headers),
            None => {
                tracing::debug!(scheme = requested, "No authentication scheme registered");
                AuthenticationResult::Failure(AuthError::UnknownScheme(requested.to_string()))
            }
        }
    }
}

impl fmt::Debug for SchemeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemeRegistry")
            .field("schemes", &self.challenge())
            .finish()
    }
}

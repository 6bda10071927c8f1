//! Claims, identities and the request principal.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::fmt;

use crate::AuthError;

/// Kind of a [`Claim`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClaimType {
    /// Display name.
    Name,
    /// Unique identifier of the caller.
    NameIdentifier,
    Other(String),
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => f.write_str("name"),
            Self::NameIdentifier => f.write_str("nameidentifier"),
            Self::Other(kind) => f.write_str(kind),
        }
    }
}

/// A typed fact about the caller. Values are opaque strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    kind: ClaimType,
    value: String,
}

impl Claim {
    pub fn new(kind: ClaimType, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn kind(&self) -> &ClaimType {
        &self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Ordered claims plus the name of the scheme that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    scheme: String,
    claims: Vec<Claim>,
}

impl Identity {
    pub fn new(scheme: impl Into<String>, claims: Vec<Claim>) -> Self {
        Self {
            scheme: scheme.into(),
            claims,
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// First claim of `kind`, in insertion order.
    pub fn find_first(&self, kind: &ClaimType) -> Option<&Claim> {
        self.claims.iter().find(|c| c.kind() == kind)
    }
}

/// The authenticated caller of the current request.
///
/// Inserted into request extensions by [`AuthLayer`](crate::AuthLayer) and
/// extracted by handlers:
///
/// ```rust,ignore
/// async fn whoami(principal: Principal) -> String {
///     principal.find_first_value(&ClaimType::NameIdentifier).unwrap_or_default().to_string()
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    identity: Identity,
}

impl Principal {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn find_first_value(&self, kind: &ClaimType) -> Option<&str> {
        self.identity.find_first(kind).map(Claim::value)
    }
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Only reachable without a principal when a handler is mounted outside the auth layer.
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}

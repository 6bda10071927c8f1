//! JWT bearer scheme: `Authorization: Bearer <token>` validated with an HMAC secret.

use axum::http::HeaderMap;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    AuthError, AuthenticationResult, AuthenticationScheme, Claim, ClaimType, Identity, Principal,
};

/// Keys and validation rules for bearer tokens.
///
/// Deserializes from `{ secret, issuer?, audience? }`, so it can sit in the
/// app config under `jwt`.
#[derive(Clone)]
pub struct JwtConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<'de> Deserialize<'de> for JwtConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            secret: String,
            #[serde(default)]
            issuer: Option<String>,
            #[serde(default)]
            audience: Option<String>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let mut config = Self::new(&raw.secret);
        if let Some(issuer) = raw.issuer {
            config = config.with_issuer(issuer);
        }
        if let Some(audience) = raw.audience {
            config = config.with_audience(audience);
        }
        Ok(config)
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.validation.iss)
            .field("audience", &self.validation.aud)
            .finish()
    }
}

impl JwtConfig {
    /// HS256 with `exp` checked. Issuer and audience are unchecked until set.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.validation.set_issuer(&[issuer.into()]);
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.validation.set_audience(&[audience.into()]);
        self
    }

    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, AuthError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, AuthError> {
        decode::<T>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })
    }
}

/// Registered claims carried by greeter tokens.
///
/// Only `exp` is required. `iss` and `aud` are checked by [`JwtConfig`]'s
/// validation before these claims are read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject; becomes the caller's unique identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,
}

/// `aud` is either a single string or an array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

impl TokenClaims {
    /// Claims for `sub` expiring `expires_in_secs` from now.
    pub fn new(sub: impl Into<String>, expires_in_secs: u64) -> Self {
        let now = now();
        Self {
            sub: Some(sub.into()),
            exp: now + expires_in_secs,
            iat: Some(now),
            name: None,
            iss: None,
            aud: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.iss = Some(issuer.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.aud = Some(Audience::One(audience.into()));
        self
    }

    fn into_identity(self) -> Identity {
        let mut claims = Vec::with_capacity(2);
        if let Some(name) = self.name {
            claims.push(Claim::new(ClaimType::Name, name));
        }
        if let Some(sub) = self.sub {
            claims.push(Claim::new(ClaimType::NameIdentifier, sub));
        }
        Identity::new(JwtBearerScheme::SCHEME, claims)
    }
}

/// Production scheme backed by [`JwtConfig`].
#[derive(Debug, Clone)]
pub struct JwtBearerScheme {
    config: JwtConfig,
}

impl JwtBearerScheme {
    pub const SCHEME: &'static str = "Bearer";

    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }
}

impl AuthenticationScheme for JwtBearerScheme {
    fn name(&self) -> &str {
        Self::SCHEME
    }

    fn authenticate(&self, headers: &HeaderMap) -> AuthenticationResult {
        let bearer = match headers.typed_try_get::<Authorization<Bearer>>() {
            Ok(Some(Authorization(bearer))) => bearer,
            Ok(None) => return AuthenticationResult::NoResult,
            Err(_) => {
                return AuthenticationResult::Failure(AuthError::InvalidToken(
                    "malformed bearer credentials".to_string(),
                ))
            }
        };

        match self.config.decode::<TokenClaims>(bearer.token()) {
            Ok(claims) => AuthenticationResult::Success(Principal::new(claims.into_identity())),
            Err(err) => {
                tracing::debug!(error = %err, "Bearer token rejected");
                AuthenticationResult::Failure(err)
            }
        }
    }
}

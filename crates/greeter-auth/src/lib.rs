//! Authentication for the greeter service.
//!
//! Requests on protected routes are matched to an [`AuthenticationScheme`] by
//! the scheme token of their `Authorization` header. A successful scheme
//! yields a [`Principal`] that handlers extract directly; everything else is
//! answered with 401 and a `WWW-Authenticate` challenge.
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use greeter_auth::{AuthExt, JwtBearerScheme, JwtConfig, SchemeRegistry};
//!
//! let registry = SchemeRegistry::new()
//!     .with_scheme(JwtBearerScheme::new(JwtConfig::new("your-secret-key")));
//!
//! let app = Router::new()
//!     .route("/protected", get(handler))
//!     .with_auth(registry);
//! ```
//!
//! ## Features
//!
//! - `jwt` (default) - [`JwtBearerScheme`] backed by `jsonwebtoken`
//! - `test-util` - [`TestAuthScheme`], which trusts a `UserId` header

#[cfg(feature = "jwt")]
mod jwt;
#[cfg(any(test, feature = "test-util"))]
mod test_scheme;

mod error;
mod identity;
mod layer;
mod registry;
mod scheme;

pub use error::AuthError;
pub use identity::{Claim, ClaimType, Identity, Principal};
pub use layer::{AuthExt, AuthLayer};
pub use registry::SchemeRegistry;
pub use scheme::{AuthenticationResult, AuthenticationScheme};

#[cfg(feature = "jwt")]
pub use jwt::{Audience, JwtBearerScheme, JwtConfig, TokenClaims};

#[cfg(any(test, feature = "test-util"))]
pub use test_scheme::{TestAuthOptions, TestAuthScheme};

//! The greeter service: one authenticated endpoint, `GET /hi`.
//!
//! [`app`] takes the scheme registry as an argument so tests can swap the
//! production bearer scheme for a fake one.

mod config;
mod handlers;

use axum::routing::get;
use axum::Router;
use greeter_auth::{AuthExt, JwtBearerScheme, SchemeRegistry};
use greeter_kit::{RouterExt, ServerConfig};

pub use config::AppConfig;
pub use handlers::{greeting, hi};

/// Routes without server middleware. Only `/hi` requires authentication.
pub fn routes(registry: SchemeRegistry) -> Router {
    Router::new()
        .route("/hi", get(hi))
        .with_auth(registry)
        .with_health_check()
}

/// The full application: routes, fallback and the default layer stack.
pub fn app(config: &impl AsRef<ServerConfig>, registry: SchemeRegistry) -> Router {
    routes(registry)
        .with_fallback(config)
        .with_default_layers(config)
}

/// Schemes used outside of tests: JWT bearer only.
pub fn production_schemes(config: &AppConfig) -> SchemeRegistry {
    SchemeRegistry::new().with_scheme(JwtBearerScheme::new(config.jwt.clone()))
}

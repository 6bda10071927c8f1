//! Router extension traits.

use axum::handler::HandlerWithoutStateExt;
use axum::Router;
use tower_http::services::ServeDir;

use crate::routes::{fallback_handler, health_routes};
use crate::ServerConfig;

/// Chainable server helpers on [`Router`].
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get};
/// use greeter_kit::RouterExt;
///
/// let app = Router::new()
///     .route("/hi", get(hi))
///     .with_health_check()
///     .with_fallback(&config)
///     .with_default_layers(&config);
///
/// app.serve(&config).await?;
/// ```
pub trait RouterExt: Sized {
    /// Adds `GET /health`.
    fn with_health_check(self) -> Self;

    /// Handles unmatched paths.
    ///
    /// When `static_dir` is configured, files under it are served first;
    /// anything else gets a JSON 404.
    fn with_fallback(self, config: &impl AsRef<ServerConfig>) -> Self;

    /// Applies the default middleware stack.
    ///
    /// Layers applied (innermost to outermost):
    /// - `CatchPanicLayer` - Converts panics to 500 responses
    /// - `SetRequestIdLayer` / `PropagateRequestIdLayer` - X-Request-Id handling
    /// - `TraceLayer` - Request/response logging with latency
    /// - `TimeoutLayer` - Request timeout from config
    /// - `CompressionLayer` - Response compression (feature: `compression`)
    /// - `Strict-Transport-Security` header in production
    /// - `JsonErrorLayer` - Converts error responses to JSON (outermost)
    fn with_default_layers(self, config: &impl AsRef<ServerConfig>) -> Self;

    /// Serve the router with graceful shutdown on SIGINT/SIGTERM.
    fn serve(
        self,
        config: &(impl AsRef<ServerConfig> + Sync),
    ) -> impl std::future::Future<Output = Result<(), crate::ServerError>> + Send;
}

impl RouterExt for Router {
    fn with_health_check(self) -> Self {
        self.merge(health_routes())
    }

    fn with_fallback(self, config: &impl AsRef<ServerConfig>) -> Self {
        match &config.as_ref().static_dir {
            Some(dir) => {
                tracing::debug!(dir = %dir.display(), "Serving static files");
                self.fallback_service(
                    ServeDir::new(dir)
                        .call_fallback_on_method_not_allowed(true)
                        .not_found_service(fallback_handler.into_service()),
                )
            }
            None => self.fallback(fallback_handler),
        }
    }

    fn with_default_layers(self, config: &impl AsRef<ServerConfig>) -> Self {
        crate::layer::default_layers(self, config.as_ref())
    }

    async fn serve(
        self,
        config: &(impl AsRef<ServerConfig> + Sync),
    ) -> Result<(), crate::ServerError> {
        crate::server::serve_router(self, config).await
    }
}

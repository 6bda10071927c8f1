use axum::body::Body;
use axum::http::{header, HeaderValue, Request};
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

use crate::{AuthError, SchemeRegistry};

/// Rejects requests no registered scheme authenticates; otherwise stores the
/// [`Principal`](crate::Principal) in the request extensions.
#[derive(Clone)]
pub struct AuthLayer {
    registry: Arc<SchemeRegistry>,
}

impl AuthLayer {
    pub fn new(registry: SchemeRegistry) -> Self {
        if registry.is_empty() {
            tracing::warn!("Authentication layer has no schemes; every request will be rejected");
        }
        Self {
            registry: Arc::new(registry),
        }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthService {
            inner,
            registry: Arc::clone(&self.registry),
        }
    }
}

#[derive(Clone)]
pub struct AuthService<S> {
    inner: S,
    registry: Arc<SchemeRegistry>,
}

impl<S> Service<Request<Body>> for AuthService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let outcome = self.registry.authenticate(req.headers()).into_result();

        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let registry = Arc::clone(&self.registry);

        Box::pin(async move {
            match outcome {
                Ok(principal) => {
                    tracing::debug!(scheme = principal.identity().scheme(), "Request authenticated");
                    req.extensions_mut().insert(principal);
                    inner.call(req).await
                }
                Err(err) => {
                    tracing::info!(error = %err, path = %req.uri().path(), "Request rejected");
                    Ok(challenge(err, &registry))
                }
            }
        })
    }
}

fn challenge(err: AuthError, registry: &SchemeRegistry) -> Response {
    let mut response = err.into_response();
    if let Ok(value) = HeaderValue::from_str(&registry.challenge()) {
        if !value.is_empty() {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, value);
        }
    }
    response
}

/// Extension trait for protecting a [`Router`]'s routes.
pub trait AuthExt {
    /// Require authentication on every route registered so far.
    ///
    /// Uses `route_layer`, so unmatched paths still fall through to 404.
    fn with_auth(self, registry: SchemeRegistry) -> Self;
}

impl<S> AuthExt for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_auth(self, registry: SchemeRegistry) -> Self {
        self.route_layer(AuthLayer::new(registry))
    }
}

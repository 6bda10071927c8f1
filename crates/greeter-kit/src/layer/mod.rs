mod json_error;
mod trace;

use axum::http::{header, HeaderValue, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

#[cfg(feature = "compression")]
use tower_http::compression::CompressionLayer;

use crate::ServerConfig;
use trace::DefaultTraceLayer;

pub use json_error::JsonErrorLayer;

/// 30 days.
const HSTS_VALUE: &str = "max-age=2592000";

/// Applies the default middleware stack to a router.
pub(crate) fn default_layers(router: Router, config: &ServerConfig) -> Router {
    // Responses travel bottom to top:
    //   Handler -> CatchPanic -> RequestId -> Trace -> Timeout -> Compression -> HSTS -> JsonError
    // JsonErrorLayer is added last so it sees panics and timeouts too.

    let router = router
        .layer(CatchPanicLayer::new())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(DefaultTraceLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout(),
        ));

    #[cfg(feature = "compression")]
    let router = router.layer(CompressionLayer::new());

    let router = if config.environment.is_production() {
        router.layer(SetResponseHeaderLayer::if_not_present(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static(HSTS_VALUE),
        ))
    } else {
        router
    };

    router.layer(JsonErrorLayer::new(config.environment))
}

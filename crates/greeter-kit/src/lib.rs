//! # greeter-kit
//!
//! Server plumbing shared by the greeter service and its test harness.
//!
//! Provides configuration loading, environment detection, logging setup,
//! JSON error bodies, the default tower middleware stack and graceful serving.
//!
//! ## Features
//!
//! - `tracing` - Enable logging initialization with tracing-subscriber
//! - `compression` - Response compression in the default layer stack

mod config;
mod environment;
mod error;
mod layer;
mod logging;
mod router;
mod routes;
mod server;

pub use config::{ConfigBuilder, ConfigError, ConfigFormat, ServerConfig};
pub use environment::Environment;
pub use error::{ErrorResponse, HttpError};
pub use layer::JsonErrorLayer;
pub use logging::LogFormat;
pub use router::RouterExt;
pub use routes::{fallback_handler, health_routes};
pub use server::{serve_router, ServerError};

pub use axum::http::StatusCode;

#[cfg(feature = "tracing")]
pub use logging::{init_logging, init_logging_from_env};

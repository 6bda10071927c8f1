//! Logging initialization.

use std::{env, str::FromStr};

use crate::Environment;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        })
    }
}

impl LogFormat {
    /// `LOG_FORMAT` when set, otherwise JSON in production and text elsewhere.
    pub fn from_env() -> Self {
        Self::resolve(env::var("LOG_FORMAT").ok().as_deref(), Environment::from_env())
    }

    fn resolve(requested: Option<&str>, environment: Environment) -> Self {
        match requested {
            Some(value) => value.parse().unwrap_or_default(),
            None if environment.is_production() => Self::Json,
            None => Self::Text,
        }
    }
}

/// Filter used when `RUST_LOG` is unset.
#[cfg(any(feature = "tracing", test))]
fn default_filter(environment: Environment) -> &'static str {
    match environment {
        Environment::Production => "info",
        Environment::Development => "info,greeter=debug,greeter_auth=debug,tower_http=debug",
    }
}

/// Install the global subscriber. A second call is a no-op, so tests may
/// call it freely.
#[cfg(feature = "tracing")]
pub fn init_logging(format: LogFormat, filter: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let installed = match format {
        LogFormat::Text => fmt().with_env_filter(env_filter).try_init(),
        LogFormat::Json => fmt()
            .json()
            .with_current_span(false)
            .with_env_filter(env_filter)
            .try_init(),
    };

    if installed.is_ok() {
        tracing::debug!(?format, "Logging initialized");
    }
}

/// Format and default filter follow `LOG_FORMAT` and the deployment environment.
#[cfg(feature = "tracing")]
pub fn init_logging_from_env() {
    let environment = Environment::from_env();
    init_logging(
        LogFormat::resolve(env::var("LOG_FORMAT").ok().as_deref(), environment),
        default_filter(environment),
    );
}

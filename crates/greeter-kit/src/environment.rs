//! Deployment environment.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Deployment environment the service runs in.
///
/// Production switches on HSTS and hides error details in response bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        })
    }
}

impl<'de> Deserialize<'de> for Environment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap_or_default())
    }
}

impl Environment {
    /// Load from `ENVIRONMENT`, `APP_ENV` or `RUST_ENV`, in that order.
    pub fn from_env() -> Self {
        env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .or_else(|_| env::var("RUST_ENV"))
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_production_aliases() {
        for s in ["production", "Production", "PRODUCTION", "prod"] {
            assert_eq!(s.parse::<Environment>().unwrap(), Environment::Production);
        }
    }

    #[test]
    fn anything_else_is_development() {
        for s in ["development", "dev", "staging", ""] {
            assert_eq!(s.parse::<Environment>().unwrap(), Environment::Development);
        }
    }

    #[test]
    fn is_methods() {
        assert!(Environment::Production.is_production());
        assert!(!Environment::Production.is_development());
        assert!(Environment::Development.is_development());
        assert_eq!(Environment::default(), Environment::Development);
    }

    #[test]
    fn deserializes_from_string() {
        let env: Environment = serde_json::from_str(r#""prod""#).unwrap();
        assert!(env.is_production());
    }
}

//! Service configuration.

use greeter_auth::JwtConfig;
use greeter_kit::ServerConfig;
use serde::Deserialize;

/// Everything the service reads at startup.
///
/// Server keys sit at the top level; token settings live under `jwt`
/// (`JWT__SECRET`, `JWT__ISSUER`, `JWT__AUDIENCE` from the environment).
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten)]
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

impl AsRef<ServerConfig> for AppConfig {
    fn as_ref(&self) -> &ServerConfig {
        &self.server
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greeter_kit::{ConfigBuilder, ConfigError};

    #[test]
    fn loads_server_and_jwt_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("greeter.toml");
        std::fs::write(
            &path,
            r#"
            host = "127.0.0.1"
            port = 8081
            environment = "production"

            [jwt]
            secret = "from-file"
            audience = "greeter"
            "#,
        )
        .unwrap();

        let config: AppConfig = ConfigBuilder::new().with_config_file(&path).build().unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8081);
        assert!(config.as_ref().environment.is_production());
        assert!(format!("{:?}", config.jwt).contains("greeter"));
    }

    #[test]
    fn jwt_section_is_required() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("greeter.toml");
        std::fs::write(&path, "port = 8081\n").unwrap();

        let result: Result<AppConfig, _> = ConfigBuilder::new().with_config_file(&path).build();
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}

use greeter::{app, production_schemes, AppConfig};
use greeter_kit::{ConfigBuilder, RouterExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = ConfigBuilder::new().with_dotenv().with_logging_from_env();
    if let Some(path) = std::env::args().nth(1) {
        builder = builder.with_config_file(path);
    }
    let config: AppConfig = builder.build()?;

    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        environment = ?config.server.environment,
        "Starting greeter"
    );

    app(&config, production_schemes(&config))
        .serve(&config)
        .await?;

    Ok(())
}

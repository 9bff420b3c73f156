//! Main entry point for the contact service binary

use anyhow::Result;
use contact_core::{
    config::{LogFormat, LoggingConfig},
    create_app, run_server, AppConfig, AppState, SendGridClient,
};
use std::{net::SocketAddr, sync::Arc};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_tracing(&config.logging);

    info!("Configuration loaded successfully");
    info!("Server will bind to: {}", config.bind_address());
    info!(
        "Contact emails go to {} from {}",
        config.email.to, config.email.from
    );

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;

    let mailer = SendGridClient::new(&config.email)
        .map_err(|e| anyhow::anyhow!("Failed to initialize SendGrid client: {}", e))?;
    info!("SendGrid client ready: {}", mailer.endpoint());

    let state = AppState::new(&config, Arc::new(mailer));
    info!("App: {} v{}", state.app_name, state.version);

    let app = create_app(state, &config);

    run_server(app, addr).await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "{}={level},contact_core={level},tower_http=info",
            env!("CARGO_CRATE_NAME").replace('-', "_"),
            level = logging.level
        )
        .into()
    });

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    match logging.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.pretty())
            .init(),
    }
}

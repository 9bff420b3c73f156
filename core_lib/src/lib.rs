//! Core library for the portfolio contact service: configuration, validation,
//! email delivery and the HTTP surface of the contact form endpoint.

pub mod config;
pub mod email;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod validation;

pub use crate::config::AppConfig;
pub use email::{MailError, Mailer, MessageComposer, OutboundEmail, SendGridClient};
pub use error::{AppError, Result};
pub use handlers::routes::create_routes;
pub use models::{ContactResponse, SubmissionRequest};
pub use services::{ContactService, SubmissionOutcome};

use axum::{extract::DefaultBodyLimit, middleware as axum_middleware, Router};
use middleware::request_validation::BodyLimit;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub contact_service: ContactService,
}

impl AppState {
    pub fn new(config: &AppConfig, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            app_name: "Portfolio Contact Service".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            contact_service: ContactService::from_config(mailer, config),
        }
    }
}

pub fn create_app(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .merge(create_routes())
        .layer(DefaultBodyLimit::max(config.limits.max_body_bytes))
        .layer(axum_middleware::from_fn_with_state(
            BodyLimit(config.limits.max_body_bytes),
            middleware::request_validation::request_validation_middleware,
        ))
        .layer(middleware::cors::cors_layer_from_config(&config.cors))
        .layer(axum_middleware::from_fn(
            middleware::request_validation::security_headers_middleware,
        ))
        .layer(middleware::logging::logging_layer())
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}

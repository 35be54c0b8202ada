//! API module providing the HTTP surface of the service.
//!
//! - `health` - Health check endpoints (/health/)
//! - `extract` - Request extractors shared by handlers
//! - `openapi` - OpenAPI/Utoipa configuration, served as ReDoc at /api-docs

pub mod extract;
pub mod health;
pub mod openapi;

pub use health::HEALTH_TAG;

use axum::Router;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_redoc::{Redoc, Servable};

use crate::config::AppConfig;
use crate::middleware::{cors_layer, panic_response, request_log_layer};

/// Builds the application router with all routes and middleware attached.
pub fn app_router(config: &AppConfig) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(openapi::ApiDoc::openapi())
        .merge(health::router())
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(axum::middleware::from_fn(request_log_layer))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .split_for_parts();

    router.merge(Redoc::with_url("/api-docs", api))
}

/// Starts the web server and runs until a shutdown signal arrives.
#[tracing::instrument(skip_all)]
pub async fn start_webserver(config: &AppConfig) -> color_eyre::Result<()> {
    let addr = config.socket_addr()?;
    let router = app_router(config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Server running");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| color_eyre::Report::msg(format!("Failed to start server: {e}")))?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, initiating graceful shutdown"),
        _ = terminate => tracing::info!("Received SIGTERM, initiating graceful shutdown"),
    }
}

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;

use crate::Config;
use crate::http::backend::Backend;
use crate::http::handlers;

/// Routes of the guide, editor and JSON API
pub fn router(backend: Backend) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/index.html", get(handlers::index))
        .route("/editor", get(handlers::editor).post(handlers::save))
        .route("/style.css", get(handlers::style))
        .route("/api/search", get(handlers::search))
        .route("/api/sections", get(handlers::sections))
        .route("/api/sections/{id}", get(handlers::section))
        .fallback(handlers::not_found)
        .with_state(backend)
}

/// Start the HTTP server and run until Ctrl+C
pub async fn serve(config: Config) -> Result<()> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    log::info!(
        "Serving {} on http://{}/ (editor at /editor)",
        config.store_path.display(),
        addr
    );

    let app = router(Backend::from_config(config));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

use anyhow::Context;
use std::sync::Arc;
use tracing::info;

// ri-utilizziamo le funzioni e strutture definite in lib.rs
use orgboard_server::{build_repository, config::Config, logging, routes, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    // Legge BIND_ADDR / STORE / DATABASE_URL
    let config = Config::from_env().context("load configuration")?;
    // Repository scelto dalla configurazione (in memoria o SQLite con migrazioni)
    let repo = build_repository(&config.store).await?;
    // Crea lo stato dell'applicazione condiviso
    let state = Arc::new(AppState::new(repo));
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .context("bind tcp listener")?;
    info!("Listening on http://{}", config.bind_addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server shutdown")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received shutdown signal, draining connections");
    }
}

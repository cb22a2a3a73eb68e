//! RetakeManager
//!
//! Main application entry point

use tracing::{error, info};

use RetakeManager::{
    build_router,
    config::Settings,
    database::{create_pool, run_migrations},
    utils::logging,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", RetakeManager::info());

    // Initialize database connection
    info!("Connecting to database...");
    let pool = create_pool(&settings.database).await?;

    // Run database migrations
    run_migrations(&pool).await?;

    let address = settings.bind_address()?;
    let state = AppState::new(pool, settings);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(address).await?;
    info!(%address, "HTTP server listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "HTTP server error");
        return Err(e.into());
    }

    info!("RetakeManager stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received, stopping server");
}

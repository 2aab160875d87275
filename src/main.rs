//! Artist Site - Binary Entry Point
//!
//! Serves the public data endpoints and the admin API.

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use artist_site::api::{create_router, AppState, SharedSecret};
use artist_site::config::SiteConfig;
use artist_site::utils::atomic::cleanup_temp_files;

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = SiteConfig::from_env()?;
    init_tracing(config.log_json);

    match cleanup_temp_files(&config.data_dir) {
        Ok(0) => {}
        Ok(count) => info!(count, "Removed leftover temp files"),
        Err(e) => warn!(error = %e, "Could not clean data directory"),
    }

    let auth = match config.admin_password.as_deref() {
        Some(password) => SharedSecret::new(password)?,
        None => {
            warn!("ADMIN_PASSWORD is not set; admin writes are disabled");
            SharedSecret::disabled()
        }
    };

    let state = Arc::new(AppState::from_config(&config, auth));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(
        addr = %config.bind_addr,
        data_dir = %config.data_dir.display(),
        version = artist_site::VERSION,
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

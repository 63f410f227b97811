mod connection;
mod metrics;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recomtree_core::{
    create_authenticator, load_config, persistence, validate_config, Authenticator,
    CatalogService,
};

use connection::handle_connection;
use state::ServerState;

/// How often the activity summary is logged.
const METRICS_SUMMARY_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("RECOMTREE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Auth method: {:?}", config.auth.method);
    info!("Catalog snapshot path: {:?}", config.persistence.path);

    // Create authenticator
    let authenticator: Arc<dyn Authenticator> = Arc::from(
        create_authenticator(&config.auth).context("Failed to create authenticator")?,
    );
    info!("Using authenticator: {}", authenticator.method_name());

    // Metric statics register lazily; touch the registry up front so
    // every family exists before the first connection.
    debug!(
        "Registered {} metric families",
        metrics::REGISTRY.gather().len()
    );

    // Load the catalog snapshot, or start empty
    let root = persistence::load(&config.persistence.path);
    let service = Arc::new(CatalogService::new(root));

    let state = Arc::new(ServerState::new(
        config.clone(),
        Arc::clone(&service),
        authenticator,
    ));

    // Periodic activity summary
    let summary_state = Arc::clone(&state);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(METRICS_SUMMARY_INTERVAL);
        interval.tick().await; // first tick fires immediately
        loop {
            interval.tick().await;
            info!("{}", metrics::activity_summary(summary_state.started_at()));
        }
    });

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, peer)) => {
                        tokio::spawn(handle_connection(Arc::clone(&state), stream, peer));
                    }
                    Err(e) => {
                        error!("Failed to accept connection: {}", e);
                    }
                }
            }
            _ = &mut shutdown => {
                break;
            }
        }
    }

    // Graceful shutdown: log final activity, persist the catalog once.
    info!("Server shutting down...");
    info!("{}", metrics::activity_summary(state.started_at()));

    let snapshot = state.service().snapshot();
    if let Err(e) = persistence::save(&config.persistence.path, &snapshot) {
        error!("Failed to save catalog snapshot on shutdown: {}", e);
    }

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

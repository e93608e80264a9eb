//! SpamGuard Server
//!
//! Loads the spam classifier artifact once at startup, then serves
//! predictions over HTTP. If the artifact cannot be loaded the process
//! exits without binding a listener.

use anyhow::Result;
use clap::Parser;
use spamguard_classifiers::{ArtifactLoader, PredictorHandle};
use spamguard_server::telemetry::{init_metrics, init_tracing};
use spamguard_server::{create_router, AppState, Cli, ServerConfig};
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = ServerConfig::load(&cli)?;

    // Initialize tracing
    init_tracing(cli.verbose, config.log_format);

    info!("Starting SpamGuard server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded from {}", cli.config);

    // Initialize metrics
    let metrics_handle = init_metrics()?;
    metrics::gauge!("spamguard_model_loaded").set(0.0);

    // Load the model artifact before accepting any traffic
    let handle = PredictorHandle::new();
    let loader = ArtifactLoader::from_app_relative(&config.artifact_path)?;
    info!("Artifact path: {}", loader.path().display());

    let loaded = match handle.load_with(&loader) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("Error loading model: {}", e);
            error!("Please ensure the artifact is a valid JSON or YAML model document");
            return Err(e.into());
        }
    };
    metrics::gauge!("spamguard_model_loaded").set(1.0);
    info!(
        "Model loaded: kind={}, encoding={}, predictor={}",
        loaded.kind,
        loaded.encoding.name(),
        loaded.predictor.name()
    );

    let addr = config.socket_addr()?;
    let state = AppState::new(config, handle).with_metrics(metrics_handle);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("SpamGuard server stopped");
    Ok(())
}

/// Resolves on SIGINT or SIGTERM so in-flight predictions can finish
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Cannot listen for Ctrl+C: {}", e);
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
                error!("Cannot listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        _ = interrupt => "SIGINT",
        _ = terminate => "SIGTERM",
    };
    warn!(signal = received, "Draining connections before exit");
}

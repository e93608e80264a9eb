//! Logging and metrics initialization

use crate::config::LogFormat;
use anyhow::Result;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;

/// Initialize tracing/logging
pub fn init_tracing(verbose: bool, format: LogFormat) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("spamguard=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("spamguard=info,tower_http=info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
    }
}

/// Initialize metrics exporter and return handle for rendering
pub fn init_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "spamguard_requests_total",
        "Total number of prediction requests received"
    );
    metrics::describe_counter!(
        "spamguard_predictions_total",
        "Successful predictions by label and confidence source"
    );
    metrics::describe_counter!(
        "spamguard_unmapped_labels_total",
        "Predictions whose raw artifact label was not in the label table"
    );
    metrics::describe_counter!("spamguard_errors_total", "Total number of errors by kind");
    metrics::describe_histogram!(
        "spamguard_prediction_latency_us",
        metrics::Unit::Microseconds,
        "Prediction latency in microseconds"
    );
    metrics::describe_gauge!(
        "spamguard_model_loaded",
        "1 when the predictor is loaded and serving"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}

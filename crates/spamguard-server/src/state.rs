use crate::config::ServerConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use spamguard_classifiers::{PredictionNormalizer, PredictorHandle};
use std::sync::Arc;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,

    /// Normalizer over the process's predictor handle
    pub normalizer: Arc<PredictionNormalizer>,

    /// Prometheus handle for rendering; absent when no recorder is installed
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(config: ServerConfig, handle: PredictorHandle) -> Self {
        Self {
            config: Arc::new(config),
            normalizer: Arc::new(PredictionNormalizer::new(handle)),
            metrics_handle: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }

    pub fn is_ready(&self) -> bool {
        self.normalizer.is_ready()
    }
}

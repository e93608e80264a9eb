//! Error types for SpamGuard

use std::path::PathBuf;

/// Result type alias using SpamGuard's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for SpamGuard operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Neither artifact encoding could be decoded. Fatal at startup.
    #[error(
        "could not load model artifact {path:?}: {primary_encoding} error: {primary}; \
         {fallback_encoding} error: {fallback}"
    )]
    ArtifactLoadFailed {
        path: PathBuf,
        primary_encoding: &'static str,
        primary: String,
        fallback_encoding: &'static str,
        fallback: String,
    },

    /// A classification request arrived before the predictor was ready
    #[error("model not loaded")]
    ServiceUnavailable,

    /// The artifact raised an error while classifying or scoring
    #[error("prediction failed: {0}")]
    PredictionFailed(String),

    /// Request rejected before reaching the predictor
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML serialization errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new prediction error
    pub fn prediction(msg: impl Into<String>) -> Self {
        Self::PredictionFailed(msg.into())
    }

    /// Create a new invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Short, stable name for metric labels and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ArtifactLoadFailed { .. } => "artifact_load_failed",
            Self::ServiceUnavailable => "service_unavailable",
            Self::PredictionFailed(_) => "prediction_failed",
            Self::InvalidInput(_) => "invalid_input",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Serialization(_) | Self::Yaml(_) => "serialization",
            Self::Internal(_) => "internal",
        }
    }
}

//! Write-once predictor handle with readiness gating

use crate::loader::{ArtifactLoader, LoadedArtifact};
use crate::predictor::Predictor;
use spamguard_core::{Error, Result};
use std::sync::{Arc, OnceLock};
use tracing::info;

/// Shared slot holding the process's predictor.
///
/// Starts empty and is filled at most once. Clones share the same slot, so
/// the handle given to request handlers observes the startup load. Reads
/// never block: an empty slot is reported as [`Error::ServiceUnavailable`].
#[derive(Clone, Default)]
pub struct PredictorHandle {
    slot: Arc<OnceLock<Arc<dyn Predictor>>>,
}

impl PredictorHandle {
    /// Create an empty (not ready) handle
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle that is ready immediately
    pub fn ready(predictor: Arc<dyn Predictor>) -> Self {
        let handle = Self::new();
        // A fresh slot cannot already be set
        let _ = handle.slot.set(predictor);
        handle
    }

    /// Fill the slot. Fails if a predictor was already installed.
    pub fn install(&self, predictor: Arc<dyn Predictor>) -> Result<()> {
        self.slot
            .set(predictor)
            .map_err(|_| Error::internal("predictor already installed"))
    }

    /// Run the loader and install its predictor
    pub fn load_with(&self, loader: &ArtifactLoader) -> Result<LoadedArtifact> {
        if self.is_ready() {
            return Err(Error::internal("predictor already installed"));
        }

        let loaded = loader.load()?;
        self.install(loaded.predictor.clone())?;
        info!(
            path = %loaded.path.display(),
            encoding = loaded.encoding.name(),
            "Predictor ready"
        );
        Ok(loaded)
    }

    pub fn is_ready(&self) -> bool {
        self.slot.get().is_some()
    }

    /// The installed predictor, or `ServiceUnavailable` if none yet
    pub fn get(&self) -> Result<Arc<dyn Predictor>> {
        self.slot.get().cloned().ok_or(Error::ServiceUnavailable)
    }
}

impl std::fmt::Debug for PredictorHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictorHandle")
            .field("ready", &self.is_ready())
            .field("predictor", &self.slot.get().map(|p| p.name()))
            .finish()
    }
}

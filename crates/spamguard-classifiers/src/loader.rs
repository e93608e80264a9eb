//! Artifact loading with primary and fallback encodings

use crate::artifact::ModelArtifact;
use crate::predictor::Predictor;
use spamguard_core::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Artifact file name looked up next to the executable by default
pub const DEFAULT_ARTIFACT_FILE: &str = "spam_email_detector_model.json";

/// On-disk encodings an artifact may have been written with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactEncoding {
    /// serde_json document
    Json,
    /// serde_yaml document
    Yaml,
}

impl ArtifactEncoding {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    /// Decode raw bytes into an artifact document
    pub fn decode(&self, bytes: &[u8]) -> Result<ModelArtifact> {
        let artifact: ModelArtifact = match self {
            Self::Json => serde_json::from_slice(bytes)?,
            Self::Yaml => serde_yaml::from_slice(bytes)?,
        };
        Ok(artifact)
    }
}

/// A predictor ready to serve, plus how it was obtained
pub struct LoadedArtifact {
    pub predictor: Arc<dyn Predictor>,
    pub encoding: ArtifactEncoding,
    pub kind: &'static str,
    pub path: PathBuf,
}

impl std::fmt::Debug for LoadedArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedArtifact")
            .field("predictor", &self.predictor.name())
            .field("encoding", &self.encoding)
            .field("kind", &self.kind)
            .field("path", &self.path)
            .finish()
    }
}

/// Loads a model artifact, trying the primary encoding then the fallback
#[derive(Debug, Clone)]
pub struct ArtifactLoader {
    path: PathBuf,
    primary: ArtifactEncoding,
    fallback: ArtifactEncoding,
}

impl ArtifactLoader {
    /// Loader for an already resolved path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            primary: ArtifactEncoding::Json,
            fallback: ArtifactEncoding::Yaml,
        }
    }

    /// Loader for a path relative to the running executable's directory
    pub fn from_app_relative(path: impl AsRef<Path>) -> Result<Self> {
        let base = application_dir()?;
        Ok(Self::new(resolve_artifact_path(path, &base)))
    }

    /// Set the encoding order
    pub fn with_encodings(mut self, primary: ArtifactEncoding, fallback: ArtifactEncoding) -> Self {
        self.primary = primary;
        self.fallback = fallback;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the artifact.
    ///
    /// Fails with [`Error::ArtifactLoadFailed`] carrying both causes when
    /// neither encoding produces a valid predictor. No retry: a second read
    /// of the same file gives the same answer.
    pub fn load(&self) -> Result<LoadedArtifact> {
        info!(path = %self.path.display(), "Loading model artifact");

        let primary_err = match self.attempt(self.primary) {
            Ok(loaded) => return Ok(loaded),
            Err(e) => e,
        };
        warn!(
            encoding = self.primary.name(),
            error = %primary_err,
            "Primary artifact decode failed, trying {}",
            self.fallback.name()
        );

        match self.attempt(self.fallback) {
            Ok(loaded) => Ok(loaded),
            Err(fallback_err) => {
                error!(
                    encoding = self.fallback.name(),
                    error = %fallback_err,
                    "Fallback artifact decode also failed"
                );
                Err(Error::ArtifactLoadFailed {
                    path: self.path.clone(),
                    primary_encoding: self.primary.name(),
                    primary: primary_err.to_string(),
                    fallback_encoding: self.fallback.name(),
                    fallback: fallback_err.to_string(),
                })
            }
        }
    }

    fn attempt(&self, encoding: ArtifactEncoding) -> Result<LoadedArtifact> {
        let bytes = std::fs::read(&self.path)?;
        let artifact = encoding.decode(&bytes)?;
        let kind = artifact.kind();
        let predictor = artifact.into_predictor()?;

        info!(
            encoding = encoding.name(),
            kind,
            predictor = predictor.name(),
            "Model artifact loaded"
        );

        Ok(LoadedArtifact {
            predictor,
            encoding,
            kind,
            path: self.path.clone(),
        })
    }
}

/// Directory containing the running executable
pub fn application_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::config(format!("executable {:?} has no parent directory", exe)))
}

/// Join a relative artifact path onto `base`; absolute paths pass through
pub fn resolve_artifact_path(path: impl AsRef<Path>, base: &Path) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_path() {
        let resolved = resolve_artifact_path("models/spam.json", Path::new("/opt/spamguard/bin"));
        assert_eq!(resolved, PathBuf::from("/opt/spamguard/bin/models/spam.json"));
    }

    #[test]
    fn test_resolve_absolute_path() {
        let resolved = resolve_artifact_path("/var/lib/spam.json", Path::new("/opt/spamguard/bin"));
        assert_eq!(resolved, PathBuf::from("/var/lib/spam.json"));
    }

    #[test]
    fn test_application_dir_exists() {
        let dir = application_dir().unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_from_app_relative_is_independent_of_cwd() {
        let loader = ArtifactLoader::from_app_relative(DEFAULT_ARTIFACT_FILE).unwrap();
        assert_eq!(loader.path(), application_dir().unwrap().join(DEFAULT_ARTIFACT_FILE));
    }

    #[test]
    fn test_missing_file_reports_both_encodings() {
        let loader = ArtifactLoader::new("/nonexistent/spamguard/model.json");
        let err = loader.load().unwrap_err();

        match err {
            Error::ArtifactLoadFailed {
                primary_encoding,
                fallback_encoding,
                primary,
                fallback,
                ..
            } => {
                assert_eq!(primary_encoding, "json");
                assert_eq!(fallback_encoding, "yaml");
                assert!(primary.contains("io error"));
                assert!(fallback.contains("io error"));
            }
            other => panic!("expected ArtifactLoadFailed, got {:?}", other),
        }
    }
}

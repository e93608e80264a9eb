//! SpamGuard Classifiers
//!
//! Loading and serving of trained spam classifiers.
//!
//! The serving path has two pieces:
//! - [`ArtifactLoader`] reads a serialized model artifact once at startup,
//!   trying a primary encoding and then a fallback encoding.
//! - [`PredictionNormalizer`] turns whatever the loaded [`Predictor`] emits
//!   (numeric or string labels, with or without scores) into a canonical
//!   `{label, confidence, is_spam}` result.
//!
//! Predictors are shared read-only across concurrent requests.

pub mod artifact;
pub mod handle;
pub mod labels;
pub mod linear;
pub mod loader;
pub mod naive_bayes;
pub mod normalizer;
pub mod predictor;
pub mod vectorizer;

pub use artifact::{ModelArtifact, RawLabel};
pub use handle::PredictorHandle;
pub use labels::{LabelMapping, LabelTable};
pub use linear::LinearModel;
pub use loader::{
    application_dir, resolve_artifact_path, ArtifactEncoding, ArtifactLoader, LoadedArtifact,
    DEFAULT_ARTIFACT_FILE,
};
pub use naive_bayes::NaiveBayesModel;
pub use normalizer::{Prediction, PredictionNormalizer};
pub use predictor::{Predictor, Scores};
pub use vectorizer::{Vectorizer, VectorizerConfig};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::artifact::{ModelArtifact, RawLabel};
    pub use crate::handle::PredictorHandle;
    pub use crate::loader::{ArtifactEncoding, ArtifactLoader};
    pub use crate::normalizer::{Prediction, PredictionNormalizer};
    pub use crate::predictor::{Predictor, Scores};
}

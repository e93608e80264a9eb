//! Predictor trait and score types

use crate::artifact::RawLabel;
use spamguard_core::Result;

/// A loaded classifier, treated as a black box.
///
/// Implementations must be safe for concurrent read-only calls: one instance
/// is shared by every in-flight request with no lock around it. A predictor
/// with hidden mutable state across calls does not satisfy this contract.
pub trait Predictor: Send + Sync {
    /// Predict a raw label for each input
    fn predict(&self, batch: &[&str]) -> Result<Vec<RawLabel>>;

    /// Per-class probability distribution for each input, if the model has one
    fn score(&self, batch: &[&str]) -> Result<Scores>;

    /// Get the predictor name
    fn name(&self) -> &str;
}

/// Outcome of a score call
#[derive(Debug, Clone, PartialEq)]
pub enum Scores {
    /// One distribution over classes per input
    Distributions(Vec<Vec<f64>>),

    /// The model has no calibrated score operation
    Unavailable,
}

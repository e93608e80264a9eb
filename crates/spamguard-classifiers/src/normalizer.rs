//! Prediction normalization
//!
//! Turns a black-box predictor's output into a canonical
//! [`ClassificationResult`]:
//!
//! 1. trim surrounding whitespace
//! 2. predict on a batch of one
//! 3. score on a batch of one, if the predictor can
//! 4. confidence = max of the distribution, or the fixed fallback
//! 5. map the raw label through the [`LabelTable`]

use crate::artifact::RawLabel;
use crate::handle::PredictorHandle;
use crate::labels::{LabelMapping, LabelTable};
use crate::predictor::Scores;
use spamguard_core::{ClassificationResult, ConfidenceSource, Error, Result};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// A normalized result plus what the predictor actually emitted
#[derive(Debug, Clone)]
pub struct Prediction {
    pub result: ClassificationResult,

    /// Label as emitted by the artifact
    pub raw_label: RawLabel,

    pub mapping: LabelMapping,

    /// Latency in microseconds
    pub latency_us: u64,
}

/// Maps text to canonical results using the shared predictor
#[derive(Debug, Clone)]
pub struct PredictionNormalizer {
    handle: PredictorHandle,
    labels: LabelTable,
}

impl PredictionNormalizer {
    pub fn new(handle: PredictorHandle) -> Self {
        Self {
            handle,
            labels: LabelTable::standard(),
        }
    }

    /// Replace the raw label table
    pub fn with_label_table(mut self, labels: LabelTable) -> Self {
        self.labels = labels;
        self
    }

    pub fn is_ready(&self) -> bool {
        self.handle.is_ready()
    }

    /// Classify one text.
    ///
    /// Returns `ServiceUnavailable` without touching the predictor when the
    /// handle is empty, and `PredictionFailed` when the predictor errors or
    /// returns something that is not a batch of one.
    pub fn classify(&self, text: &str) -> Result<Prediction> {
        let predictor = self.handle.get()?;
        let start = Instant::now();

        let text = text.trim();
        let batch = [text];

        let raw_label = single(predictor.predict(&batch).map_err(artifact_failure)?, "predict")?;

        let (confidence, source) = match predictor.score(&batch).map_err(artifact_failure)? {
            Scores::Distributions(distributions) => {
                let distribution = single(distributions, "score")?;
                (max_probability(&distribution)?, ConfidenceSource::Calibrated)
            }
            Scores::Unavailable => {
                debug!(
                    predictor = predictor.name(),
                    confidence_source = ConfidenceSource::Fallback.as_str(),
                    "Predictor has no score operation, using fallback confidence"
                );
                (spamguard_core::FALLBACK_CONFIDENCE, ConfidenceSource::Fallback)
            }
        };

        let mapping = self.labels.resolve(&raw_label);
        if !mapping.is_mapped() {
            warn!(
                raw_label = %raw_label,
                predictor = predictor.name(),
                "Unrecognized raw label, treating as ham"
            );
        }

        let result = ClassificationResult::new(mapping.label(), confidence, source);
        debug!(
            label = %result.label,
            confidence = result.confidence,
            confidence_source = source.as_str(),
            "Prediction complete"
        );

        Ok(Prediction {
            result,
            raw_label,
            mapping,
            latency_us: saturating_micros(start.elapsed()),
        })
    }
}

/// Any error raised inside the artifact is a prediction failure, whatever
/// variant the artifact chose
fn artifact_failure(err: Error) -> Error {
    match err {
        Error::PredictionFailed(_) => err,
        other => Error::prediction(other.to_string()),
    }
}

fn saturating_micros(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}

/// Unwrap a batch that must contain exactly one element
fn single<T>(batch: Vec<T>, operation: &str) -> Result<T> {
    let len = batch.len();
    let mut iter = batch.into_iter();
    match (iter.next(), iter.next()) {
        (Some(item), None) => Ok(item),
        _ => Err(Error::prediction(format!(
            "{} returned {} results for a batch of 1",
            operation, len
        ))),
    }
}

/// Probability mass of the winning class
fn max_probability(distribution: &[f64]) -> Result<f64> {
    if distribution.is_empty() {
        return Err(Error::prediction("score returned an empty distribution"));
    }
    if distribution.iter().any(|p| !p.is_finite()) {
        return Err(Error::prediction("score returned a non-finite probability"));
    }
    let max = distribution.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Ok(max.clamp(0.0, 1.0))
}

//! Core types for SpamGuard

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum accepted request length in characters
pub const MIN_TEXT_CHARS: usize = 1;

/// Maximum accepted request length in characters
pub const MAX_TEXT_CHARS: usize = 10_000;

/// Confidence reported when the artifact cannot provide a calibrated score
pub const FALLBACK_CONFIDENCE: f64 = 0.95;

/// Canonical classification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Ham,
    Spam,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ham => "ham",
            Self::Spam => "spam",
        }
    }

    pub fn is_spam(&self) -> bool {
        matches!(self, Self::Spam)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a result's confidence came from.
///
/// Not part of the API response; surfaced through logs and metrics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceSource {
    /// Maximum of the artifact's score distribution
    Calibrated,
    /// Fixed [`FALLBACK_CONFIDENCE`], the artifact exposes no score operation
    Fallback,
}

impl ConfidenceSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Calibrated => "calibrated",
            Self::Fallback => "fallback",
        }
    }
}

/// Inbound classification request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationRequest {
    /// Email content to classify
    #[serde(alias = "text")]
    pub email_text: String,
}

impl ClassificationRequest {
    pub fn new(email_text: impl Into<String>) -> Self {
        Self {
            email_text: email_text.into(),
        }
    }

    /// Check the length bound before the text reaches the predictor.
    ///
    /// Length is counted in characters, not bytes, and before trimming.
    pub fn validate(&self) -> Result<()> {
        let chars = self.email_text.chars().count();
        if chars < MIN_TEXT_CHARS {
            return Err(Error::invalid_input(format!(
                "email_text must contain at least {} character",
                MIN_TEXT_CHARS
            )));
        }
        if chars > MAX_TEXT_CHARS {
            return Err(Error::invalid_input(format!(
                "email_text must contain at most {} characters, got {}",
                MAX_TEXT_CHARS, chars
            )));
        }
        Ok(())
    }
}

/// Canonical result of classification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    /// Canonical label
    pub label: Label,

    /// Confidence score (0.0-1.0) in the winning label
    pub confidence: f64,

    /// Always equal to `label == Label::Spam`
    pub is_spam: bool,

    #[serde(skip)]
    pub confidence_source: ConfidenceSource,
}

impl ClassificationResult {
    /// Build a result, deriving `is_spam` from the label and clamping confidence into [0, 1]
    pub fn new(label: Label, confidence: f64, confidence_source: ConfidenceSource) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };

        Self {
            label,
            confidence,
            is_spam: label.is_spam(),
            confidence_source,
        }
    }

    /// Result for an artifact that could not provide a score
    pub fn with_fallback_confidence(label: Label) -> Self {
        Self::new(label, FALLBACK_CONFIDENCE, ConfidenceSource::Fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_label_serialization() {
        assert_eq!(serde_json::to_string(&Label::Spam).unwrap(), "\"spam\"");
        assert_eq!(serde_json::to_string(&Label::Ham).unwrap(), "\"ham\"");
        assert_eq!(Label::Spam.to_string(), "spam");
    }

    #[test]
    fn test_result_wire_shape_hides_confidence_source() {
        let result = ClassificationResult::new(Label::Spam, 0.98, ConfidenceSource::Calibrated);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"label": "spam", "confidence": 0.98, "is_spam": true})
        );
    }

    #[test]
    fn test_fallback_result() {
        let result = ClassificationResult::with_fallback_confidence(Label::Ham);
        assert_eq!(result.confidence, 0.95);
        assert!(!result.is_spam);
        assert_eq!(result.confidence_source, ConfidenceSource::Fallback);
    }

    #[test]
    fn test_request_accepts_text_alias() {
        let req: ClassificationRequest = serde_json::from_str(r#"{"text": "hello"}"#).unwrap();
        assert_eq!(req.email_text, "hello");
    }

    #[test]
    fn test_request_length_bounds() {
        assert!(ClassificationRequest::new("").validate().is_err());
        assert!(ClassificationRequest::new(" ").validate().is_ok());
        assert!(ClassificationRequest::new("a".repeat(MAX_TEXT_CHARS)).validate().is_ok());
        assert!(ClassificationRequest::new("a".repeat(MAX_TEXT_CHARS + 1)).validate().is_err());
    }

    #[test]
    fn test_request_length_counts_characters() {
        // 10,000 multi-byte characters is well over 10,000 bytes
        let text = "é".repeat(MAX_TEXT_CHARS);
        assert!(text.len() > MAX_TEXT_CHARS);
        assert!(ClassificationRequest::new(text).validate().is_ok());
    }

    proptest! {
        #[test]
        fn prop_result_invariants(spam in any::<bool>(), confidence in any::<f64>()) {
            let label = if spam { Label::Spam } else { Label::Ham };
            let result = ClassificationResult::new(label, confidence, ConfidenceSource::Calibrated);

            prop_assert_eq!(result.is_spam, result.label == Label::Spam);
            prop_assert!((0.0..=1.0).contains(&result.confidence));
        }
    }
}

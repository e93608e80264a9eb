//! SpamGuard Core
//!
//! Core types and error handling shared across SpamGuard components.
//!
//! This crate provides:
//! - The error taxonomy for artifact loading and prediction
//! - Canonical classification request and result types
//! - The [`Label`] vocabulary every artifact convention is normalized into

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    ClassificationRequest, ClassificationResult, ConfidenceSource, Label, FALLBACK_CONFIDENCE,
    MAX_TEXT_CHARS, MIN_TEXT_CHARS,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{ClassificationRequest, ClassificationResult, ConfidenceSource, Label};
}

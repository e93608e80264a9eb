//! On-disk model artifact format
//!
//! An artifact is a self-describing document tagged by `kind`. It decodes
//! into a [`ModelArtifact`], which is validated and compiled into a
//! [`Predictor`] before it is allowed to serve traffic.

use crate::linear::{LinearModel, LinearParams};
use crate::naive_bayes::{NaiveBayesModel, NaiveBayesParams};
use crate::predictor::Predictor;
use serde::{Deserialize, Serialize};
use spamguard_core::Result;
use std::fmt;
use std::sync::Arc;

/// A label exactly as the artifact emits it.
///
/// Artifacts trained with integer targets emit numbers, artifacts trained
/// on text targets emit strings in whatever casing the training data used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawLabel {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawLabel {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl fmt::Display for RawLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Text(v) => write!(f, "{:?}", v),
        }
    }
}

/// Decoded artifact document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    /// Multinomial naive Bayes over token counts
    NaiveBayes(NaiveBayesParams),

    /// Linear decision function over token counts
    Linear(LinearParams),
}

impl ModelArtifact {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NaiveBayes(_) => "naive_bayes",
            Self::Linear(_) => "linear",
        }
    }

    /// Validate the document and compile it into a shareable predictor
    pub fn into_predictor(self) -> Result<Arc<dyn Predictor>> {
        let predictor: Arc<dyn Predictor> = match self {
            Self::NaiveBayes(params) => Arc::new(NaiveBayesModel::from_params(params)?),
            Self::Linear(params) => Arc::new(LinearModel::from_params(params)?),
        };
        Ok(predictor)
    }
}

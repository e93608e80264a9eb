//! Linear decision-function predictor

use crate::artifact::RawLabel;
use crate::predictor::{Predictor, Scores};
use crate::vectorizer::{Vectorizer, VectorizerConfig};
use serde::{Deserialize, Serialize};
use spamguard_core::{Error, Result};
use std::collections::HashMap;

/// Linear model parameters as stored in the artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearParams {
    /// `[negative, positive]` raw labels
    pub classes: Vec<RawLabel>,

    /// Per-token weight
    pub weights: HashMap<String, f64>,

    #[serde(default)]
    pub intercept: f64,

    /// Logistic model: the decision value maps to a probability.
    /// A margin-only model (e.g. a linear SVM) has no score operation.
    #[serde(default)]
    pub calibrated: bool,

    #[serde(default)]
    pub vectorizer: VectorizerConfig,
}

/// Compiled linear model
pub struct LinearModel {
    negative: RawLabel,
    positive: RawLabel,
    weights: HashMap<String, f64>,
    intercept: f64,
    calibrated: bool,
    vectorizer: Vectorizer,
}

impl LinearModel {
    pub fn from_params(params: LinearParams) -> Result<Self> {
        let n_classes = params.classes.len();
        let [negative, positive]: [RawLabel; 2] = params.classes.try_into().map_err(|_| {
            Error::config(format!(
                "linear artifact needs exactly 2 classes, got {}",
                n_classes
            ))
        })?;

        if !params.intercept.is_finite() {
            return Err(Error::config("linear intercept must be finite"));
        }
        if let Some((token, _)) = params.weights.iter().find(|(_, w)| !w.is_finite()) {
            return Err(Error::config(format!(
                "linear weight for {:?} is not finite",
                token
            )));
        }

        let vectorizer = Vectorizer::from_config(&params.vectorizer)?;

        Ok(Self {
            negative,
            positive,
            weights: params.weights,
            intercept: params.intercept,
            calibrated: params.calibrated,
            vectorizer,
        })
    }

    /// Signed distance from the decision boundary
    pub fn decision_function(&self, text: &str) -> Result<f64> {
        let value = self
            .vectorizer
            .term_frequencies(text)
            .iter()
            .filter_map(|(token, count)| self.weights.get(token).map(|w| w * count))
            .sum::<f64>()
            + self.intercept;

        if !value.is_finite() {
            return Err(Error::prediction("linear decision value is not finite"));
        }
        Ok(value)
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl Predictor for LinearModel {
    fn predict(&self, batch: &[&str]) -> Result<Vec<RawLabel>> {
        batch
            .iter()
            .map(|text| {
                let label = if self.decision_function(text)? > 0.0 {
                    &self.positive
                } else {
                    &self.negative
                };
                Ok(label.clone())
            })
            .collect()
    }

    fn score(&self, batch: &[&str]) -> Result<Scores> {
        if !self.calibrated {
            return Ok(Scores::Unavailable);
        }

        let distributions = batch
            .iter()
            .map(|text| {
                let p = sigmoid(self.decision_function(text)?);
                Ok(vec![1.0 - p, p])
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Scores::Distributions(distributions))
    }

    fn name(&self) -> &str {
        if self.calibrated {
            "logistic"
        } else {
            "linear_margin"
        }
    }
}

//! Multinomial naive Bayes predictor

use crate::artifact::RawLabel;
use crate::predictor::{Predictor, Scores};
use crate::vectorizer::{Vectorizer, VectorizerConfig};
use serde::{Deserialize, Serialize};
use spamguard_core::{Error, Result};
use std::collections::HashMap;

/// Naive Bayes parameters as stored in the artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaiveBayesParams {
    /// Raw label for each class, in column order
    pub classes: Vec<RawLabel>,

    /// Log prior probability of each class
    pub class_log_prior: Vec<f64>,

    /// Per-token log probability for each class
    pub feature_log_prob: HashMap<String, Vec<f64>>,

    #[serde(default)]
    pub vectorizer: VectorizerConfig,
}

/// Compiled naive Bayes model
pub struct NaiveBayesModel {
    classes: Vec<RawLabel>,
    class_log_prior: Vec<f64>,
    feature_log_prob: HashMap<String, Vec<f64>>,
    vectorizer: Vectorizer,
}

impl NaiveBayesModel {
    pub fn from_params(params: NaiveBayesParams) -> Result<Self> {
        let n_classes = params.classes.len();
        if n_classes == 0 {
            return Err(Error::config("naive_bayes artifact has no classes"));
        }
        if params.class_log_prior.len() != n_classes {
            return Err(Error::config(format!(
                "naive_bayes artifact has {} classes but {} class_log_prior values",
                n_classes,
                params.class_log_prior.len()
            )));
        }
        if params.class_log_prior.iter().any(|p| !p.is_finite()) {
            return Err(Error::config("naive_bayes class_log_prior must be finite"));
        }
        for (token, probs) in &params.feature_log_prob {
            if probs.len() != n_classes {
                return Err(Error::config(format!(
                    "naive_bayes feature {:?} has {} values, expected {}",
                    token,
                    probs.len(),
                    n_classes
                )));
            }
            if probs.iter().any(|p| !p.is_finite()) {
                return Err(Error::config(format!(
                    "naive_bayes feature {:?} has a non-finite log probability",
                    token
                )));
            }
        }

        let vectorizer = Vectorizer::from_config(&params.vectorizer)?;

        Ok(Self {
            classes: params.classes,
            class_log_prior: params.class_log_prior,
            feature_log_prob: params.feature_log_prob,
            vectorizer,
        })
    }

    fn joint_log_likelihood(&self, text: &str) -> Result<Vec<f64>> {
        let mut jll = self.class_log_prior.clone();

        for (token, count) in self.vectorizer.term_frequencies(text) {
            if let Some(log_probs) = self.feature_log_prob.get(&token) {
                for (acc, lp) in jll.iter_mut().zip(log_probs) {
                    *acc += count * lp;
                }
            }
        }

        if jll.iter().any(|v| !v.is_finite()) {
            return Err(Error::prediction("naive_bayes joint log likelihood is not finite"));
        }
        Ok(jll)
    }
}

/// Index of the largest value; the first one wins ties
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

/// Normalize log likelihoods into probabilities
fn softmax(jll: &[f64]) -> Vec<f64> {
    let max = jll.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = jll.iter().map(|v| (v - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

impl Predictor for NaiveBayesModel {
    fn predict(&self, batch: &[&str]) -> Result<Vec<RawLabel>> {
        batch
            .iter()
            .map(|text| {
                let jll = self.joint_log_likelihood(text)?;
                Ok(self.classes[argmax(&jll)].clone())
            })
            .collect()
    }

    fn score(&self, batch: &[&str]) -> Result<Scores> {
        let distributions = batch
            .iter()
            .map(|text| self.joint_log_likelihood(text).map(|jll| softmax(&jll)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Scores::Distributions(distributions))
    }

    fn name(&self) -> &str {
        "naive_bayes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> NaiveBayesParams {
        let mut feature_log_prob = HashMap::new();
        feature_log_prob.insert("free".to_string(), vec![(0.01f64).ln(), (0.2f64).ln()]);
        feature_log_prob.insert("win".to_string(), vec![(0.01f64).ln(), (0.2f64).ln()]);
        feature_log_prob.insert("meeting".to_string(), vec![(0.2f64).ln(), (0.01f64).ln()]);
        feature_log_prob.insert("tomorrow".to_string(), vec![(0.2f64).ln(), (0.01f64).ln()]);

        NaiveBayesParams {
            classes: vec![RawLabel::Int(0), RawLabel::Int(1)],
            class_log_prior: vec![(0.6f64).ln(), (0.4f64).ln()],
            feature_log_prob,
            vectorizer: VectorizerConfig::default(),
        }
    }

    #[test]
    fn test_predicts_spam_class() {
        let model = NaiveBayesModel::from_params(params()).unwrap();
        let labels = model.predict(&["WIN a FREE cruise"]).unwrap();
        assert_eq!(labels, vec![RawLabel::Int(1)]);
    }

    #[test]
    fn test_scores_sum_to_one() {
        let model = NaiveBayesModel::from_params(params()).unwrap();
        let Scores::Distributions(dists) = model.score(&["meeting tomorrow"]).unwrap() else {
            panic!("naive bayes always scores");
        };

        assert_eq!(dists.len(), 1);
        let sum: f64 = dists[0].iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(dists[0][0] > dists[0][1]);
    }

    #[test]
    fn test_unknown_tokens_fall_back_to_prior() {
        let model = NaiveBayesModel::from_params(params()).unwrap();
        let labels = model.predict(&["zzz qqq"]).unwrap();
        assert_eq!(labels, vec![RawLabel::Int(0)]);
    }

    #[test]
    fn test_mismatched_prior_rejected() {
        let mut bad = params();
        bad.class_log_prior.pop();
        assert!(NaiveBayesModel::from_params(bad).is_err());
    }

    #[test]
    fn test_mismatched_feature_rejected() {
        let mut bad = params();
        bad.feature_log_prob.insert("oops".to_string(), vec![-1.0]);
        assert!(NaiveBayesModel::from_params(bad).is_err());
    }

    #[test]
    fn test_empty_classes_rejected() {
        let bad = NaiveBayesParams {
            classes: vec![],
            class_log_prior: vec![],
            feature_log_prob: HashMap::new(),
            vectorizer: VectorizerConfig::default(),
        };
        assert!(NaiveBayesModel::from_params(bad).is_err());
    }
}

//! Bag-of-words tokenization used inside artifacts

use regex::Regex;
use serde::{Deserialize, Serialize};
use spamguard_core::{Error, Result};
use std::collections::HashMap;

/// Default token pattern: runs of two or more word characters
pub const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// Vectorizer settings as stored in the artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerConfig {
    /// Lowercase text before tokenizing
    #[serde(default = "default_true")]
    pub lowercase: bool,

    /// Regex whose matches are the tokens
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,

    /// Record token presence (1.0) instead of counts
    #[serde(default)]
    pub binary: bool,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            token_pattern: default_token_pattern(),
            binary: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

/// Compiled vectorizer
#[derive(Debug, Clone)]
pub struct Vectorizer {
    pattern: Regex,
    lowercase: bool,
    binary: bool,
}

impl Vectorizer {
    pub fn from_config(config: &VectorizerConfig) -> Result<Self> {
        let pattern = Regex::new(&config.token_pattern).map_err(|e| {
            Error::config(format!("invalid token_pattern {:?}: {}", config.token_pattern, e))
        })?;

        Ok(Self {
            pattern,
            lowercase: config.lowercase,
            binary: config.binary,
        })
    }

    /// Token frequencies for a single document
    pub fn term_frequencies(&self, text: &str) -> HashMap<String, f64> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let mut counts: HashMap<String, f64> = HashMap::new();
        for m in self.pattern.find_iter(&text) {
            let entry = counts.entry(m.as_str().to_string()).or_insert(0.0);
            if self.binary {
                *entry = 1.0;
            } else {
                *entry += 1.0;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pattern_skips_single_chars() {
        let vectorizer = Vectorizer::from_config(&VectorizerConfig::default()).unwrap();
        let tf = vectorizer.term_frequencies("WIN a FREE prize, win NOW!");

        assert_eq!(tf.get("win"), Some(&2.0));
        assert_eq!(tf.get("free"), Some(&1.0));
        assert!(!tf.contains_key("a"));
    }

    #[test]
    fn test_binary_and_case_sensitive() {
        let config = VectorizerConfig {
            lowercase: false,
            binary: true,
            ..Default::default()
        };
        let vectorizer = Vectorizer::from_config(&config).unwrap();
        let tf = vectorizer.term_frequencies("Buy buy Buy");

        assert_eq!(tf.get("Buy"), Some(&1.0));
        assert_eq!(tf.get("buy"), Some(&1.0));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let config = VectorizerConfig {
            token_pattern: "(unclosed".to_string(),
            ..Default::default()
        };
        assert!(Vectorizer::from_config(&config).is_err());
    }
}

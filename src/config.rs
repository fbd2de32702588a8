//! Engine configuration.
//!
//! The significance level is fixed when an engine is built and never changes
//! afterwards. The remaining thresholds default to the values the decision
//! rules were designed around; they are exposed so callers can read them, and
//! can be overridden from JSON.
//!
//! # Example
//!
//! ```
//! use hypotest::config::EngineConfig;
//!
//! let config = EngineConfig::from_json(r#"{ "alpha": 0.01 }"#).expect("valid config");
//! assert_eq!(config.alpha, 0.01);
//! assert_eq!(config.large_sample_threshold, 5000);
//! ```

use crate::error::{HypothesisError, Result};
use serde::{Deserialize, Serialize};

/// Significance level α, guaranteed to lie in the open interval (0, 1).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct SignificanceLevel(f64);

impl SignificanceLevel {
    /// Validates and wraps α.
    ///
    /// # Errors
    ///
    /// Returns a validation error unless `0 < alpha < 1`.
    pub fn new(alpha: f64) -> Result<Self> {
        if alpha > 0.0 && alpha < 1.0 {
            Ok(Self(alpha))
        } else {
            Err(HypothesisError::validation(format!(
                "Significance level must lie in (0, 1), got {alpha}"
            )))
        }
    }

    /// Returns α.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for SignificanceLevel {
    fn default() -> Self {
        Self(0.05)
    }
}

impl std::fmt::Display for SignificanceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Configuration for [`crate::engine::HypothesisEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Significance level α (default 0.05).
    pub alpha: f64,
    /// Samples larger than this use Kolmogorov-Smirnov instead of
    /// Shapiro-Wilk (default 5000).
    pub large_sample_threshold: usize,
    /// Central-limit relaxation needs a sample size strictly above this
    /// (default 30).
    pub clt_min_size: usize,
    /// Expected contingency cells below this count as low (default 5.0).
    pub min_expected_frequency: f64,
    /// Largest tolerated fraction of low expected cells (default 0.2).
    pub max_low_expected_fraction: f64,
    /// Mann-Whitney warns when `|n1 - n2|` exceeds this fraction of the
    /// smaller size (default 0.5).
    pub size_imbalance_ratio: f64,
    /// Fisher's exact test suggests chi-square once both inputs reach this
    /// length (default 5).
    pub fisher_length_hint: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            large_sample_threshold: 5000,
            clt_min_size: 30,
            min_expected_frequency: 5.0,
            max_low_expected_fraction: 0.2,
            size_imbalance_ratio: 0.5,
            fisher_length_hint: 5,
        }
    }
}

impl EngineConfig {
    /// Default configuration with the given α.
    #[must_use]
    pub fn with_alpha(alpha: f64) -> Self {
        Self {
            alpha,
            ..Self::default()
        }
    }

    /// Parses a JSON document; absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`HypothesisError::Config`] on malformed JSON and a validation
    /// error if the parsed values are out of range.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field is in range.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        SignificanceLevel::new(self.alpha)?;
        if self.large_sample_threshold < 3 {
            return Err(HypothesisError::validation(
                "large_sample_threshold must be at least 3",
            ));
        }
        if !(self.min_expected_frequency > 0.0) {
            return Err(HypothesisError::validation(
                "min_expected_frequency must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.max_low_expected_fraction) {
            return Err(HypothesisError::validation(
                "max_low_expected_fraction must lie in [0, 1]",
            ));
        }
        if !(self.size_imbalance_ratio >= 0.0) {
            return Err(HypothesisError::validation(
                "size_imbalance_ratio must be non-negative",
            ));
        }
        Ok(())
    }

    /// The validated significance level.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `alpha` is outside (0, 1).
    pub fn significance_level(&self) -> Result<SignificanceLevel> {
        SignificanceLevel::new(self.alpha)
    }
}

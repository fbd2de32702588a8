//! Hypothesis engine: picks a test, checks its preconditions, reports the
//! verdict.
//!
//! A [`HypothesisEngine`] holds a significance level α fixed at construction.
//! Every test operation validates what the test assumes (equal sizes,
//! normality, enough expected counts), runs the matching kernel from
//! [`crate::stats`], and finishes with [`HypothesisEngine::check_significance`],
//! which emits a verdict [`Notice`] and returns a [`TestResult`].
//!
//! Operations are grouped by family:
//!
//! - parametric: one-sample, two-sample and paired t-tests, one-way ANOVA
//! - non-parametric: Mann-Whitney U, Wilcoxon signed-rank, Kruskal-Wallis
//! - categorical: chi-square independence, Fisher exact
//! - correlation: Pearson, Spearman
//!
//! # Example
//!
//! ```
//! use hypotest::engine::HypothesisEngine;
//!
//! let engine = HypothesisEngine::new(0.05).expect("valid alpha");
//!
//! let before = [72.0, 75.0, 71.0, 78.0, 74.0, 76.0, 73.0, 77.0];
//! let after = [70.0, 72.0, 70.5, 74.0, 71.0, 73.5, 71.5, 74.0];
//! let result = engine.paired_ttest(&before, &after, false).expect("normal samples");
//!
//! assert!(result.rejected);
//! assert!(result.p_value < 0.05);
//! ```

mod categorical;
mod correlation;
mod nonparametric;
mod parametric;

use crate::advisory::{LogHandler, Notice, NoticeHandler};
use crate::config::{EngineConfig, SignificanceLevel};
use crate::error::{HypothesisError, Result};
use crate::stats::descriptive::{mean, std_dev};
use crate::stats::normality::{kstest_normal, shapiro};
use crate::stats::variance::{bartlett, levene};
use std::sync::Arc;

/// Outcome of a significance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// p < α
    Rejected,
    /// p ≥ α
    NotRejected,
}

/// Result of every test operation: the decision and the p-value behind it.
///
/// `rejected` is always `p_value < α` for the engine that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestResult {
    /// Whether the null hypothesis was rejected.
    pub rejected: bool,
    /// p-value reported by the kernel, in [0, 1].
    pub p_value: f64,
}

impl TestResult {
    /// The decision as a [`Verdict`].
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        if self.rejected {
            Verdict::Rejected
        } else {
            Verdict::NotRejected
        }
    }
}

/// Homogeneity-of-variance test used by [`HypothesisEngine::has_equal_variance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VarianceMethod {
    /// Median-centred Levene test; no normality assumption.
    #[default]
    Levene,
    /// Bartlett test; every sample must be normal.
    Bartlett,
}

/// Selects and runs hypothesis tests at a fixed significance level.
///
/// The engine holds no per-call state, so one instance can serve any number
/// of threads.
#[derive(Clone)]
pub struct HypothesisEngine {
    alpha: SignificanceLevel,
    config: EngineConfig,
    handler: Arc<dyn NoticeHandler>,
}

impl std::fmt::Debug for HypothesisEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HypothesisEngine")
            .field("alpha", &self.alpha)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for HypothesisEngine {
    /// α = 0.05, default thresholds, notices go to the log.
    fn default() -> Self {
        Self {
            alpha: SignificanceLevel::default(),
            config: EngineConfig::default(),
            handler: Arc::new(LogHandler),
        }
    }
}

impl HypothesisEngine {
    /// Engine with significance level `alpha` and default thresholds.
    ///
    /// # Errors
    ///
    /// Returns a validation error unless `0 < alpha < 1`.
    pub fn new(alpha: f64) -> Result<Self> {
        Self::with_config(EngineConfig::with_alpha(alpha))
    }

    /// Engine built from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error if any field is out of range.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let alpha = config.significance_level()?;
        tracing::debug!(alpha = alpha.value(), "hypothesis engine configured");
        Ok(Self {
            alpha,
            config,
            handler: Arc::new(LogHandler),
        })
    }

    /// Replaces the notice handler.
    #[must_use]
    pub fn with_handler(mut self, handler: Arc<dyn NoticeHandler>) -> Self {
        self.handler = handler;
        self
    }

    /// Significance level α.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha.value()
    }

    /// Thresholds in effect.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub(crate) fn notify(&self, notice: Notice) {
        self.handler.on_notice(&notice);
    }

    /// Whether `sample` looks normally distributed at level α.
    ///
    /// Samples above the large-sample threshold (5000 by default) are tested
    /// with Kolmogorov-Smirnov against a normal with the sample's own mean and
    /// population standard deviation. Smaller samples use Shapiro-Wilk.
    /// Normal means p > α.
    ///
    /// # Errors
    ///
    /// Propagates kernel failures, e.g. Shapiro-Wilk on fewer than 3 values.
    pub fn is_normal(&self, sample: &[f64]) -> Result<bool> {
        let pvalue = if sample.len() > self.config.large_sample_threshold {
            let loc = mean(sample);
            let scale = std_dev(sample, 0)?;
            let ks = kstest_normal(sample, loc, scale)?;
            tracing::debug!(n = sample.len(), d = ks.statistic, p = ks.pvalue, "normality via Kolmogorov-Smirnov");
            ks.pvalue
        } else {
            let sw = shapiro(sample)?;
            tracing::debug!(n = sample.len(), w = sw.statistic, p = sw.pvalue, "normality via Shapiro-Wilk");
            sw.pvalue
        };
        Ok(pvalue > self.alpha())
    }

    /// Whether all `samples` share one variance at level α.
    ///
    /// # Errors
    ///
    /// [`VarianceMethod::Bartlett`] fails with a validation error if any
    /// sample is not normal. Kernel failures propagate.
    pub fn has_equal_variance(&self, samples: &[&[f64]], method: VarianceMethod) -> Result<bool> {
        let result = match method {
            VarianceMethod::Levene => levene(samples)?,
            VarianceMethod::Bartlett => {
                for sample in samples {
                    if !self.is_normal(sample)? {
                        return Err(HypothesisError::validation(
                            "Bartlett's test requires normality.",
                        ));
                    }
                }
                bartlett(samples)?
            }
        };
        tracing::debug!(?method, statistic = result.statistic, p = result.pvalue, "variance equality");
        Ok(result.pvalue > self.alpha())
    }

    /// Compares `p_value` with α and emits the verdict notice.
    pub fn check_significance(&self, p_value: f64) -> TestResult {
        let rejected = p_value < self.alpha();
        self.notify(Notice::Verdict {
            rejected,
            p_value,
            alpha: self.alpha(),
        });
        TestResult { rejected, p_value }
    }

    /// Normality precondition shared by the parametric tests.
    ///
    /// Passes when every sample is normal. Otherwise `clt` waives it only if
    /// `size` exceeds the CLT threshold.
    fn require_normal(&self, samples: &[&[f64]], size: usize, clt: bool, message: &str) -> Result<()> {
        for sample in samples {
            if !self.is_normal(sample)? {
                return self.apply_clt(size, clt, message);
            }
        }
        Ok(())
    }

    fn apply_clt(&self, size: usize, clt: bool, message: &str) -> Result<()> {
        if !clt {
            return Err(HypothesisError::validation(message));
        }
        if size <= self.config.clt_min_size {
            return Err(HypothesisError::validation(format!(
                "Unable to apply CLT for sample size <= {}",
                self.config.clt_min_size
            )));
        }
        tracing::debug!(size, "normality waived by the central limit theorem");
        Ok(())
    }

    /// True when every sample is normal; used for the advisory notices.
    fn all_normal(&self, samples: &[&[f64]]) -> Result<bool> {
        for sample in samples {
            if !self.is_normal(sample)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

fn require_equal_lengths(n1: usize, n2: usize, message: &str) -> Result<()> {
    if n1 == n2 {
        Ok(())
    } else {
        Err(HypothesisError::validation(format!(
            "{message} ({n1} vs {n2})"
        )))
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;

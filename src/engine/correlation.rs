//! Correlation tests.

use super::{require_equal_lengths, HypothesisEngine, TestResult};
use crate::error::{HypothesisError, Result};
use crate::stats::correlation::{pearsonr, spearmanr};
use crate::stats::descriptive::variance;

const LENGTH_MESSAGE: &str = "Sample lengths are not equal. Try using downsampling methods.";

impl HypothesisEngine {
    /// Pearson correlation test: H₀: no linear association.
    ///
    /// # Errors
    ///
    /// Validation error if the lengths differ, either sample has zero
    /// variance, or either sample is not normal.
    pub fn pearson_correlation(&self, sample1: &[f64], sample2: &[f64]) -> Result<TestResult> {
        require_equal_lengths(sample1.len(), sample2.len(), LENGTH_MESSAGE)?;
        if variance(sample1, 1)? == 0.0 || variance(sample2, 1)? == 0.0 {
            return Err(HypothesisError::validation(
                "Variance of a sample should not be 0. Try using Spearman correlation instead.",
            ));
        }
        if !self.all_normal(&[sample1, sample2])? {
            return Err(HypothesisError::validation(
                "Samples are not normally distributed.",
            ));
        }

        let result = pearsonr(sample1, sample2)?;
        tracing::debug!(r = result.statistic, "Pearson correlation");
        Ok(self.check_significance(result.pvalue))
    }

    /// Spearman rank correlation test: H₀: no monotonic association.
    ///
    /// # Errors
    ///
    /// Validation error if the lengths differ. Kernel failures propagate.
    pub fn spearman_correlation(&self, sample1: &[f64], sample2: &[f64]) -> Result<TestResult> {
        require_equal_lengths(sample1.len(), sample2.len(), LENGTH_MESSAGE)?;

        let result = spearmanr(sample1, sample2)?;
        tracing::debug!(rho = result.statistic, "Spearman correlation");
        Ok(self.check_significance(result.pvalue))
    }
}

//! t-tests and one-way ANOVA.
//!
//! These tests assume normal samples. Passing `clt = true` relaxes that for
//! samples large enough for the central limit theorem to carry the mean.

use super::{require_equal_lengths, HypothesisEngine, TestResult, VarianceMethod};
use crate::advisory::Notice;
use crate::error::Result;
use crate::stats::hypothesis::{f_oneway, ttest_1samp, ttest_ind, ttest_rel};

impl HypothesisEngine {
    /// One-sample t-test: H₀: the population mean is `population_mean`.
    ///
    /// # Errors
    ///
    /// Validation error if the sample is not normal and `clt` is false, or if
    /// `clt` is true but the sample is too small to rely on it.
    pub fn one_sample_ttest(
        &self,
        sample: &[f64],
        population_mean: f64,
        clt: bool,
    ) -> Result<TestResult> {
        self.require_normal(&[sample], sample.len(), clt, "Sample is not normally distributed")?;

        let result = ttest_1samp(sample, population_mean)?;
        tracing::debug!(t = result.statistic, df = result.df, "one-sample t-test");
        Ok(self.check_significance(result.pvalue))
    }

    /// Independent two-sample t-test: H₀: both populations share a mean.
    ///
    /// Uses the pooled-variance test when Levene finds the variances equal,
    /// and Welch's test otherwise.
    ///
    /// # Errors
    ///
    /// Validation error if the samples differ in size, or if the normality
    /// precondition fails (CLT relaxation is judged on `sample1`'s size).
    ///
    /// # Examples
    ///
    /// ```
    /// use hypotest::engine::HypothesisEngine;
    ///
    /// let engine = HypothesisEngine::default();
    /// let err = engine
    ///     .two_sample_ttest(&[1.0, 2.0, 3.0], &[1.0, 2.0], false)
    ///     .expect_err("different sizes");
    /// assert!(err.is_validation());
    /// ```
    pub fn two_sample_ttest(&self, sample1: &[f64], sample2: &[f64], clt: bool) -> Result<TestResult> {
        require_equal_lengths(sample1.len(), sample2.len(), "Samples are of different sizes")?;
        self.require_normal(
            &[sample1, sample2],
            sample1.len(),
            clt,
            "Samples are not normally distributed",
        )?;

        let equal_var = self.has_equal_variance(&[sample1, sample2], VarianceMethod::Levene)?;
        let result = ttest_ind(sample1, sample2, equal_var)?;
        tracing::debug!(t = result.statistic, df = result.df, equal_var, "two-sample t-test");
        Ok(self.check_significance(result.pvalue))
    }

    /// Paired t-test: H₀: the mean paired difference is zero.
    ///
    /// The sizes are not compared up front; the paired kernel itself rejects
    /// samples of different lengths.
    ///
    /// # Errors
    ///
    /// Validation error if the normality precondition fails. Unequal lengths
    /// surface as [`crate::error::HypothesisError::DimensionMismatch`].
    pub fn paired_ttest(&self, sample1: &[f64], sample2: &[f64], clt: bool) -> Result<TestResult> {
        self.require_normal(
            &[sample1, sample2],
            sample1.len(),
            clt,
            "Samples are not normally distributed",
        )?;

        let result = ttest_rel(sample1, sample2)?;
        tracing::debug!(t = result.statistic, df = result.df, "paired t-test");
        Ok(self.check_significance(result.pvalue))
    }

    /// One-way ANOVA: H₀: every group has the same mean.
    ///
    /// Unequal group sizes raise a single warning notice. Every group must
    /// pass the normality precondition on its own size. Bartlett's variance
    /// check runs and is logged, but its outcome does not block the F-test.
    ///
    /// # Errors
    ///
    /// Validation error if a group fails the normality precondition. Kernel
    /// failures (fewer than two groups, a constant group for Bartlett)
    /// propagate.
    pub fn anova(&self, samples: &[&[f64]], clt: bool) -> Result<TestResult> {
        let sizes: Vec<usize> = samples.iter().map(|s| s.len()).collect();
        if sizes.windows(2).any(|w| w[0] != w[1]) {
            self.notify(Notice::UnequalGroupSizes { sizes });
        }

        for &sample in samples {
            self.require_normal(&[sample], sample.len(), clt, "Sample is not normally distributed")?;
        }

        let equal_var = self.has_equal_variance(samples, VarianceMethod::Bartlett)?;
        tracing::debug!(equal_var, "ANOVA variance check (advisory only)");

        let result = f_oneway(samples)?;
        tracing::debug!(
            f = result.statistic,
            df_between = result.df_between,
            df_within = result.df_within,
            "one-way ANOVA"
        );
        Ok(self.check_significance(result.pvalue))
    }
}

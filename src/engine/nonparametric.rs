//! Rank-based tests for samples that are not normal.

use super::{require_equal_lengths, HypothesisEngine, TestResult};
use crate::advisory::Notice;
use crate::error::Result;
use crate::stats::rank::{kruskal, mannwhitneyu, wilcoxon};

impl HypothesisEngine {
    /// Two-sided Mann-Whitney U test: H₀: both samples come from the same
    /// distribution.
    ///
    /// Warns when the sizes are badly unbalanced, and when both samples are
    /// normal (a t-test would be stronger).
    ///
    /// # Errors
    ///
    /// Kernel failures propagate, including the normality check on samples
    /// of fewer than 3 values.
    pub fn mann_whitney_u(&self, sample1: &[f64], sample2: &[f64]) -> Result<TestResult> {
        let (n1, n2) = (sample1.len(), sample2.len());
        if n1.abs_diff(n2) as f64 > self.config.size_imbalance_ratio * n1.min(n2) as f64 {
            self.notify(Notice::SizeImbalance { n1, n2 });
        }
        if self.all_normal(&[sample1, sample2])? {
            self.notify(Notice::PreferParametric {
                test: "Mann-Whitney U",
                suggested: "a t-test",
            });
        }

        let result = mannwhitneyu(sample1, sample2)?;
        tracing::debug!(u = result.statistic, "Mann-Whitney U");
        Ok(self.check_significance(result.pvalue))
    }

    /// Two-sided Wilcoxon signed-rank test on paired samples.
    ///
    /// Identical samples give p = 1 and are never rejected.
    ///
    /// # Errors
    ///
    /// Validation error if the samples differ in size.
    pub fn wilcoxon_signed_rank(&self, sample1: &[f64], sample2: &[f64]) -> Result<TestResult> {
        require_equal_lengths(
            sample1.len(),
            sample2.len(),
            "Sample sizes are different. Try using samples with same sizes",
        )?;
        if self.all_normal(&[sample1, sample2])? {
            self.notify(Notice::PreferParametric {
                test: "Wilcoxon signed-rank",
                suggested: "a paired t-test",
            });
        }

        let result = wilcoxon(sample1, sample2)?;
        tracing::debug!(t = result.statistic, "Wilcoxon signed-rank");
        Ok(self.check_significance(result.pvalue))
    }

    /// Kruskal-Wallis H test: H₀: all groups come from the same
    /// distribution. No preconditions beyond what the kernel needs.
    pub fn kruskal_wallis(&self, samples: &[&[f64]]) -> Result<TestResult> {
        let result = kruskal(samples)?;
        tracing::debug!(h = result.statistic, groups = samples.len(), "Kruskal-Wallis");
        Ok(self.check_significance(result.pvalue))
    }
}

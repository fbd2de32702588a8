//! Independence tests on two categorical variables.

use super::{HypothesisEngine, TestResult};
use crate::advisory::Notice;
use crate::error::{HypothesisError, Result};
use crate::stats::contingency::{self, chi2_contingency, ContingencyTable};

impl HypothesisEngine {
    /// Chi-square test of independence between two categorical samples.
    ///
    /// The samples are cross-tabulated first. Yates' correction applies to
    /// 2×2 tables.
    ///
    /// # Errors
    ///
    /// Validation error when more than 20% of the expected cells fall below
    /// 5 (both thresholds configurable). Kernel failures propagate.
    ///
    /// # Examples
    ///
    /// ```
    /// use hypotest::engine::HypothesisEngine;
    ///
    /// let engine = HypothesisEngine::default();
    /// let gender = ["m", "f", "m", "f"];
    /// let choice = ["a", "b", "a", "b"];
    /// let err = engine.chi_square(&gender, &choice).expect_err("tiny table");
    /// assert!(err.is_validation());
    /// ```
    pub fn chi_square<R, C>(&self, sample1: &[R], sample2: &[C]) -> Result<TestResult>
    where
        R: Ord + Clone,
        C: Ord + Clone,
    {
        let table = ContingencyTable::crosstab(sample1, sample2)?;
        let result = chi2_contingency(table.counts())?;

        let low = result.cells_below(self.config.min_expected_frequency);
        let cells = result.n_cells();
        if low as f64 > self.config.max_low_expected_fraction * cells as f64 {
            return Err(HypothesisError::validation(format!(
                "Some expected frequencies are too small ({low} of {cells} cells below {}), Fisher's test is preferred.",
                self.config.min_expected_frequency
            )));
        }

        tracing::debug!(chi2 = result.statistic, dof = result.dof, "chi-square independence");
        Ok(self.check_significance(result.pvalue))
    }

    /// Two-sided Fisher exact test between two categorical samples.
    ///
    /// Warns when both samples reach the configured length (5 by default),
    /// since chi-square is usually adequate there.
    ///
    /// # Errors
    ///
    /// The cross-tabulation must be 2×2; any other shape is an
    /// [`HypothesisError::InvalidTable`].
    pub fn fisher_exact<R, C>(&self, sample1: &[R], sample2: &[C]) -> Result<TestResult>
    where
        R: Ord + Clone,
        C: Ord + Clone,
    {
        let (n1, n2) = (sample1.len(), sample2.len());
        let hint = self.config.fisher_length_hint;
        if n1 >= hint && n2 >= hint {
            self.notify(Notice::PreferChiSquare { n1, n2 });
        }

        let table = ContingencyTable::crosstab(sample1, sample2)?;
        let result = contingency::fisher_exact(table.counts())?;
        tracing::debug!(odds_ratio = result.odds_ratio, "Fisher exact");
        Ok(self.check_significance(result.pvalue))
    }
}

//! Student t-tests and one-way ANOVA.
//!
//! All p-values are two-sided. The t and F tails come from
//! [`super::distribution`].
//!
//! ```
//! use hypotest::stats::hypothesis::ttest_ind;
//!
//! let control = [2.3, 2.5, 2.7, 2.9, 3.1];
//! let dosed = [3.2, 3.4, 3.6, 3.8, 4.0];
//!
//! let r = ttest_ind(&control, &dosed, true).expect("two valid samples");
//! assert!(r.pvalue < 0.01);
//! ```

use super::descriptive::{mean, variance};
use super::distribution::{f_sf, t_two_sided};
use crate::error::{HypothesisError, Result};

/// t statistic, two-sided p-value and degrees of freedom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTestResult {
    pub statistic: f64,
    pub pvalue: f64,
    /// Fractional for Welch's test
    pub df: f64,
}

/// F statistic and upper-tail p-value of a one-way ANOVA.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnovaResult {
    pub statistic: f64,
    pub pvalue: f64,
    /// k - 1
    pub df_between: usize,
    /// N - k
    pub df_within: usize,
}

/// One-sample t-test of H₀: μ = `population_mean`.
///
/// # Errors
///
/// Fails with fewer than 2 observations or a zero-variance sample.
pub fn ttest_1samp(sample: &[f64], population_mean: f64) -> Result<TTestResult> {
    let n = sample.len();
    if n < 2 {
        return Err(HypothesisError::InsufficientData {
            required: 2,
            got: n,
            context: "one-sample t-test".into(),
        });
    }

    let sample_mean = mean(sample);
    let std = variance(sample, 1)?.sqrt();
    if std == 0.0 {
        return Err(HypothesisError::degenerate(
            "one-sample t-test",
            "sample has zero variance",
        ));
    }

    // t = (x̄ - μ₀) / (s / √n)
    let se = std / (n as f64).sqrt();
    let t_stat = (sample_mean - population_mean) / se;
    let df = (n - 1) as f64;

    Ok(TTestResult {
        statistic: t_stat,
        pvalue: t_two_sided(t_stat, df)?,
        df,
    })
}

/// Two-sample t-test of H₀: μ₁ = μ₂ for independent samples.
///
/// `equal_var` selects the pooled-variance Student test; otherwise Welch's
/// test with Welch-Satterthwaite degrees of freedom is used.
///
/// # Errors
///
/// Fails if either sample has fewer than 2 observations or both are constant.
pub fn ttest_ind(sample1: &[f64], sample2: &[f64], equal_var: bool) -> Result<TTestResult> {
    let n1 = sample1.len();
    let n2 = sample2.len();

    if n1 < 2 || n2 < 2 {
        return Err(HypothesisError::InsufficientData {
            required: 2,
            got: n1.min(n2),
            context: "two-sample t-test".into(),
        });
    }

    let mean1 = mean(sample1);
    let mean2 = mean(sample2);
    let var1 = variance(sample1, 1)?;
    let var2 = variance(sample2, 1)?;
    let (n1f, n2f) = (n1 as f64, n2 as f64);

    let (se, df) = if equal_var {
        // s²ₚ = ((n₁-1)s₁² + (n₂-1)s₂²) / (n₁+n₂-2)
        let pooled_var = ((n1f - 1.0) * var1 + (n2f - 1.0) * var2) / (n1f + n2f - 2.0);
        let se = (pooled_var * (1.0 / n1f + 1.0 / n2f)).sqrt();
        (se, n1f + n2f - 2.0)
    } else {
        let v1 = var1 / n1f;
        let v2 = var2 / n2f;
        let df = (v1 + v2).powi(2) / (v1 * v1 / (n1f - 1.0) + v2 * v2 / (n2f - 1.0));
        ((v1 + v2).sqrt(), df)
    };

    if se == 0.0 {
        return Err(HypothesisError::degenerate(
            "two-sample t-test",
            "both samples have zero variance",
        ));
    }

    let t_stat = (mean1 - mean2) / se;
    Ok(TTestResult {
        statistic: t_stat,
        pvalue: t_two_sided(t_stat, df)?,
        df,
    })
}

/// Paired t-test: a one-sample test of H₀: μ = 0 on `sample1[i] - sample2[i]`.
///
/// # Errors
///
/// Fails with [`HypothesisError::DimensionMismatch`] if the samples differ in
/// length, otherwise as [`ttest_1samp`] on the differences.
pub fn ttest_rel(sample1: &[f64], sample2: &[f64]) -> Result<TTestResult> {
    if sample1.len() != sample2.len() {
        return Err(HypothesisError::DimensionMismatch {
            expected: format!("{} paired observations", sample1.len()),
            actual: format!("{} observations in the second sample", sample2.len()),
        });
    }

    let differences: Vec<f64> = sample1.iter().zip(sample2).map(|(a, b)| a - b).collect();
    ttest_1samp(&differences, 0.0)
}

/// One-way ANOVA F-test of H₀: every group shares one mean.
///
/// Groups that are all constant but differ from each other give F = ∞ and
/// p = 0.
///
/// # Errors
///
/// Fails with fewer than 2 groups, an empty group, no within-group degrees of
/// freedom, or when every group is constant at the same value.
pub fn f_oneway(groups: &[&[f64]]) -> Result<AnovaResult> {
    let k = groups.len();
    if k < 2 {
        return Err(HypothesisError::InsufficientData {
            required: 2,
            got: k,
            context: "one-way ANOVA groups".into(),
        });
    }

    for (i, group) in groups.iter().enumerate() {
        if group.is_empty() {
            return Err(HypothesisError::InsufficientData {
                required: 1,
                got: 0,
                context: format!("one-way ANOVA group {i}"),
            });
        }
    }

    let n_total: usize = groups.iter().map(|g| g.len()).sum();
    let grand_mean = groups.iter().flat_map(|g| g.iter()).sum::<f64>() / n_total as f64;

    // between-group and within-group sums of squares
    let (ss_between, ss_within) = groups.iter().fold((0.0, 0.0), |(between, within), group| {
        let m = mean(group);
        let spread: f64 = group.iter().map(|v| (v - m).powi(2)).sum();
        (between + group.len() as f64 * (m - grand_mean).powi(2), within + spread)
    });

    let df_between = k - 1;
    let df_within = n_total - k;
    if df_within == 0 {
        return Err(HypothesisError::InsufficientData {
            required: k + 1,
            got: n_total,
            context: "one-way ANOVA observations".into(),
        });
    }

    let ms_between = ss_between / df_between as f64;
    let ms_within = ss_within / df_within as f64;

    if ms_within == 0.0 {
        if ms_between == 0.0 {
            return Err(HypothesisError::degenerate(
                "one-way ANOVA",
                "all groups are constant and equal",
            ));
        }
        return Ok(AnovaResult {
            statistic: f64::INFINITY,
            pvalue: 0.0,
            df_between,
            df_within,
        });
    }

    let f_stat = ms_between / ms_within;
    Ok(AnovaResult {
        statistic: f_stat,
        pvalue: f_sf(f_stat, df_between as f64, df_within as f64)?,
        df_between,
        df_within,
    })
}

#[cfg(test)]
#[path = "hypothesis_tests.rs"]
mod tests;

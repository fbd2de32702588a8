//! Homogeneity-of-variance tests.
//!
//! [`levene`] centres on the group median (Brown-Forsythe), which keeps it
//! robust to non-normal data. [`bartlett`] is more powerful but assumes every
//! group is normal.

use super::descriptive::{median, variance};
use super::distribution::chi2_sf;
use super::hypothesis::f_oneway;
use crate::error::{HypothesisError, Result};

/// Statistic and p-value of a variance-equality test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarianceTestResult {
    /// W for Levene, T for Bartlett
    pub statistic: f64,

    /// p-value
    pub pvalue: f64,
}

fn check_groups(groups: &[&[f64]], context: &str) -> Result<()> {
    if groups.len() < 2 {
        return Err(HypothesisError::InsufficientData {
            required: 2,
            got: groups.len(),
            context: format!("{context} groups"),
        });
    }
    for (i, g) in groups.iter().enumerate() {
        if g.len() < 2 {
            return Err(HypothesisError::InsufficientData {
                required: 2,
                got: g.len(),
                context: format!("{context} group {i}"),
            });
        }
    }
    Ok(())
}

/// Levene test, median-centred: H₀: all groups have equal variance.
///
/// Computes zᵢⱼ = |xᵢⱼ - median(groupᵢ)| and runs a one-way ANOVA on z.
///
/// # Errors
///
/// Fails with fewer than 2 groups, a group of fewer than 2 observations, or
/// when every absolute deviation is zero.
///
/// # Examples
///
/// ```
/// use hypotest::stats::variance::levene;
///
/// let g1 = [4.9, 5.0, 5.0, 5.1, 5.0];
/// let g2 = [0.0, 3.0, 5.0, 7.0, 10.0];
/// let r = levene(&[&g1, &g2]).expect("valid groups");
/// assert!(r.pvalue < 0.05);
/// ```
pub fn levene(groups: &[&[f64]]) -> Result<VarianceTestResult> {
    check_groups(groups, "Levene")?;

    let deviations = groups
        .iter()
        .map(|g| {
            let centre = median(g)?;
            Ok(g.iter().map(|&x| (x - centre).abs()).collect::<Vec<f64>>())
        })
        .collect::<Result<Vec<_>>>()?;
    let refs: Vec<&[f64]> = deviations.iter().map(Vec::as_slice).collect();

    let anova = f_oneway(&refs)?;
    Ok(VarianceTestResult {
        statistic: anova.statistic,
        pvalue: anova.pvalue,
    })
}

/// Bartlett test: H₀: all groups have equal variance, assuming normality.
///
/// T = [(N-k) ln s²ₚ - Σ(nᵢ-1) ln s²ᵢ] / C, which is χ²(k-1) under H₀.
///
/// # Errors
///
/// Fails with fewer than 2 groups, a group of fewer than 2 observations, or
/// any group with zero variance.
pub fn bartlett(groups: &[&[f64]]) -> Result<VarianceTestResult> {
    check_groups(groups, "Bartlett")?;

    let k = groups.len();
    let sizes: Vec<f64> = groups.iter().map(|g| g.len() as f64).collect();
    let vars = groups
        .iter()
        .map(|g| variance(g, 1))
        .collect::<Result<Vec<f64>>>()?;

    if let Some(i) = vars.iter().position(|&v| v <= 0.0) {
        return Err(HypothesisError::degenerate(
            "Bartlett",
            format!("group {i} has zero variance"),
        ));
    }

    let n_total: f64 = sizes.iter().sum();
    let nk = n_total - k as f64;

    let pooled = sizes
        .iter()
        .zip(&vars)
        .map(|(&n, &v)| (n - 1.0) * v)
        .sum::<f64>()
        / nk;

    let numerator = nk * pooled.ln()
        - sizes
            .iter()
            .zip(&vars)
            .map(|(&n, &v)| (n - 1.0) * v.ln())
            .sum::<f64>();

    let sum_recip: f64 = sizes.iter().map(|&n| 1.0 / (n - 1.0)).sum();
    let correction = 1.0 + (sum_recip - 1.0 / nk) / (3.0 * (k as f64 - 1.0));

    let statistic = numerator / correction;
    Ok(VarianceTestResult {
        statistic,
        pvalue: chi2_sf(statistic, (k - 1) as f64)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levene_detects_spread_difference() {
        let g1 = [4.9, 5.0, 5.0, 5.1, 5.0];
        let g2 = [0.0, 3.0, 5.0, 7.0, 10.0];
        let r = levene(&[&g1, &g2]).expect("valid groups");
        assert!(r.pvalue < 0.05);
        assert!(r.statistic > 0.0);
    }

    #[test]
    fn test_levene_equal_spread() {
        let g1 = [1.0, 2.0, 3.0, 4.0, 5.0];
        let g2 = [11.0, 12.0, 13.0, 14.0, 15.0];
        let r = levene(&[&g1, &g2]).expect("valid groups");
        assert!(r.statistic.abs() < 1e-12);
        assert!(r.pvalue > 0.99);
    }

    #[test]
    fn test_levene_needs_two_groups() {
        let g: &[f64] = &[1.0, 2.0, 3.0];
        let single: &[f64] = &[1.0];
        assert!(levene(&[g]).is_err());
        assert!(levene(&[g, single]).is_err());
    }

    #[test]
    fn test_levene_all_constant() {
        let g = [2.0, 2.0, 2.0];
        let err = levene(&[&g, &g]).expect_err("no spread at all");
        assert!(matches!(err, HypothesisError::Degenerate { .. }));
    }

    #[test]
    fn test_bartlett_detects_variance_difference() {
        let g1 = [2.0, 3.0, 4.0, 5.0, 6.0];
        let g2 = [10.0, 20.0, 30.0, 40.0, 50.0];
        let r = bartlett(&[&g1, &g2]).expect("valid groups");
        assert!(r.pvalue < 0.01);
    }

    #[test]
    fn test_bartlett_equal_variances() {
        let g1 = [1.0, 2.0, 3.0, 4.0, 5.0];
        let g2 = [6.0, 7.0, 8.0, 9.0, 10.0];
        let g3 = [3.0, 4.0, 5.0, 6.0, 7.0];
        let r = bartlett(&[&g1, &g2, &g3]).expect("valid groups");
        assert!(r.statistic.abs() < 1e-9);
        assert!(r.pvalue > 0.99);
    }

    #[test]
    fn test_bartlett_zero_variance() {
        let g1 = [1.0, 1.0, 1.0];
        let g2 = [1.0, 2.0, 3.0];
        let err = bartlett(&[&g1, &g2]).expect_err("constant group");
        assert!(matches!(err, HypothesisError::Degenerate { .. }));
    }
}

//! Correlation coefficients with significance tests.
//!
//! ## Pearson correlation
//!
//! ```text
//! r = Σ (xᵢ - x̄)(yᵢ - ȳ) / √(Σ (xᵢ - x̄)² · Σ (yᵢ - ȳ)²)
//! ```
//!
//! Under H₀ (no linear association) `t = r √((n-2)/(1-r²))` follows a
//! Student t distribution with n - 2 degrees of freedom.
//!
//! ## Spearman rank correlation
//!
//! Pearson's r computed on the average ranks of each variable, tested the
//! same way.

use super::descriptive::{mean, rankdata};
use super::distribution::t_two_sided;
use crate::error::{HypothesisError, Result};

/// Correlation coefficient and two-sided p-value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationResult {
    /// Correlation coefficient in [-1, 1]
    pub statistic: f64,

    /// p-value for H₀: no association
    pub pvalue: f64,
}

fn check_pair(x: &[f64], y: &[f64], context: &str) -> Result<()> {
    if x.len() != y.len() {
        return Err(HypothesisError::DimensionMismatch {
            expected: format!("{} values in x", x.len()),
            actual: format!("{} values in y", y.len()),
        });
    }
    if x.len() < 2 {
        return Err(HypothesisError::InsufficientData {
            required: 2,
            got: x.len(),
            context: context.into(),
        });
    }
    Ok(())
}

fn coefficient(x: &[f64], y: &[f64], context: &str) -> Result<f64> {
    let x_mean = mean(x);
    let y_mean = mean(y);

    let (sxy, sxx, syy) = x.iter().zip(y).fold((0.0, 0.0, 0.0), |(sxy, sxx, syy), (&xi, &yi)| {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        (sxy + dx * dy, sxx + dx * dx, syy + dy * dy)
    });

    if sxx == 0.0 || syy == 0.0 {
        return Err(HypothesisError::degenerate(
            context,
            "an input is constant, so the correlation is undefined",
        ));
    }

    Ok((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

fn significance(r: f64, n: usize) -> Result<f64> {
    if n == 2 {
        return Ok(1.0);
    }
    let df = (n - 2) as f64;
    let denom = 1.0 - r * r;
    if denom <= 0.0 {
        return Ok(0.0);
    }
    let t = r * (df / denom).sqrt();
    t_two_sided(t, df)
}

/// Pearson correlation with a two-sided t-test on r.
///
/// Two observations always correlate perfectly and report p = 1.
///
/// # Errors
///
/// Fails if the inputs differ in length, have fewer than 2 observations, or
/// either input is constant.
///
/// # Examples
///
/// ```
/// use hypotest::stats::correlation::pearsonr;
///
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [2.0, 4.0, 6.0, 8.0, 10.0];
/// let r = pearsonr(&x, &y).expect("valid input");
/// assert!((r.statistic - 1.0).abs() < 1e-12);
/// assert_eq!(r.pvalue, 0.0);
/// ```
pub fn pearsonr(x: &[f64], y: &[f64]) -> Result<CorrelationResult> {
    check_pair(x, y, "Pearson correlation")?;
    let r = coefficient(x, y, "Pearson correlation")?;
    Ok(CorrelationResult {
        statistic: r,
        pvalue: significance(r, x.len())?,
    })
}

/// Spearman rank correlation with a two-sided t-test on ρ.
///
/// # Errors
///
/// Same conditions as [`pearsonr`], applied to the ranks.
pub fn spearmanr(x: &[f64], y: &[f64]) -> Result<CorrelationResult> {
    check_pair(x, y, "Spearman correlation")?;
    let rho = coefficient(&rankdata(x), &rankdata(y), "Spearman correlation")?;
    Ok(CorrelationResult {
        statistic: rho,
        pvalue: significance(rho, x.len())?,
    })
}

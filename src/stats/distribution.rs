//! Tail probabilities of the reference distributions, backed by `statrs`.

use crate::error::{HypothesisError, Result};
use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor, Normal, StudentsT};

fn invalid(context: &str, err: impl std::fmt::Display) -> HypothesisError {
    HypothesisError::degenerate(context, err.to_string())
}

/// Two-tailed p-value of a t statistic with `df` degrees of freedom.
///
/// # Errors
///
/// Returns [`HypothesisError::Degenerate`] if `df` is not positive.
pub fn t_two_sided(t: f64, df: f64) -> Result<f64> {
    let dist = StudentsT::new(0.0, 1.0, df).map_err(|e| invalid("t distribution", e))?;
    Ok((2.0 * dist.sf(t.abs())).clamp(0.0, 1.0))
}

/// Upper tail P(F > f).
///
/// # Errors
///
/// Returns [`HypothesisError::Degenerate`] if either degree of freedom is not positive.
pub fn f_sf(f: f64, df1: f64, df2: f64) -> Result<f64> {
    let dist = FisherSnedecor::new(df1, df2).map_err(|e| invalid("F distribution", e))?;
    Ok(dist.sf(f).clamp(0.0, 1.0))
}

/// Upper tail P(χ² > x).
///
/// # Errors
///
/// Returns [`HypothesisError::Degenerate`] if `df` is not positive.
pub fn chi2_sf(x: f64, df: f64) -> Result<f64> {
    let dist = ChiSquared::new(df).map_err(|e| invalid("chi-square distribution", e))?;
    Ok(dist.sf(x).clamp(0.0, 1.0))
}

fn standard_normal() -> Normal {
    Normal::standard()
}

/// Standard normal CDF Φ(z).
#[must_use]
pub fn normal_cdf(z: f64) -> f64 {
    standard_normal().cdf(z)
}

/// Standard normal upper tail 1 - Φ(z), accurate far into the tail.
#[must_use]
pub fn normal_sf(z: f64) -> f64 {
    standard_normal().sf(z)
}

/// Standard normal quantile Φ⁻¹(p).
#[must_use]
pub fn normal_ppf(p: f64) -> f64 {
    standard_normal().inverse_cdf(p)
}

/// Upper tail of the limiting Kolmogorov distribution, P(K > λ).
///
/// Uses the theta-function form for small λ and the alternating series
/// otherwise; both converge in a handful of terms on their side of 1.18.
#[must_use]
pub fn kolmogorov_sf(lambda: f64) -> f64 {
    if lambda <= 0.0 {
        return 1.0;
    }
    if lambda < 1.18 {
        let y = (-std::f64::consts::PI.powi(2) / (8.0 * lambda * lambda)).exp();
        let mut cdf = 0.0;
        for k in 0..20 {
            let e = ((2 * k + 1) * (2 * k + 1)) as f64;
            let term = y.powf(e);
            cdf += term;
            if term < 1e-16 {
                break;
            }
        }
        cdf *= (2.0 * std::f64::consts::PI).sqrt() / lambda;
        (1.0 - cdf).clamp(0.0, 1.0)
    } else {
        let mut sf = 0.0;
        for k in 1..=100 {
            let kf = f64::from(k);
            let term = (-2.0 * kf * kf * lambda * lambda).exp();
            sf += if k % 2 == 1 { term } else { -term };
            if term < 1e-16 {
                break;
            }
        }
        (2.0 * sf).clamp(0.0, 1.0)
    }
}

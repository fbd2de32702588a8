//! Rank-based (non-parametric) tests.
//!
//! - [`mannwhitneyu`]: two independent samples
//! - [`wilcoxon`]: paired samples
//! - [`kruskal`]: k independent samples
//!
//! All three rank the pooled observations with average ranks for ties. The
//! two-sample tests use their exact null distribution when the samples are
//! small and tie-free, and a tie-corrected normal approximation otherwise.

use super::descriptive::{rankdata, tie_term};
use super::distribution::{chi2_sf, normal_sf};
use crate::error::{HypothesisError, Result};

/// Statistic and p-value of a rank test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankTestResult {
    /// U for Mann-Whitney, T for Wilcoxon, H for Kruskal-Wallis
    pub statistic: f64,

    /// p-value (two-sided where applicable)
    pub pvalue: f64,
}

/// Mann-Whitney exact distribution is used when either sample is this small.
const MWU_EXACT_MAX: usize = 8;

/// Wilcoxon exact distribution is used up to this many non-zero differences.
const WILCOXON_EXACT_MAX: usize = 50;

/// Mann-Whitney U test (two-sided): H₀: both samples come from the same
/// distribution.
///
/// The reported statistic is U₁, the count for `sample1`.
///
/// # Errors
///
/// Fails if either sample is empty.
///
/// # Examples
///
/// ```
/// use hypotest::stats::rank::mannwhitneyu;
///
/// let a = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let b = [6.0, 7.0, 8.0, 9.0, 10.0];
/// let r = mannwhitneyu(&a, &b).expect("valid samples");
/// assert_eq!(r.statistic, 0.0);
/// assert!(r.pvalue < 0.01);
/// ```
pub fn mannwhitneyu(sample1: &[f64], sample2: &[f64]) -> Result<RankTestResult> {
    let n1 = sample1.len();
    let n2 = sample2.len();
    if n1 == 0 || n2 == 0 {
        return Err(HypothesisError::InsufficientData {
            required: 1,
            got: 0,
            context: "Mann-Whitney U".into(),
        });
    }

    let pooled: Vec<f64> = sample1.iter().chain(sample2).copied().collect();
    let ranks = rankdata(&pooled);
    let (n1f, n2f) = (n1 as f64, n2 as f64);

    let r1: f64 = ranks[..n1].iter().sum();
    let u1 = r1 - n1f * (n1f + 1.0) / 2.0;
    let u2 = n1f * n2f - u1;
    let u_max = u1.max(u2);

    let ties = tie_term(&pooled);
    let pvalue = if n1.min(n2) <= MWU_EXACT_MAX && ties == 0.0 {
        tracing::debug!(n1, n2, "Mann-Whitney U using exact distribution");
        mwu_exact_sf(u_max.round() as usize, n1, n2)
    } else {
        let n = n1f + n2f;
        let mu = n1f * n2f / 2.0;
        let sigma = (n1f * n2f / 12.0 * ((n + 1.0) - ties / (n * (n - 1.0)))).sqrt();
        if sigma == 0.0 {
            return Err(HypothesisError::degenerate(
                "Mann-Whitney U",
                "all observations are identical",
            ));
        }
        // continuity correction
        let z = (u_max - mu - 0.5) / sigma;
        normal_sf(z)
    };

    Ok(RankTestResult {
        statistic: u1,
        pvalue: (2.0 * pvalue).clamp(0.0, 1.0),
    })
}

/// P(U ≥ u) under H₀ for sample sizes `n1`, `n2` with no ties.
fn mwu_exact_sf(u: usize, n1: usize, n2: usize) -> f64 {
    let counts = mwu_null_counts(n1, n2);
    let total: f64 = counts.iter().sum();
    let upper: f64 = counts.iter().skip(u).sum();
    upper / total
}

/// Number of arrangements giving each U = 0..=n1·n2: the coefficients of the
/// Gaussian binomial [n1 + n2, m]_q with m = min(n1, n2).
fn mwu_null_counts(n1: usize, n2: usize) -> Vec<f64> {
    let (m, n) = if n1 <= n2 { (n1, n2) } else { (n2, n1) };
    let max_u = m * n;
    let mut poly = vec![0.0; max_u + m + 1];
    poly[0] = 1.0;

    // Π_{i=1..m} (1 - q^{n+i}) / (1 - q^i)
    let mut degree = 0;
    for i in 1..=m {
        let shift = n + i;
        let raised = degree + shift;
        for k in (shift..=raised).rev() {
            poly[k] -= poly[k - shift];
        }
        for k in i..=raised {
            poly[k] += poly[k - i];
        }
        degree = raised - i;
    }
    poly.truncate(max_u + 1);
    poly
}

/// Wilcoxon signed-rank test (two-sided): H₀: the paired differences are
/// symmetric about zero.
///
/// Zero differences are discarded. When every difference is zero the samples
/// carry no evidence of a shift and the result is T = 0, p = 1.
///
/// # Errors
///
/// Fails with [`HypothesisError::DimensionMismatch`] if the samples differ in
/// length, or if they are empty.
///
/// # Examples
///
/// ```
/// use hypotest::stats::rank::wilcoxon;
///
/// let x = [1.0, 2.0, 3.0];
/// let r = wilcoxon(&x, &x).expect("valid samples");
/// assert_eq!(r.pvalue, 1.0);
/// ```
pub fn wilcoxon(sample1: &[f64], sample2: &[f64]) -> Result<RankTestResult> {
    if sample1.len() != sample2.len() {
        return Err(HypothesisError::DimensionMismatch {
            expected: format!("{} samples in sample1", sample1.len()),
            actual: format!("{} samples in sample2", sample2.len()),
        });
    }
    if sample1.is_empty() {
        return Err(HypothesisError::InsufficientData {
            required: 1,
            got: 0,
            context: "Wilcoxon signed-rank".into(),
        });
    }

    let all_diffs: Vec<f64> = sample1
        .iter()
        .zip(sample2)
        .map(|(&a, &b)| a - b)
        .collect();
    let diffs: Vec<f64> = all_diffs.iter().copied().filter(|&d| d != 0.0).collect();
    let zeros = all_diffs.len() - diffs.len();

    if diffs.is_empty() {
        tracing::debug!("Wilcoxon signed-rank: every difference is zero");
        return Ok(RankTestResult {
            statistic: 0.0,
            pvalue: 1.0,
        });
    }

    let abs_diffs: Vec<f64> = diffs.iter().map(|d| d.abs()).collect();
    let ranks = rankdata(&abs_diffs);
    let r_plus: f64 = diffs
        .iter()
        .zip(&ranks)
        .filter(|(&d, _)| d > 0.0)
        .map(|(_, &r)| r)
        .sum();
    let n = diffs.len();
    let nf = n as f64;
    let r_minus = nf * (nf + 1.0) / 2.0 - r_plus;
    let t = r_plus.min(r_minus);

    let ties = tie_term(&abs_diffs);
    let pvalue = if n <= WILCOXON_EXACT_MAX && zeros == 0 && ties == 0.0 {
        tracing::debug!(n, "Wilcoxon signed-rank using exact distribution");
        2.0 * wilcoxon_exact_cdf(t.round() as usize, n)
    } else {
        let mu = nf * (nf + 1.0) / 4.0;
        let var = nf * (nf + 1.0) * (2.0 * nf + 1.0) / 24.0 - ties / 48.0;
        if var <= 0.0 {
            return Err(HypothesisError::degenerate(
                "Wilcoxon signed-rank",
                "variance of the statistic is zero",
            ));
        }
        let z = (t - mu) / var.sqrt();
        2.0 * normal_sf(z.abs())
    };

    Ok(RankTestResult {
        statistic: t,
        pvalue: pvalue.clamp(0.0, 1.0),
    })
}

/// P(T⁺ ≤ t) under H₀ for `n` untied non-zero differences.
fn wilcoxon_exact_cdf(t: usize, n: usize) -> f64 {
    let max_sum = n * (n + 1) / 2;
    let mut counts = vec![0.0_f64; max_sum + 1];
    counts[0] = 1.0;
    for rank in 1..=n {
        for s in (rank..=max_sum).rev() {
            counts[s] += counts[s - rank];
        }
    }
    let total = 2.0_f64.powi(n as i32);
    counts.iter().take(t + 1).sum::<f64>() / total
}

/// Kruskal-Wallis H test: H₀: all groups come from the same distribution.
///
/// H = 12 / (N(N+1)) Σ nᵢ (R̄ᵢ - R̄)², divided by the tie correction, and
/// compared with χ²(k-1).
///
/// # Errors
///
/// Fails with fewer than 2 groups, an empty group, or when every observation
/// is identical.
pub fn kruskal(groups: &[&[f64]]) -> Result<RankTestResult> {
    let k = groups.len();
    if k < 2 {
        return Err(HypothesisError::InsufficientData {
            required: 2,
            got: k,
            context: "Kruskal-Wallis groups".into(),
        });
    }
    if let Some(i) = groups.iter().position(|g| g.is_empty()) {
        return Err(HypothesisError::InsufficientData {
            required: 1,
            got: 0,
            context: format!("Kruskal-Wallis group {i}"),
        });
    }

    let pooled: Vec<f64> = groups.iter().flat_map(|g| g.iter().copied()).collect();
    let nf = pooled.len() as f64;
    let ranks = rankdata(&pooled);

    let tie_correction = 1.0 - tie_term(&pooled) / (nf * nf * nf - nf);
    if tie_correction <= 0.0 {
        return Err(HypothesisError::degenerate(
            "Kruskal-Wallis",
            "all numbers are identical",
        ));
    }

    let mean_rank = (nf + 1.0) / 2.0;
    let mut offset = 0;
    let mut h = 0.0;
    for g in groups {
        let ni = g.len() as f64;
        let group_mean = ranks[offset..offset + g.len()].iter().sum::<f64>() / ni;
        h += ni * (group_mean - mean_rank).powi(2);
        offset += g.len();
    }
    h *= 12.0 / (nf * (nf + 1.0));
    h /= tie_correction;

    Ok(RankTestResult {
        statistic: h,
        pvalue: chi2_sf(h, (k - 1) as f64)?,
    })
}

#[cfg(test)]
#[path = "rank_tests.rs"]
mod tests;

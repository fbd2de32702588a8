//! Normality tests.
//!
//! - [`shapiro`]: Shapiro-Wilk W with Royston's (1992, 1995) coefficient and
//!   p-value approximations. Preferred for small and medium samples.
//! - [`kstest_normal`]: one-sample Kolmogorov-Smirnov against a normal
//!   distribution with given parameters, using the asymptotic Kolmogorov
//!   distribution with Stephens' small-sample correction.

use super::descriptive::sorted_copy;
use super::distribution::{kolmogorov_sf, normal_cdf, normal_ppf, normal_sf};
use crate::error::{HypothesisError, Result};
use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// Statistic and p-value of a goodness-of-fit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalityResult {
    /// W for Shapiro-Wilk, D for Kolmogorov-Smirnov
    pub statistic: f64,

    /// p-value
    pub pvalue: f64,
}

// Royston polynomial coefficients (AS R94)
const SW_C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.07119, 4.434685, -2.706056];
const SW_C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const SW_C3: [f64; 4] = [0.544, -0.39978, 0.025054, -6.714e-4];
const SW_C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const SW_C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const SW_C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const SW_G: [f64; 2] = [-2.273, 0.459];

/// Shapiro-Wilk test: H₀: the sample comes from a normal distribution.
///
/// A sample with zero range reports W = 1 and p = 1.
///
/// # Errors
///
/// Fails with fewer than 3 observations or non-finite values.
///
/// # Examples
///
/// ```
/// use hypotest::stats::normality::shapiro;
///
/// let data = [-1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5];
/// let r = shapiro(&data).expect("enough observations");
/// assert!(r.statistic > 0.9);
/// assert!(r.pvalue > 0.05);
/// ```
pub fn shapiro(data: &[f64]) -> Result<NormalityResult> {
    let n = data.len();
    if n < 3 {
        return Err(HypothesisError::InsufficientData {
            required: 3,
            got: n,
            context: "Shapiro-Wilk".into(),
        });
    }
    if data.iter().any(|v| !v.is_finite()) {
        return Err(HypothesisError::degenerate(
            "Shapiro-Wilk",
            "sample contains non-finite values",
        ));
    }

    let x = sorted_copy(data);
    if x[n - 1] - x[0] == 0.0 {
        tracing::debug!(n, "Shapiro-Wilk input has zero range");
        return Ok(NormalityResult {
            statistic: 1.0,
            pvalue: 1.0,
        });
    }

    if n == 3 {
        return Ok(shapiro_n3(&x));
    }

    let nn2 = n / 2;
    let a = sw_coefficients(n, nn2)?;
    let w = sw_statistic(&x, &a, nn2).min(1.0);
    let pvalue = sw_p_value(w, n);

    Ok(NormalityResult {
        statistic: w,
        pvalue: pvalue.clamp(0.0, 1.0),
    })
}

// n = 3: a = [√½, 0, -√½] and the null distribution is known exactly
fn shapiro_n3(x: &[f64]) -> NormalityResult {
    let mean = (x[0] + x[1] + x[2]) / 3.0;
    let ss = x.iter().map(|&v| (v - mean).powi(2)).sum::<f64>();
    let numerator = FRAC_1_SQRT_2 * (x[2] - x[0]);
    let w = (numerator * numerator / ss).clamp(0.75, 1.0);

    let p = 1.0 - (6.0 / PI) * w.sqrt().acos();
    NormalityResult {
        statistic: w,
        pvalue: p.clamp(0.0, 1.0),
    }
}

// c[0] + c[1]*x + c[2]*x^2 + ... (Horner)
fn sw_poly(c: &[f64], x: f64) -> f64 {
    c.iter().rev().fold(0.0, |acc, &ci| acc * x + ci)
}

fn sw_coefficients(n: usize, nn2: usize) -> Result<Vec<f64>> {
    let nf = n as f64;

    // Blom's approximation of the expected normal order statistics
    let m: Vec<f64> = (0..nn2)
        .map(|i| normal_ppf((i as f64 + 1.0 - 0.375) / (nf + 0.25)))
        .collect();
    let summ2 = 2.0 * m.iter().map(|mi| mi * mi).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / nf.sqrt();

    let a1 = sw_poly(&SW_C1, rsn) - m[0] / ssumm2;
    let mut a = vec![0.0; nn2];

    let (first_free, fac_sq, one_minus) = if n <= 5 {
        a[0] = a1;
        (1, summ2 - 2.0 * m[0] * m[0], 1.0 - 2.0 * a1 * a1)
    } else {
        let a2 = -m[1] / ssumm2 + sw_poly(&SW_C2, rsn);
        a[0] = a1;
        a[1] = a2;
        (
            2,
            summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1],
            1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2,
        )
    };

    if fac_sq <= 0.0 || one_minus <= 0.0 {
        return Err(HypothesisError::degenerate(
            "Shapiro-Wilk",
            "coefficient normalisation failed",
        ));
    }
    let fac = (fac_sq / one_minus).sqrt();
    for i in first_free..nn2 {
        a[i] = -m[i] / fac;
    }

    Ok(a)
}

// W = (Σ aᵢ (x₍ₙ₊₁₋ᵢ₎ - x₍ᵢ₎))² / Σ (xᵢ - x̄)²
fn sw_statistic(x: &[f64], a: &[f64], nn2: usize) -> f64 {
    let n = x.len();
    let sa: f64 = (0..nn2).map(|i| a[i] * (x[n - 1 - i] - x[i])).sum();
    let mean = x.iter().sum::<f64>() / n as f64;
    let ss: f64 = x.iter().map(|&v| (v - mean).powi(2)).sum();
    (sa * sa) / ss
}

fn sw_p_value(w: f64, n: usize) -> f64 {
    let nf = n as f64;
    let w1 = 1.0 - w;
    if w1 <= 0.0 {
        return 1.0;
    }
    let y = w1.ln();

    if n <= 11 {
        let gamma = sw_poly(&SW_G, nf);
        if y >= gamma {
            return 0.0;
        }
        let y2 = -(gamma - y).ln();
        let m = sw_poly(&SW_C3, nf);
        let s = sw_poly(&SW_C4, nf).exp();
        normal_sf((y2 - m) / s)
    } else {
        let xx = nf.ln();
        let m = sw_poly(&SW_C5, xx);
        let s = sw_poly(&SW_C6, xx).exp();
        normal_sf((y - m) / s)
    }
}

/// One-sample Kolmogorov-Smirnov test against N(`loc`, `scale`²).
///
/// # Errors
///
/// Fails on an empty sample or a non-positive `scale`.
///
/// # Examples
///
/// ```
/// use hypotest::stats::normality::kstest_normal;
///
/// let data: Vec<f64> = (1..100).map(|i| f64::from(i) / 100.0).collect();
/// let r = kstest_normal(&data, 0.0, 1.0).expect("valid input");
/// assert!(r.pvalue < 0.001); // all mass in (0, 1)
/// ```
pub fn kstest_normal(data: &[f64], loc: f64, scale: f64) -> Result<NormalityResult> {
    let n = data.len();
    if n == 0 {
        return Err(HypothesisError::InsufficientData {
            required: 1,
            got: 0,
            context: "Kolmogorov-Smirnov".into(),
        });
    }
    if !(scale > 0.0) || !scale.is_finite() {
        return Err(HypothesisError::degenerate(
            "Kolmogorov-Smirnov",
            format!("reference scale must be positive, got {scale}"),
        ));
    }

    let nf = n as f64;
    let d = sorted_copy(data)
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let cdf = normal_cdf((x - loc) / scale);
            let d_plus = (i as f64 + 1.0) / nf - cdf;
            let d_minus = cdf - i as f64 / nf;
            d_plus.max(d_minus)
        })
        .fold(0.0_f64, f64::max);

    let sqrt_n = nf.sqrt();
    let lambda = (sqrt_n + 0.12 + 0.11 / sqrt_n) * d;

    Ok(NormalityResult {
        statistic: d,
        pvalue: kolmogorov_sf(lambda),
    })
}

#[cfg(test)]
#[path = "normality_tests.rs"]
mod tests;

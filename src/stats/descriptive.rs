//! Sample moments, medians and ranking shared by the test kernels.

use crate::error::{HypothesisError, Result};
use std::cmp::Ordering;

/// Arithmetic mean. Returns `NaN` for an empty slice.
#[must_use]
pub fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

/// Variance with `ddof` delta degrees of freedom (`ddof = 1` is the sample
/// variance, `ddof = 0` the population variance).
///
/// # Errors
///
/// Returns [`HypothesisError::InsufficientData`] if `data.len() <= ddof`.
pub fn variance(data: &[f64], ddof: usize) -> Result<f64> {
    let n = data.len();
    if n <= ddof {
        return Err(HypothesisError::InsufficientData {
            required: ddof + 1,
            got: n,
            context: "variance".into(),
        });
    }
    let m = mean(data);
    let ss = data.iter().map(|&x| (x - m).powi(2)).sum::<f64>();
    Ok(ss / (n - ddof) as f64)
}

/// Standard deviation with `ddof` delta degrees of freedom.
///
/// # Errors
///
/// Same as [`variance`].
pub fn std_dev(data: &[f64], ddof: usize) -> Result<f64> {
    variance(data, ddof).map(f64::sqrt)
}

/// Median of an unsorted slice.
///
/// # Errors
///
/// Returns [`HypothesisError::InsufficientData`] for an empty slice.
pub fn median(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(HypothesisError::InsufficientData {
            required: 1,
            got: 0,
            context: "median".into(),
        });
    }
    let sorted = sorted_copy(data);
    let n = sorted.len();
    if n % 2 == 1 {
        Ok(sorted[n / 2])
    } else {
        Ok((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

/// Ascending copy; NaN compares equal to everything.
#[must_use]
pub fn sorted_copy(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// Average ranks (1-based) in input order; ties share the mean of their
/// positions.
///
/// ```
/// use hypotest::stats::rankdata;
///
/// assert_eq!(rankdata(&[10.0, 20.0, 10.0, 30.0]), vec![1.5, 3.0, 1.5, 4.0]);
/// ```
#[must_use]
pub fn rankdata(data: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..data.len()).collect();
    order.sort_by(|&a, &b| data[a].partial_cmp(&data[b]).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0.0; data.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i + 1;
        while j < order.len() && data[order[j]] == data[order[i]] {
            j += 1;
        }
        // positions i..j are tied
        let avg_rank = (i + 1 + j) as f64 / 2.0;
        for &idx in &order[i..j] {
            ranks[idx] = avg_rank;
        }
        i = j;
    }
    ranks
}

/// Sizes of every group of tied values (groups of one included).
#[must_use]
pub fn tie_group_sizes(data: &[f64]) -> Vec<usize> {
    let sorted = sorted_copy(data);
    let mut sizes = Vec::new();
    let mut i = 0;
    while i < sorted.len() {
        let mut j = i + 1;
        while j < sorted.len() && sorted[j] == sorted[i] {
            j += 1;
        }
        sizes.push(j - i);
        i = j;
    }
    sizes
}

/// Σ (t³ - t) over tie groups; zero when all values are distinct.
#[must_use]
pub fn tie_term(data: &[f64]) -> f64 {
    tie_group_sizes(data)
        .into_iter()
        .filter(|&t| t > 1)
        .map(|t| {
            let t = t as f64;
            t * t * t - t
        })
        .sum()
}

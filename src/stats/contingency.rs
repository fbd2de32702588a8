//! Contingency tables and tests of independence.
//!
//! [`ContingencyTable::crosstab`] counts co-occurrences of two categorical
//! variables. [`chi2_contingency`] and [`fisher_exact`] test the resulting
//! table for independence.

use super::distribution::chi2_sf;
use crate::error::{HypothesisError, Result};
use statrs::function::factorial::ln_factorial;
use std::collections::{BTreeMap, BTreeSet};

/// Frequency table of two categorical variables.
///
/// Rows are the distinct values of the first variable and columns the
/// distinct values of the second, both in ascending order. The two variables
/// may use different label types.
///
/// # Examples
///
/// ```
/// use hypotest::stats::contingency::ContingencyTable;
///
/// let smoker = ["yes", "no", "yes", "no", "no"];
/// let cough = ["yes", "no", "yes", "yes", "no"];
/// let table = ContingencyTable::crosstab(&smoker, &cough).expect("same length");
///
/// assert_eq!(table.shape(), (2, 2));
/// assert_eq!(table.row_labels(), &["no", "yes"]);
/// assert_eq!(table.counts()[1][1], 2); // yes/yes
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContingencyTable<R, C> {
    rows: Vec<R>,
    cols: Vec<C>,
    counts: Vec<Vec<u64>>,
}

impl<R: Ord + Clone, C: Ord + Clone> ContingencyTable<R, C> {
    /// Cross-tabulates two equally long sequences of labels.
    ///
    /// # Errors
    ///
    /// Fails with [`HypothesisError::DimensionMismatch`] if the inputs differ
    /// in length.
    pub fn crosstab(first: &[R], second: &[C]) -> Result<Self> {
        if first.len() != second.len() {
            return Err(HypothesisError::DimensionMismatch {
                expected: format!("{} labels in first variable", first.len()),
                actual: format!("{} labels in second variable", second.len()),
            });
        }

        let rows: Vec<R> = first.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect();
        let cols: Vec<C> = second.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect();
        let row_index: BTreeMap<&R, usize> = rows.iter().enumerate().map(|(i, r)| (r, i)).collect();
        let col_index: BTreeMap<&C, usize> = cols.iter().enumerate().map(|(j, c)| (c, j)).collect();

        let mut counts = vec![vec![0_u64; cols.len()]; rows.len()];
        for (a, b) in first.iter().zip(second) {
            counts[row_index[a]][col_index[b]] += 1;
        }

        Ok(Self { rows, cols, counts })
    }
}

impl<R, C> ContingencyTable<R, C> {
    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.cols.len())
    }

    /// Distinct values of the first variable.
    pub fn row_labels(&self) -> &[R] {
        &self.rows
    }

    /// Distinct values of the second variable.
    pub fn col_labels(&self) -> &[C] {
        &self.cols
    }

    /// Observed frequencies, one inner vector per row.
    pub fn counts(&self) -> &[Vec<u64>] {
        &self.counts
    }

    /// Total number of observations.
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }
}

/// Result of Pearson's chi-square test of independence.
#[derive(Debug, Clone, PartialEq)]
pub struct Chi2ContingencyResult {
    /// χ² statistic (Yates-corrected when `dof == 1`)
    pub statistic: f64,

    /// p-value
    pub pvalue: f64,

    /// Degrees of freedom, (rows - 1)(cols - 1)
    pub dof: usize,

    /// Expected frequencies under independence
    pub expected: Vec<Vec<f64>>,
}

impl Chi2ContingencyResult {
    /// Number of cells whose expected frequency is below `threshold`.
    pub fn cells_below(&self, threshold: f64) -> usize {
        self.expected
            .iter()
            .flatten()
            .filter(|&&e| e < threshold)
            .count()
    }

    /// Total number of cells.
    pub fn n_cells(&self) -> usize {
        self.expected.iter().map(Vec::len).sum()
    }
}

fn check_rectangular(observed: &[Vec<u64>]) -> Result<(usize, usize)> {
    let n_rows = observed.len();
    let n_cols = observed.first().map_or(0, Vec::len);
    if n_rows == 0 || n_cols == 0 {
        return Err(HypothesisError::InvalidTable {
            message: "table is empty".into(),
        });
    }
    if observed.iter().any(|row| row.len() != n_cols) {
        return Err(HypothesisError::InvalidTable {
            message: "rows have different lengths".into(),
        });
    }
    Ok((n_rows, n_cols))
}

/// Chi-square test of independence on an observed frequency table.
///
/// Expected frequencies are `row_total · col_total / N`. With one degree of
/// freedom Yates' continuity correction moves each observed count up to 0.5
/// towards its expected value. A table with a single row or column has zero
/// degrees of freedom and reports χ² = 0, p = 1.
///
/// # Errors
///
/// Fails with [`HypothesisError::InvalidTable`] for an empty or ragged table,
/// or when any expected frequency is zero.
///
/// # Examples
///
/// ```
/// use hypotest::stats::contingency::chi2_contingency;
///
/// let observed = vec![vec![20, 5], vec![5, 20]];
/// let r = chi2_contingency(&observed).expect("valid table");
/// assert_eq!(r.dof, 1);
/// assert!(r.pvalue < 0.001);
/// ```
pub fn chi2_contingency(observed: &[Vec<u64>]) -> Result<Chi2ContingencyResult> {
    let (n_rows, n_cols) = check_rectangular(observed)?;

    let row_totals: Vec<f64> = observed
        .iter()
        .map(|row| row.iter().sum::<u64>() as f64)
        .collect();
    let col_totals: Vec<f64> = (0..n_cols)
        .map(|j| observed.iter().map(|row| row[j]).sum::<u64>() as f64)
        .collect();
    let total: f64 = row_totals.iter().sum();

    let expected: Vec<Vec<f64>> = row_totals
        .iter()
        .map(|&r| col_totals.iter().map(|&c| r * c / total).collect())
        .collect();

    if expected.iter().flatten().any(|&e| !(e > 0.0)) {
        return Err(HypothesisError::InvalidTable {
            message: "a row or column sums to zero, so an expected frequency is zero".into(),
        });
    }

    let dof = (n_rows - 1) * (n_cols - 1);
    if dof == 0 {
        return Ok(Chi2ContingencyResult {
            statistic: 0.0,
            pvalue: 1.0,
            dof,
            expected,
        });
    }

    let yates = dof == 1;
    let statistic: f64 = observed
        .iter()
        .zip(&expected)
        .flat_map(|(obs_row, exp_row)| obs_row.iter().zip(exp_row))
        .map(|(&o, &e)| {
            let mut o = o as f64;
            if yates {
                let diff = e - o;
                o += diff.signum() * diff.abs().min(0.5);
            }
            (o - e).powi(2) / e
        })
        .sum();

    Ok(Chi2ContingencyResult {
        statistic,
        pvalue: chi2_sf(statistic, dof as f64)?,
        dof,
        expected,
    })
}

/// Result of Fisher's exact test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FisherResult {
    /// Sample odds ratio a·d / (b·c); infinite when b·c = 0, NaN when undefined
    pub odds_ratio: f64,

    /// Two-sided p-value
    pub pvalue: f64,
}

/// Fisher's exact test on a 2×2 table `[[a, b], [c, d]]`.
///
/// The two-sided p-value sums the hypergeometric probabilities of every table
/// with the same margins that is no more likely than the observed one. A
/// table with an empty row or column gives p = 1.
///
/// # Errors
///
/// Fails with [`HypothesisError::InvalidTable`] unless the table is 2×2.
///
/// # Examples
///
/// ```
/// use hypotest::stats::contingency::fisher_exact;
///
/// // lady tasting tea
/// let r = fisher_exact(&[vec![3, 1], vec![1, 3]]).expect("2x2 table");
/// assert!((r.pvalue - 0.4857).abs() < 1e-4);
/// assert_eq!(r.odds_ratio, 9.0);
/// ```
pub fn fisher_exact(table: &[Vec<u64>]) -> Result<FisherResult> {
    let shape = check_rectangular(table)?;
    if shape != (2, 2) {
        return Err(HypothesisError::InvalidTable {
            message: format!(
                "Fisher's exact test needs a 2x2 table, got {}x{}",
                shape.0, shape.1
            ),
        });
    }

    let (a, b, c, d) = (table[0][0], table[0][1], table[1][0], table[1][1]);
    let odds_ratio = if b * c > 0 {
        (a as f64 * d as f64) / (b as f64 * c as f64)
    } else if a * d > 0 {
        f64::INFINITY
    } else {
        f64::NAN
    };

    let row1 = a + b;
    let row2 = c + d;
    let col1 = a + c;
    let col2 = b + d;
    if row1 == 0 || row2 == 0 || col1 == 0 || col2 == 0 {
        tracing::debug!("Fisher exact: table has an empty margin");
        return Ok(FisherResult {
            odds_ratio: f64::NAN,
            pvalue: 1.0,
        });
    }

    let n = row1 + row2;
    let log_margins =
        ln_factorial(row1) + ln_factorial(row2) + ln_factorial(col1) + ln_factorial(col2)
            - ln_factorial(n);
    let log_prob = |x: u64| -> f64 {
        log_margins
            - ln_factorial(x)
            - ln_factorial(row1 - x)
            - ln_factorial(col1 - x)
            - ln_factorial(row2 + x - col1)
    };

    // relative tolerance on P(observed)
    let cutoff = log_prob(a) + 1e-7_f64.ln_1p();
    let lo = col1.saturating_sub(row2);
    let hi = row1.min(col1);
    let pvalue: f64 = (lo..=hi)
        .map(log_prob)
        .filter(|&lp| lp <= cutoff)
        .map(f64::exp)
        .sum();

    Ok(FisherResult {
        odds_ratio,
        pvalue: pvalue.min(1.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crosstab_counts_and_order() {
        let a = [2, 1, 2, 3, 1, 2];
        let b = ['x', 'y', 'y', 'x', 'x', 'x'];
        let table = ContingencyTable::crosstab(&a, &b).expect("same length");

        assert_eq!(table.shape(), (3, 2));
        assert_eq!(table.row_labels(), &[1, 2, 3]);
        assert_eq!(table.col_labels(), &['x', 'y']);
        assert_eq!(table.counts(), &[vec![1, 1], vec![2, 1], vec![1, 0]]);
        assert_eq!(table.total(), 6);
    }

    #[test]
    fn test_crosstab_length_mismatch() {
        let err = ContingencyTable::crosstab(&["a", "b"], &["a"]).expect_err("lengths differ");
        assert!(matches!(err, HypothesisError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_chi2_yates_corrected() {
        let r = chi2_contingency(&[vec![10, 20], vec![30, 40]]).expect("valid table");
        assert_eq!(r.dof, 1);
        assert!((r.statistic - 0.446429).abs() < 1e-5);
        assert!((r.pvalue - 0.504036).abs() < 1e-5);
        assert_eq!(r.expected, vec![vec![12.0, 18.0], vec![28.0, 42.0]]);
    }

    #[test]
    fn test_chi2_two_by_three() {
        let r = chi2_contingency(&[vec![12, 5, 7], vec![3, 15, 9]]).expect("valid table");
        assert_eq!(r.dof, 2);
        assert!((r.statistic - 10.509896).abs() < 1e-5);
        assert!((r.pvalue - 0.005222).abs() < 1e-5);
        assert_eq!(r.n_cells(), 6);
        assert_eq!(r.cells_below(8.0), 3);
    }

    #[test]
    fn test_chi2_single_row_has_no_freedom() {
        let r = chi2_contingency(&[vec![4, 7, 9]]).expect("valid table");
        assert_eq!(r.dof, 0);
        assert_eq!(r.statistic, 0.0);
        assert_eq!(r.pvalue, 1.0);
    }

    #[test]
    fn test_chi2_zero_margin() {
        let err = chi2_contingency(&[vec![0, 0], vec![3, 4]]).expect_err("empty row");
        assert!(matches!(err, HypothesisError::InvalidTable { .. }));
    }

    #[test]
    fn test_chi2_ragged_table() {
        assert!(chi2_contingency(&[vec![1, 2], vec![3]]).is_err());
        assert!(chi2_contingency(&[]).is_err());
    }

    #[test]
    fn test_fisher_known_values() {
        let r = fisher_exact(&[vec![8, 2], vec![1, 5]]).expect("2x2 table");
        assert!((r.pvalue - 0.034965).abs() < 1e-5);
        assert_eq!(r.odds_ratio, 20.0);

        let r = fisher_exact(&[vec![1, 9], vec![11, 3]]).expect("2x2 table");
        assert!((r.pvalue - 0.002759).abs() < 1e-5);
    }

    #[test]
    fn test_fisher_proportional_table() {
        let r = fisher_exact(&[vec![5, 5], vec![5, 5]]).expect("2x2 table");
        assert!((r.pvalue - 1.0).abs() < 1e-9);
        assert_eq!(r.odds_ratio, 1.0);
    }

    #[test]
    fn test_fisher_zero_cells() {
        let r = fisher_exact(&[vec![10, 0], vec![0, 10]]).expect("2x2 table");
        assert!(r.pvalue < 0.001);
        assert!(r.odds_ratio.is_infinite());

        let r = fisher_exact(&[vec![0, 0], vec![3, 4]]).expect("2x2 table");
        assert_eq!(r.pvalue, 1.0);
        assert!(r.odds_ratio.is_nan());
    }

    #[test]
    fn test_fisher_rejects_larger_tables() {
        let err = fisher_exact(&[vec![1, 2, 3], vec![4, 5, 6]]).expect_err("2x3 table");
        assert!(matches!(err, HypothesisError::InvalidTable { .. }));
    }
}

//! Property-based tests using proptest.
//!
//! These tests verify invariants of the kernels and the significance decision.

use hypotest::prelude::*;
use hypotest::stats::{
    chi2_contingency, kruskal, mannwhitneyu, pearsonr, rankdata, ttest_ind, ContingencyTable,
};
use proptest::prelude::*;

// Strategy for generating samples of a given length range
fn sample_strategy(min: usize, max: usize) -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(-100.0f64..100.0, min..max)
}

// Strategy for small categorical samples of equal length
fn paired_labels(len: usize) -> impl Strategy<Value = (Vec<u8>, Vec<u8>)> {
    (
        proptest::collection::vec(0u8..3, len),
        proptest::collection::vec(0u8..4, len),
    )
}

fn is_probability(p: f64) -> bool {
    (0.0..=1.0).contains(&p)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn significance_decision_matches_threshold(p in 0.0f64..=1.0, alpha in 0.001f64..0.999) {
        let engine = HypothesisEngine::new(alpha).expect("alpha in (0, 1)");
        let result = engine.check_significance(p);
        prop_assert_eq!(result.rejected, p < alpha);
        prop_assert_eq!(result.p_value, p);
    }

    #[test]
    fn alpha_outside_unit_interval_is_rejected(alpha in prop_oneof![-10.0f64..=0.0, 1.0f64..10.0]) {
        prop_assert!(HypothesisEngine::new(alpha).is_err());
    }

    #[test]
    fn rank_sum_is_triangular(data in sample_strategy(1, 60)) {
        let n = data.len() as f64;
        let total: f64 = rankdata(&data).iter().sum();
        prop_assert!((total - n * (n + 1.0) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn ranks_preserve_order(data in sample_strategy(2, 40)) {
        let ranks = rankdata(&data);
        for i in 0..data.len() {
            for j in 0..data.len() {
                if data[i] < data[j] {
                    prop_assert!(ranks[i] < ranks[j]);
                }
            }
        }
    }

    #[test]
    fn mannwhitneyu_pvalue_is_probability(a in sample_strategy(2, 30), b in sample_strategy(2, 30)) {
        if let Ok(result) = mannwhitneyu(&a, &b) {
            prop_assert!(is_probability(result.pvalue));
            // U1 lies between 0 and n1 * n2
            prop_assert!(result.statistic >= 0.0);
            prop_assert!(result.statistic <= (a.len() * b.len()) as f64);
        }
    }

    #[test]
    fn kruskal_pvalue_is_probability(
        a in sample_strategy(2, 20),
        b in sample_strategy(2, 20),
        c in sample_strategy(2, 20),
    ) {
        if let Ok(result) = kruskal(&[&a, &b, &c]) {
            prop_assert!(is_probability(result.pvalue));
            prop_assert!(result.statistic >= 0.0);
        }
    }

    #[test]
    fn ttest_ind_pvalue_is_probability(a in sample_strategy(3, 30), b in sample_strategy(3, 30)) {
        if let Ok(result) = ttest_ind(&a, &b, true) {
            prop_assert!(is_probability(result.pvalue));
        }
    }

    #[test]
    fn ttest_ind_is_symmetric(a in sample_strategy(3, 30), b in sample_strategy(3, 30)) {
        if let (Ok(ab), Ok(ba)) = (ttest_ind(&a, &b, false), ttest_ind(&b, &a, false)) {
            prop_assert!((ab.statistic + ba.statistic).abs() < 1e-9);
            prop_assert!((ab.pvalue - ba.pvalue).abs() < 1e-9);
        }
    }

    #[test]
    fn pearson_coefficient_is_bounded(pairs in proptest::collection::vec((-50.0f64..50.0, -50.0f64..50.0), 3..40)) {
        let (x, y): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        if let Ok(result) = pearsonr(&x, &y) {
            prop_assert!(result.statistic.abs() <= 1.0 + 1e-12);
            prop_assert!(is_probability(result.pvalue));
        }
    }

    #[test]
    fn crosstab_counts_every_observation((first, second) in paired_labels(25)) {
        let table = ContingencyTable::crosstab(&first, &second).expect("equal lengths");
        prop_assert_eq!(table.total(), 25);

        let (rows, cols) = table.shape();
        prop_assert_eq!(rows, table.row_labels().len());
        prop_assert_eq!(cols, table.col_labels().len());

        if let Ok(result) = chi2_contingency(table.counts()) {
            prop_assert!(is_probability(result.pvalue));
            prop_assert_eq!(result.dof, (rows - 1) * (cols - 1));
            let expected_total: f64 = result.expected.iter().flatten().sum();
            prop_assert!((expected_total - 25.0).abs() < 1e-9);
        }
    }
}

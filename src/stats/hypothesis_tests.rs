use super::*;

#[test]
fn test_ttest_1samp_pvalue_bounded() {
    let sample = vec![2.0, 2.5, 3.0, 3.5, 4.0];
    let result = ttest_1samp(&sample, 3.0).expect("valid input");

    assert!((0.0..=1.0).contains(&result.pvalue));
    // mean equals the hypothesised mean exactly
    assert!(result.statistic.abs() < 1e-12);
    assert!((result.pvalue - 1.0).abs() < 1e-6);
    assert_eq!(result.df, 4.0);
}

#[test]
fn test_ttest_1samp_known_value() {
    // mean 11.2, s = 1.4405, t = (11.2 - 10) / (1.4405 / √5)
    let sample = vec![10.0, 12.0, 11.5, 13.0, 9.5];
    let result = ttest_1samp(&sample, 10.0).expect("valid input");

    assert!((result.statistic - 1.8628).abs() < 1e-3);
    assert!((result.pvalue - 0.1360).abs() < 1e-3);
}

#[test]
fn test_ttest_1samp_too_small() {
    let err = ttest_1samp(&[1.0], 0.0).expect_err("single observation");
    assert!(matches!(err, HypothesisError::InsufficientData { .. }));
}

#[test]
fn test_ttest_1samp_zero_variance() {
    let err = ttest_1samp(&[2.0, 2.0, 2.0], 1.0).expect_err("constant sample");
    assert!(matches!(err, HypothesisError::Degenerate { .. }));
}

#[test]
fn test_ttest_ind_detects_difference() {
    let group1 = vec![1.0, 1.1, 1.2, 0.9, 1.0, 1.1, 0.95, 1.05];
    let group2 = vec![5.0, 5.1, 5.2, 4.9, 5.0, 5.1, 4.95, 5.05];
    let result = ttest_ind(&group1, &group2, true).expect("valid input");

    assert!(result.pvalue < 0.05);
    assert!(result.statistic < 0.0);
    assert_eq!(result.df, 14.0);
}

#[test]
fn test_ttest_ind_welch_df_is_fractional() {
    let tight = vec![5.0, 5.1, 4.9, 5.0, 5.05, 4.95];
    let wide = vec![1.0, 9.0, 3.0, 7.0, 2.0, 8.0];
    let pooled = ttest_ind(&tight, &wide, true).expect("valid input");
    let welch = ttest_ind(&tight, &wide, false).expect("valid input");

    assert!(welch.df < pooled.df);
    assert!((welch.statistic - pooled.statistic).abs() < 1e-9, "equal n gives equal t");
}

#[test]
fn test_ttest_rel_length_mismatch() {
    let err = ttest_rel(&[1.0, 2.0, 3.0], &[1.0, 2.0]).expect_err("lengths differ");
    assert!(matches!(err, HypothesisError::DimensionMismatch { .. }));
}

#[test]
fn test_ttest_rel_consistent_shift() {
    let before = vec![5.0, 6.0, 7.0, 8.0, 9.0];
    let after = vec![5.5, 6.2, 7.1, 8.3, 9.4];
    let result = ttest_rel(&before, &after).expect("valid input");

    assert!(result.statistic < 0.0);
    assert!(result.pvalue < 0.05);
}

#[test]
fn test_f_oneway_separated_groups() {
    let g1 = [5.0, 6.0, 7.0, 5.5, 6.5];
    let g2 = [8.0, 9.0, 8.5, 9.5, 8.0];
    let g3 = [4.0, 3.0, 3.5, 4.5, 4.0];
    let result = f_oneway(&[&g1, &g2, &g3]).expect("valid input");

    assert!(result.pvalue < 0.01);
    assert_eq!(result.df_between, 2);
    assert_eq!(result.df_within, 12);
}

#[test]
fn test_f_oneway_identical_groups() {
    let g = [1.0, 2.0, 3.0, 4.0];
    let result = f_oneway(&[&g, &g]).expect("valid input");
    assert!(result.statistic.abs() < 1e-12);
    assert!((result.pvalue - 1.0).abs() < 1e-6);
}

#[test]
fn test_f_oneway_constant_groups() {
    let a = [1.0, 1.0];
    let b = [2.0, 2.0];
    let result = f_oneway(&[&a, &b]).expect("distinct constants");
    assert_eq!(result.pvalue, 0.0);

    let err = f_oneway(&[&a, &a]).expect_err("equal constants");
    assert!(matches!(err, HypothesisError::Degenerate { .. }));
}

#[test]
fn test_f_oneway_needs_two_groups() {
    let g: &[f64] = &[1.0, 2.0];
    let empty: &[f64] = &[];
    assert!(f_oneway(&[g]).is_err());
    assert!(f_oneway(&[g, empty]).is_err());
}
